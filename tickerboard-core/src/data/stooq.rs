//! Stooq daily CSV provider.
//!
//! Issues one GET per symbol against a URL template. No retries and no rate
//! limiting: a failed request is reported to the caller, which skips the symbol.

use super::provider::{FeedError, QuoteProvider};
use crate::config::SourceConfig;
use std::time::Duration;

const USER_AGENT: &str = concat!("tickerboard/", env!("CARGO_PKG_VERSION"));

/// CSV provider for stooq.com style endpoints.
pub struct StooqProvider {
    client: reqwest::blocking::Client,
    url_template: String,
    interval: String,
}

impl StooqProvider {
    pub fn new(config: &SourceConfig) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url_template: config.url_template.clone(),
            interval: config.interval.clone(),
        })
    }

    /// Expand the URL template for a symbol.
    pub fn url_for(&self, symbol: &str) -> String {
        expand_template(&self.url_template, symbol, &self.interval)
    }
}

/// Substitute `{symbol}` and `{interval}` placeholders.
pub fn expand_template(template: &str, symbol: &str, interval: &str) -> String {
    template
        .replace("{symbol}", symbol)
        .replace("{interval}", interval)
}

impl QuoteProvider for StooqProvider {
    fn name(&self) -> &str {
        "stooq"
    }

    fn fetch_csv(&self, symbol: &str) -> Result<String, FeedError> {
        let url = self.url_for(symbol);
        tracing::debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FeedError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text()
            .map_err(|e| FeedError::NetworkUnreachable(format!("reading body for {symbol}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_expansion() {
        let url = expand_template("https://stooq.com/q/d/l/?s={symbol}&i={interval}", "aapl.us", "d");
        assert_eq!(url, "https://stooq.com/q/d/l/?s=aapl.us&i=d");
    }

    #[test]
    fn provider_uses_configured_template() {
        let config = SourceConfig {
            url_template: "http://localhost/{interval}/{symbol}.csv".into(),
            interval: "w".into(),
            timeout_secs: 5,
        };
        let provider = StooqProvider::new(&config).unwrap();
        assert_eq!(provider.url_for("spy"), "http://localhost/w/spy.csv");
        assert_eq!(provider.name(), "stooq");
    }
}
