//! Configured symbols (`config/symbols.json`).

use serde::{Deserialize, Serialize};

/// One entry of the static symbol list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolConfig {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub domain: String,
}

impl SymbolConfig {
    /// Lowercase key used for file names, URLs and summary lookups.
    pub fn key(&self) -> String {
        self.symbol.to_lowercase()
    }

    /// Symbol as shown on cards.
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// Remote logo location for the company domain.
    pub fn logo_url(&self) -> Option<String> {
        let domain = self.domain.trim();
        if domain.is_empty() {
            None
        } else {
            Some(format!("https://logo.clearbit.com/{domain}"))
        }
    }

    /// Initials shown in place of the logo: first letter of up to two words.
    pub fn initials(&self) -> String {
        self.name
            .split(' ')
            .filter_map(|chunk| chunk.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}
