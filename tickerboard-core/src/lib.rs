//! Tickerboard Core: domain types, ingest, fetch pipeline, forecast math, dashboard view model.
//!
//! This crate holds everything both binaries share:
//! - Domain types mirroring the JSON file contract (symbols, series, summary)
//! - CSV ingest and trailing-performance computation
//! - The sequential fetch pass (provider → ingest → JSON store)
//! - Linear-regression forecast and volatility
//! - Dashboard loading plus the filter/sort/card pipeline, independent of any terminal

pub mod config;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod forecast;
