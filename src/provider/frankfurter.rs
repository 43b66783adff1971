//! Frankfurter exchange-rate API integration
//!
//! Provides the currency catalog, amount conversions at the latest rate and
//! daily rate history for a date range. No API key required.

use super::{http_client, read_json, RateProvider};
use crate::catalog::parse_catalog;
use crate::config::Config;
use crate::conversion::ConversionResult;
use crate::currency::Currency;
use crate::error::{ConverterError, Result};
use crate::history::{HistoricalSeries, HistoryQuery};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// Frankfurter-style API client
pub struct FrankfurterClient {
    base_url: String,
    client: Client,
}

impl FrankfurterClient {
    /// Create a client for `base_url` (e.g. `https://api.frankfurter.app`)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: http_client(timeout)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.frankfurter_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path of the range endpoint, e.g. `/2024-01-01..2024-01-31`
    pub fn range_path(query: &HistoryQuery) -> String {
        format!("/{}..{}", query.start, query.end)
    }

    fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .map_err(|e| ConverterError::Network(format!("HTTP request failed: {}", e)))?;

        read_json(response)
    }
}

impl RateProvider for FrankfurterClient {
    fn currencies(&self) -> Result<Vec<Currency>> {
        let payload = self.get_json("/currencies", &[])?;
        parse_catalog(payload)
    }

    fn latest(&self, amount: f64, from: &Currency, to: &Currency) -> Result<ConversionResult> {
        let payload = self.get_json(
            "/latest",
            &[
                ("amount", amount.to_string()),
                ("from", from.code.clone()),
                ("to", to.code.clone()),
            ],
        )?;
        ConversionResult::from_payload(amount, payload)
    }

    fn history(&self, query: &HistoryQuery) -> Result<HistoricalSeries> {
        let payload = self.get_json(
            &Self::range_path(query),
            &[
                ("from", query.from.code.clone()),
                ("to", query.to.code.clone()),
                ("amount", query.amount.to_string()),
            ],
        )?;
        HistoricalSeries::from_payload(payload)
    }

    fn name(&self) -> &str {
        "frankfurter"
    }
}
