//! exchangerate-api.com integration
//!
//! One request per lookup: `GET /latest/{base}` returns every rate for the
//! base currency and the requested target is picked out of it.

use super::{http_client, read_json};
use crate::config::Config;
use crate::error::{ConverterError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Client for the simple `/latest/{base}` rate endpoint
pub struct ExchangeRateApiClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct LatestRatesPayload {
    rates: BTreeMap<String, f64>,
}

impl ExchangeRateApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: http_client(timeout)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.exchangerate_api_url, config.timeout())
    }

    /// Unit rate from `base` to `target` (codes are case-insensitive)
    pub fn rate(&self, base: &str, target: &str) -> Result<f64> {
        let base = base.trim().to_uppercase();
        let url = format!("{}/latest/{}", self.base_url, base);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ConverterError::Network(format!("HTTP request failed: {}", e)))?;

        let payload = read_json(response)?;
        parse_rate(payload, target)
    }
}

/// Pick `target` out of a `{rates: {code: number}}` payload
pub fn parse_rate(payload: Value, target: &str) -> Result<f64> {
    let target = target.trim().to_uppercase();
    let payload: LatestRatesPayload = serde_json::from_value(payload)
        .map_err(|e| ConverterError::DataShape(format!("Invalid rates payload: {}", e)))?;

    payload
        .rates
        .get(&target)
        .copied()
        .ok_or_else(|| ConverterError::DataShape(format!("Currency '{}' not found", target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = ExchangeRateApiClient::from_config(&Config::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_parse_rate() {
        let payload = json!({"base": "BRL", "rates": {"USD": 0.2, "EUR": 0.18}});
        assert_eq!(parse_rate(payload, "eur").unwrap(), 0.18);
    }

    #[test]
    fn test_parse_rate_missing_target() {
        let payload = json!({"rates": {"USD": 0.2}});
        let err = parse_rate(payload, "XYZ").unwrap_err();
        assert_eq!(
            err,
            ConverterError::DataShape("Currency 'XYZ' not found".to_string())
        );
    }

    #[test]
    fn test_parse_rate_missing_rates() {
        let err = parse_rate(json!({"result": "error"}), "USD").unwrap_err();
        assert!(matches!(err, ConverterError::DataShape(_)));
    }
}
