//! Exchange-rate provider integrations
//!
//! - **frankfurter**: currency catalog, latest conversions and date ranges
//! - **exchangerate_api**: single `/latest/{base}` lookups for the simple converter

pub mod exchangerate_api;
pub mod frankfurter;

pub use exchangerate_api::ExchangeRateApiClient;
pub use frankfurter::FrankfurterClient;

use crate::conversion::ConversionResult;
use crate::currency::Currency;
use crate::error::{ConverterError, Result};
use crate::history::{HistoricalSeries, HistoryQuery};
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Source of catalog, conversion and history data.
///
/// Implementations report non-success responses as [`ConverterError::Http`];
/// the fetchers in [`catalog`](crate::catalog), [`conversion`](crate::conversion)
/// and [`history`](crate::history) re-label them per operation.
pub trait RateProvider {
    /// Fetch the supported currencies, in provider order
    fn currencies(&self) -> Result<Vec<Currency>>;

    /// Convert `amount` of `from` into `to` at the latest available rate
    fn latest(&self, amount: f64, from: &Currency, to: &Currency) -> Result<ConversionResult>;

    /// Fetch daily snapshots for the query's date range
    fn history(&self, query: &HistoryQuery) -> Result<HistoricalSeries>;

    /// Get the provider name
    fn name(&self) -> &str;
}

/// Build a blocking HTTP client with the given per-request timeout
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("rusty-exchange/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConverterError::Network(format!("Failed to create HTTP client: {}", e)))
}

/// Read a response body as JSON, turning non-2xx statuses into `Http` errors
pub(crate) fn read_json(response: Response) -> Result<Value> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .map_err(|e| ConverterError::Network(format!("Failed to read response: {}", e)))?;
    parse_body(status, &body)
}

/// Status check and JSON decoding of an already-read body
pub(crate) fn parse_body(status: u16, body: &str) -> Result<Value> {
    if !(200..300).contains(&status) {
        return Err(ConverterError::Http {
            status,
            message: error_message(body),
        });
    }
    serde_json::from_str(body)
        .map_err(|e| ConverterError::DataShape(format!("JSON parse error: {}", e)))
}

/// Best-effort error text from a failure body: the `error` or `message`
/// field of a JSON object, otherwise the raw (trimmed) body
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message", "error-type"] {
            if let Some(Value::String(text)) = map.get(key) {
                return text.clone();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
