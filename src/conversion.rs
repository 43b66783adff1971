//! Point-in-time currency conversion

use crate::currency::Currency;
use crate::error::{ConverterError, Result};
use crate::provider::RateProvider;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Result of converting an amount at the latest available rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub requested_amount: f64,
    pub base_currency: String,
    pub as_of_date: NaiveDate,
    /// Currency code -> converted amount (not the unit rate)
    pub rates: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct LatestPayload {
    base: String,
    date: String,
    rates: BTreeMap<String, f64>,
}

impl ConversionResult {
    /// Conversion of a currency into itself: rate 1.0, no lookup
    pub fn identity(amount: f64, currency: &Currency, as_of_date: NaiveDate) -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(currency.code.clone(), amount);
        Self {
            requested_amount: amount,
            base_currency: currency.code.clone(),
            as_of_date,
            rates,
        }
    }

    /// Decode a `{base, date, rates}` payload
    pub fn from_payload(requested_amount: f64, payload: Value) -> Result<Self> {
        let payload: LatestPayload = serde_json::from_value(payload)
            .map_err(|e| ConverterError::DataShape(format!("Invalid conversion payload: {}", e)))?;

        let as_of_date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d").map_err(|e| {
            ConverterError::DataShape(format!("Date parse error for '{}': {}", payload.date, e))
        })?;

        Ok(Self {
            requested_amount,
            base_currency: payload.base,
            as_of_date,
            rates: payload.rates,
        })
    }

    /// Converted amount for `code`
    pub fn converted(&self, code: &str) -> Result<f64> {
        self.rates.get(code).copied().ok_or_else(|| {
            ConverterError::DataShape(format!("Currency '{}' missing from conversion result", code))
        })
    }

    /// Rate for one unit of the base currency
    pub fn unit_rate(&self, code: &str) -> Result<f64> {
        let converted = self.converted(code)?;
        if self.requested_amount == 0.0 {
            return Err(ConverterError::Validation(
                "Cannot derive a rate from a zero amount".to_string(),
            ));
        }
        Ok(converted / self.requested_amount)
    }
}

/// Check that an amount is a positive, finite number
pub fn validate_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ConverterError::Validation(format!(
            "Amount must be a positive number, got {}",
            amount
        )))
    }
}

/// Convert `amount` of `from` into `to`.
///
/// When both currencies are the same the provider is never called and the
/// identity rate applies. The destination code must be present in the
/// provider's answer; its position in the mapping is irrelevant.
pub fn fetch_conversion<P: RateProvider + ?Sized>(
    provider: &P,
    amount: f64,
    from: &Currency,
    to: &Currency,
) -> Result<ConversionResult> {
    let amount = validate_amount(amount)?;

    if from.same_as(to) {
        log::debug!("{} -> {} is an identity conversion, skipping request", from, to);
        return Ok(ConversionResult::identity(amount, to, Local::now().date_naive()));
    }

    let result = provider
        .latest(amount, from, to)
        .map_err(|e| e.map_http(|status| ConverterError::RateUnavailable { status }))?;

    // Reject answers that do not mention the requested destination
    result.converted(&to.code)?;

    log::info!(
        "Converted {:.2} {} as of {} via {}",
        amount,
        from,
        result.as_of_date,
        provider.name()
    );
    Ok(result)
}

/// Apply a unit rate to an amount
pub fn convert_amount(amount: f64, rate: f64) -> f64 {
    amount * rate
}

/// Render a conversion line, e.g. `100.00 USD = 92.00 EUR`
pub fn format_conversion(amount: f64, from: &str, converted: f64, to: &str) -> String {
    format!("{:.2} {} = {:.2} {}", amount, from, converted, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_from_payload() {
        let payload = json!({
            "amount": 100.0,
            "base": "USD",
            "date": "2024-03-15",
            "rates": {"EUR": 92.0}
        });
        let result = ConversionResult::from_payload(100.0, payload).unwrap();

        assert_eq!(result.base_currency, "USD");
        assert_eq!(result.as_of_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(result.converted("EUR").unwrap(), 92.0);
        assert_relative_eq!(result.unit_rate("EUR").unwrap(), 0.92);
    }

    #[test]
    fn test_from_payload_bad_date() {
        let payload = json!({"base": "USD", "date": "15/03/2024", "rates": {}});
        let err = ConversionResult::from_payload(1.0, payload).unwrap_err();
        assert!(matches!(err, ConverterError::DataShape(_)));
    }

    #[test]
    fn test_from_payload_missing_rates() {
        let payload = json!({"base": "USD", "date": "2024-03-15"});
        assert!(ConversionResult::from_payload(1.0, payload).is_err());
    }

    #[test]
    fn test_converted_missing_code() {
        let result = ConversionResult::identity(
            10.0,
            &Currency::from_code("EUR"),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!(result.converted("USD").is_err());
    }

    #[test]
    fn test_identity() {
        let eur = Currency::from_code("EUR");
        let result = ConversionResult::identity(250.0, &eur, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(result.converted("EUR").unwrap(), 250.0);
        assert_eq!(result.unit_rate("EUR").unwrap(), 1.0);
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount(10.5).unwrap(), 10.5);
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-3.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(format_conversion(100.0, "USD", 92.0, "EUR"), "100.00 USD = 92.00 EUR");
        assert_eq!(format_conversion(1.0 / 3.0, "BRL", 0.066666, "USD"), "0.33 BRL = 0.07 USD");
    }

    #[test]
    fn test_convert_amount() {
        assert_relative_eq!(convert_amount(100.0, 0.92), 92.0);
    }
}
