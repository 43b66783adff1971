//! Historical rate series over a date range

use crate::currency::Currency;
use crate::error::{ConverterError, Result};
use crate::provider::RateProvider;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One date's converted amounts, keyed by currency code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub rates: BTreeMap<String, f64>,
}

/// Daily snapshots for a base currency, oldest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    pub amount: f64,
    pub base_currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub snapshots: Vec<Snapshot>,
}

#[derive(Debug, Deserialize)]
struct RangePayload {
    #[serde(default = "default_payload_amount")]
    amount: f64,
    base: String,
    start_date: String,
    end_date: String,
    rates: BTreeMap<String, BTreeMap<String, f64>>,
}

fn default_payload_amount() -> f64 {
    1.0
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| ConverterError::DataShape(format!("Date parse error for '{}': {}", text, e)))
}

impl HistoricalSeries {
    /// Series with no snapshots
    pub fn empty(amount: f64, base: &Currency, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            amount,
            base_currency: base.code.clone(),
            start_date,
            end_date,
            snapshots: Vec::new(),
        }
    }

    /// Decode a `{amount, base, start_date, end_date, rates: {date: {code: n}}}`
    /// payload. Snapshots come out in ascending date order whatever order the
    /// provider used.
    pub fn from_payload(payload: Value) -> Result<Self> {
        let payload: RangePayload = serde_json::from_value(payload)
            .map_err(|e| ConverterError::DataShape(format!("Invalid history payload: {}", e)))?;

        let mut snapshots = payload
            .rates
            .into_iter()
            .map(|(date, rates)| -> Result<Snapshot> {
                Ok(Snapshot {
                    date: parse_date(&date)?,
                    rates,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        snapshots.sort_by_key(|s| s.date);

        Ok(Self {
            amount: payload.amount,
            base_currency: payload.base,
            start_date: parse_date(&payload.start_date)?,
            end_date: parse_date(&payload.end_date)?,
            snapshots,
        })
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Parameters of a history request
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    pub from: Currency,
    pub to: Currency,
    pub amount: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HistoryQuery {
    pub fn new(
        from: Currency,
        to: Currency,
        amount: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self> {
        if start > end {
            return Err(ConverterError::Validation(format!(
                "History start {} is after end {}",
                start, end
            )));
        }
        Ok(Self {
            from,
            to,
            amount,
            start,
            end,
        })
    }

    /// Window of `days` days ending on `today` (inclusive)
    pub fn trailing(
        from: Currency,
        to: Currency,
        amount: f64,
        today: NaiveDate,
        days: u32,
    ) -> Result<Self> {
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days)))
            .ok_or_else(|| {
                ConverterError::Validation(format!(
                    "History window of {} days before {} is out of range",
                    days, today
                ))
            })?;
        Self::new(from, to, amount, start, today)
    }
}

/// Fetch the rate history of `from` against `to`.
///
/// Identical currencies yield an empty series without any request. A
/// non-success response fails with [`ConverterError::HistoryUnavailable`].
pub fn fetch_history<P: RateProvider + ?Sized>(
    provider: &P,
    from: &Currency,
    to: &Currency,
    amount: f64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<HistoricalSeries> {
    let query = HistoryQuery::new(from.clone(), to.clone(), amount, start, end)?;
    fetch_history_for(provider, &query)
}

/// [`fetch_history`] for a prepared query
pub fn fetch_history_for<P: RateProvider + ?Sized>(
    provider: &P,
    query: &HistoryQuery,
) -> Result<HistoricalSeries> {
    if query.from.same_as(&query.to) {
        log::debug!("{} history against itself requested, returning empty series", query.from);
        return Ok(HistoricalSeries::empty(query.amount, &query.from, query.start, query.end));
    }

    let series = provider
        .history(query)
        .map_err(|e| e.map_http(|status| ConverterError::HistoryUnavailable { status }))?;

    log::info!(
        "Fetched {} snapshots for {}/{} between {} and {}",
        series.len(),
        query.from,
        query.to,
        query.start,
        query.end
    );
    Ok(series)
}
