//! Projection of historical snapshots onto a single currency

use crate::currency::Currency;
use crate::history::HistoricalSeries;
use serde::Serialize;
use serde_json::Value;

/// One labelled point of a projected series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Snapshot date as `YYYY-MM-DD`
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Extract the `destination` value of every snapshot, oldest first.
///
/// Snapshots without the destination are skipped; an absent series yields
/// an empty projection.
pub fn project(series: Option<&HistoricalSeries>, destination: &Currency) -> Vec<SeriesPoint> {
    let Some(series) = series else {
        return Vec::new();
    };

    series
        .snapshots
        .iter()
        .filter_map(|snapshot| match snapshot.rates.get(&destination.code) {
            Some(value) => Some(SeriesPoint::new(snapshot.date.format("%Y-%m-%d").to_string(), *value)),
            None => {
                log::debug!("No {} rate on {}, skipping", destination, snapshot.date);
                None
            }
        })
        .collect()
}

/// [`project`] over an unvalidated provider payload.
///
/// Only the `rates` object is read. Points are ordered by their date key.
/// Malformed payloads (e.g. without a `rates` key) project to an empty
/// series, as do snapshots whose destination value is not a number.
pub fn project_payload(payload: &Value, destination: &Currency) -> Vec<SeriesPoint> {
    let Some(rates) = payload.get("rates").and_then(Value::as_object) else {
        log::debug!("History payload has no rates object, nothing to project");
        return Vec::new();
    };

    let mut points: Vec<SeriesPoint> = rates
        .iter()
        .filter_map(|(label, snapshot)| {
            snapshot
                .get(&destination.code)
                .and_then(Value::as_f64)
                .map(|value| SeriesPoint::new(label.as_str(), value))
        })
        .collect();
    points.sort_by(|a, b| a.label.cmp(&b.label));
    points
}
