//! Shared test doubles: an in-memory rate provider and a scripted prompter

#![allow(dead_code)]

use chrono::NaiveDate;
use rusty_exchange::conversion::ConversionResult;
use rusty_exchange::currency::Currency;
use rusty_exchange::error::{ConverterError, Result};
use rusty_exchange::history::{HistoricalSeries, HistoryQuery};
use rusty_exchange::provider::RateProvider;
use rusty_exchange::session::Prompter;
use serde_json::{json, Map, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sample_catalog() -> Vec<Currency> {
    vec![
        Currency::new("USD", "United States Dollar"),
        Currency::new("EUR", "Euro"),
        Currency::new("BRL", "Brazilian Real"),
        Currency::new("JPY", "Japanese Yen"),
    ]
}

/// Provider answering from fixed unit rates, recording every call
pub struct StubProvider {
    pub catalog: Result<Vec<Currency>>,
    /// (from, to) -> unit rate
    pub rates: BTreeMap<(String, String), f64>,
    pub latest_status: Option<u16>,
    pub history_status: Option<u16>,
    /// Dates reported by the history endpoint, in provider order
    pub history_dates: Vec<NaiveDate>,
    pub calls: RefCell<Vec<String>>,
}

impl StubProvider {
    pub fn new() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(("USD".to_string(), "EUR".to_string()), 0.92);
        rates.insert(("EUR".to_string(), "USD".to_string()), 1.087);
        rates.insert(("BRL".to_string(), "USD".to_string()), 0.2);
        rates.insert(("USD".to_string(), "JPY".to_string()), 148.5);

        Self {
            catalog: Ok(sample_catalog()),
            rates,
            latest_status: None,
            history_status: None,
            history_dates: vec![date(2024, 1, 3), date(2024, 1, 2), date(2024, 1, 1)],
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == call).count()
    }

    fn unit_rate(&self, from: &str, to: &str) -> Option<f64> {
        self.rates.get(&(from.to_string(), to.to_string())).copied()
    }

    /// Range payload as the provider would send it; the n-th date carries
    /// `rate + n * 0.01`
    pub fn history_payload(&self, query: &HistoryQuery) -> Value {
        let base_rate = self.unit_rate(&query.from.code, &query.to.code).unwrap_or(1.0);
        let mut rates = Map::new();
        for (i, day) in self.history_dates.iter().enumerate() {
            let value = query.amount * (base_rate + i as f64 * 0.01);
            let mut snapshot = Map::new();
            snapshot.insert(query.to.code.clone(), json!(value));
            rates.insert(day.to_string(), Value::Object(snapshot));
        }
        json!({
            "amount": query.amount,
            "base": query.from.code,
            "start_date": query.start.to_string(),
            "end_date": query.end.to_string(),
            "rates": rates,
        })
    }
}

impl RateProvider for StubProvider {
    fn currencies(&self) -> Result<Vec<Currency>> {
        self.calls.borrow_mut().push("currencies".to_string());
        self.catalog.clone()
    }

    fn latest(&self, amount: f64, from: &Currency, to: &Currency) -> Result<ConversionResult> {
        self.calls.borrow_mut().push("latest".to_string());
        if let Some(status) = self.latest_status {
            return Err(ConverterError::Http {
                status,
                message: "stub failure".to_string(),
            });
        }

        let mut rates = BTreeMap::new();
        match self.unit_rate(&from.code, &to.code) {
            Some(rate) => rates.insert(to.code.clone(), amount * rate),
            None => rates.insert("XXX".to_string(), amount),
        };

        Ok(ConversionResult {
            requested_amount: amount,
            base_currency: from.code.clone(),
            as_of_date: date(2024, 1, 3),
            rates,
        })
    }

    fn history(&self, query: &HistoryQuery) -> Result<HistoricalSeries> {
        self.calls.borrow_mut().push("history".to_string());
        if let Some(status) = self.history_status {
            return Err(ConverterError::Http {
                status,
                message: "stub failure".to_string(),
            });
        }
        HistoricalSeries::from_payload(self.history_payload(query))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Prompter replaying canned answers
pub struct ScriptedPrompter {
    pub answers: VecDeque<String>,
    pub questions: Vec<String>,
    pub catalog_shown: usize,
    pub notices: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            questions: Vec::new(),
            catalog_shown: 0,
            notices: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn show_catalog(&mut self, catalog: &[Currency]) {
        self.catalog_shown = catalog.len();
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| ConverterError::Validation("No input provided".to_string()))
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
