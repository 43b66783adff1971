//! Interactive conversion session
//!
//! The session runs a linear pipeline:
//!
//! 1. load the currency catalog
//! 2. ask for amount, origin and destination
//! 3. convert at the latest rate
//! 4. fetch the trailing rate history
//! 5. project the history onto the destination currency
//!
//! Each step takes a [`SessionState`] by value and returns the next one. A
//! failing step records its error in [`SessionState::issues`] and the
//! pipeline carries on with defaults (rate 0.0, no history).

use crate::catalog::load_currencies;
use crate::config::Config;
use crate::conversion::{fetch_conversion, ConversionResult};
use crate::currency::{Currency, CurrencyPair};
use crate::error::{ConverterError, Result};
use crate::history::{fetch_history_for, HistoricalSeries, HistoryQuery};
use crate::provider::RateProvider;
use crate::timeseries::{project, SeriesPoint};
use chrono::{Local, NaiveDate};

/// Terminal-facing side of a session
pub trait Prompter {
    /// Present the numbered catalog (numbering starts at 1)
    fn show_catalog(&mut self, catalog: &[Currency]);

    /// Ask a question and return the raw answer
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Progress message
    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
    }
}

pub const AMOUNT_PROMPT: &str = "Amount to convert";
pub const ORIGIN_PROMPT: &str = "Origin currency (number)";
pub const DESTINATION_PROMPT: &str = "Destination currency (number)";

/// Parse an amount; blank input falls back to `default_amount`.
///
/// A single comma is read as the decimal separator ("12,5"). Input that
/// could be digit grouping ("1,000", "1.000,50") is rejected.
pub fn parse_amount(input: &str, default_amount: f64) -> Result<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default_amount);
    }

    let invalid = || ConverterError::Validation(format!("'{}' is not a valid number", input));
    let normalized = match input.split_once(',') {
        None => input.to_string(),
        Some((whole, fraction)) => {
            if whole.contains('.') || fraction.contains(['.', ',']) || fraction.len() == 3 {
                return Err(invalid());
            }
            format!("{}.{}", whole, fraction)
        }
    };

    let amount: f64 = normalized.parse().map_err(|_| invalid())?;
    crate::conversion::validate_amount(amount)
}

/// Parse a 1-based catalog choice into a 0-based index
pub fn parse_choice(input: &str, catalog_len: usize) -> Result<usize> {
    let input = input.trim();
    let choice: usize = input
        .parse()
        .map_err(|_| ConverterError::Validation(format!("'{}' is not a catalog number", input)))?;

    if choice == 0 || choice > catalog_len {
        return Err(ConverterError::Validation(format!(
            "Choice {} is out of range (1-{})",
            choice, catalog_len
        )));
    }
    Ok(choice - 1)
}

/// Everything a session knows at a given point of the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub amount: f64,
    pub catalog: Vec<Currency>,
    pub origin: Option<Currency>,
    pub destination: Option<Currency>,
    pub conversion: Option<ConversionResult>,
    /// Unit rate origin -> destination; 0.0 until a conversion succeeds
    pub rate: f64,
    pub history: Option<HistoricalSeries>,
    pub series: Vec<SeriesPoint>,
    /// Non-fatal errors, in the order they happened
    pub issues: Vec<ConverterError>,
}

impl SessionState {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            catalog: Vec::new(),
            origin: None,
            destination: None,
            conversion: None,
            rate: 0.0,
            history: None,
            series: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn with_catalog(self, catalog: Vec<Currency>) -> Self {
        Self { catalog, ..self }
    }

    /// Select amount and currencies; earlier results no longer apply
    pub fn with_selection(self, amount: f64, origin: Currency, destination: Currency) -> Self {
        Self {
            amount,
            origin: Some(origin),
            destination: Some(destination),
            ..self.clear_results()
        }
    }

    /// Exchange origin and destination, dropping results of the old direction.
    ///
    /// A half-made selection is left as it is.
    pub fn swap_currencies(self) -> Self {
        let Some(swapped) = self.pair().map(|pair| pair.inverse()) else {
            return self;
        };
        Self {
            origin: Some(swapped.base),
            destination: Some(swapped.quote),
            ..self.clear_results()
        }
    }

    pub fn with_issue(mut self, issue: ConverterError) -> Self {
        self.issues.push(issue);
        self
    }

    /// Selected pair, when both ends are set
    pub fn pair(&self) -> Option<CurrencyPair> {
        match (&self.origin, &self.destination) {
            (Some(origin), Some(destination)) => {
                Some(CurrencyPair::new(origin.clone(), destination.clone()))
            }
            _ => None,
        }
    }

    /// Converted amount in the destination currency, if a conversion succeeded
    pub fn converted_amount(&self) -> Option<f64> {
        let destination = self.destination.as_ref()?;
        self.conversion
            .as_ref()
            .and_then(|c| c.converted(&destination.code).ok())
    }

    fn clear_results(self) -> Self {
        Self {
            conversion: None,
            rate: 0.0,
            history: None,
            series: Vec::new(),
            ..self
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

/// Pipeline driver bound to one provider
pub struct Session<'a, P: RateProvider + ?Sized> {
    provider: &'a P,
    default_amount: f64,
    history_days: u32,
    today: NaiveDate,
}

impl<'a, P: RateProvider + ?Sized> Session<'a, P> {
    pub fn new(provider: &'a P, config: &Config) -> Self {
        Self {
            provider,
            default_amount: config.default_amount,
            history_days: config.history_days,
            today: Local::now().date_naive(),
        }
    }

    /// Pin the date the history window ends on
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Fresh state seeded with the configured default amount
    pub fn initial_state(&self) -> SessionState {
        SessionState::new(self.default_amount)
    }

    /// Run the whole pipeline
    pub fn run(&self, prompter: &mut dyn Prompter) -> SessionState {
        let state = self.load_catalog(self.initial_state());
        let state = self.select(state, prompter);
        self.refresh(state, prompter)
    }

    /// Conversion, history and projection for the current selection
    pub fn refresh(&self, state: SessionState, prompter: &mut dyn Prompter) -> SessionState {
        let state = self.convert(state, prompter);
        let state = self.fetch_history(state);
        self.project(state)
    }

    pub fn load_catalog(&self, state: SessionState) -> SessionState {
        match load_currencies(self.provider) {
            Ok(catalog) => state.with_catalog(catalog),
            Err(e) => {
                log::warn!("Could not load currencies: {}", e);
                state.with_catalog(Vec::new()).with_issue(e)
            }
        }
    }

    /// Ask for amount, origin and destination.
    ///
    /// Invalid input aborts this step only: the state keeps no selection.
    pub fn select(&self, state: SessionState, prompter: &mut dyn Prompter) -> SessionState {
        match self.read_selection(&state.catalog, prompter) {
            Ok((amount, origin, destination)) => state.with_selection(amount, origin, destination),
            Err(e) => {
                log::warn!("Selection rejected: {}", e);
                state.with_issue(e)
            }
        }
    }

    fn read_selection(
        &self,
        catalog: &[Currency],
        prompter: &mut dyn Prompter,
    ) -> Result<(f64, Currency, Currency)> {
        if catalog.is_empty() {
            return Err(ConverterError::Validation(
                "No currencies available to choose from".to_string(),
            ));
        }

        let amount = parse_amount(&prompter.ask(AMOUNT_PROMPT)?, self.default_amount)?;
        prompter.show_catalog(catalog);
        let origin = parse_choice(&prompter.ask(ORIGIN_PROMPT)?, catalog.len())?;
        let destination = parse_choice(&prompter.ask(DESTINATION_PROMPT)?, catalog.len())?;

        Ok((amount, catalog[origin].clone(), catalog[destination].clone()))
    }

    pub fn convert(&self, state: SessionState, prompter: &mut dyn Prompter) -> SessionState {
        let Some(pair) = state.pair() else {
            log::debug!("No currency pair selected, skipping conversion");
            return state;
        };

        prompter.notify(&format!(
            "Converting {:.2} {} to {}...",
            state.amount, pair.base.display_name, pair.quote.display_name
        ));

        let outcome = fetch_conversion(self.provider, state.amount, &pair.base, &pair.quote)
            .and_then(|result| {
                let rate = result.unit_rate(&pair.quote.code)?;
                Ok((result, rate))
            });

        match outcome {
            Ok((result, rate)) => SessionState {
                conversion: Some(result),
                rate,
                ..state
            },
            Err(e) => {
                log::warn!("Conversion {} failed: {}", pair, e);
                SessionState {
                    conversion: None,
                    rate: 0.0,
                    ..state
                }
                .with_issue(e)
            }
        }
    }

    pub fn fetch_history(&self, state: SessionState) -> SessionState {
        let Some(pair) = state.pair() else {
            log::debug!("No currency pair selected, skipping history");
            return state;
        };

        let outcome = HistoryQuery::trailing(
            pair.base.clone(),
            pair.quote.clone(),
            state.amount,
            self.today,
            self.history_days,
        )
        .and_then(|query| fetch_history_for(self.provider, &query));

        match outcome {
            Ok(series) => SessionState {
                history: Some(series),
                ..state
            },
            Err(e) => {
                log::warn!("History for {} failed: {}", pair, e);
                SessionState {
                    history: None,
                    ..state
                }
                .with_issue(e)
            }
        }
    }

    pub fn project(&self, state: SessionState) -> SessionState {
        let series = match &state.destination {
            Some(destination) => project(state.history.as_ref(), destination),
            None => Vec::new(),
        };
        SessionState { series, ..state }
    }
}
