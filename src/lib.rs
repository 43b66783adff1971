//! # rusty-exchange
//!
//! Currency conversion against public exchange-rate APIs.
//!
//! The library covers the whole data pipeline: loading the currency catalog,
//! converting an amount at the latest rate, fetching a trailing rate history
//! and projecting it onto the destination currency. The `rusty-exchange`
//! binary wraps it in an interactive prompt.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rusty_exchange::prelude::*;
//!
//! let config = Config::default();
//! let provider = FrankfurterClient::from_config(&config)?;
//!
//! let catalog = load_currencies(&provider)?;
//! println!("{} currencies available", catalog.len());
//! let usd = Currency::new("USD", "United States Dollar");
//! let eur = Currency::new("EUR", "Euro");
//!
//! let result = fetch_conversion(&provider, 100.0, &usd, &eur)?;
//! println!("{}", format_conversion(100.0, "USD", result.converted("EUR")?, "EUR"));
//! # Ok::<(), ConverterError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod history;
pub mod provider;
pub mod session;
pub mod timeseries;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::catalog::load_currencies;
    pub use crate::config::Config;
    pub use crate::conversion::{fetch_conversion, format_conversion, ConversionResult};
    pub use crate::currency::{Currency, CurrencyPair};
    pub use crate::error::{ConverterError, Result};
    pub use crate::history::{fetch_history, HistoricalSeries, HistoryQuery};
    pub use crate::provider::{ExchangeRateApiClient, FrankfurterClient, RateProvider};
    pub use crate::session::{Prompter, Session, SessionState};
    pub use crate::timeseries::{project, SeriesPoint};
}
