//! Currency types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency as listed by the provider catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217-like code (e.g. "USD")
    pub code: String,
    /// Human readable name (e.g. "United States Dollar")
    pub display_name: String,
}

impl Currency {
    /// Create a currency, normalizing the code to upper case
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into().trim().to_uppercase(),
            display_name: display_name.into(),
        }
    }

    /// Currency known only by its code; the code doubles as its name
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_uppercase();
        Self {
            display_name: code.clone(),
            code,
        }
    }

    /// Two currencies are the same when their codes match
    pub fn same_as(&self, other: &Currency) -> bool {
        self.code == other.code
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Currency pair (base -> quote)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create new currency pair
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Get the inverse pair
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }

    /// Identity pair: no conversion needed
    pub fn is_identity(&self) -> bool {
        self.base.same_as(&self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
