//! Currency catalog loading

use crate::currency::Currency;
use crate::error::{ConverterError, Result};
use crate::provider::RateProvider;
use serde_json::Value;
use std::collections::HashSet;

/// Load the supported currencies, sorted by display name.
///
/// A non-success response fails with [`ConverterError::CatalogUnavailable`].
pub fn load_currencies<P: RateProvider + ?Sized>(provider: &P) -> Result<Vec<Currency>> {
    let currencies = provider
        .currencies()
        .map_err(|e| e.map_http(|status| ConverterError::CatalogUnavailable { status }))?;

    let catalog = sort_catalog(currencies);
    log::info!("Loaded {} currencies from {}", catalog.len(), provider.name());
    Ok(catalog)
}

/// Sort by display name (code breaks ties) and drop repeated codes
pub fn sort_catalog(mut currencies: Vec<Currency>) -> Vec<Currency> {
    currencies.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.code.cmp(&b.code))
    });

    let mut seen = HashSet::new();
    currencies.retain(|c| seen.insert(c.code.clone()));
    currencies
}

/// Decode a `{code: displayName}` payload
pub fn parse_catalog(payload: Value) -> Result<Vec<Currency>> {
    let map = match payload {
        Value::Object(map) => map,
        other => {
            return Err(ConverterError::DataShape(format!(
                "Expected currency object, got {}",
                other
            )))
        }
    };

    map.into_iter()
        .map(|(code, name)| match name {
            Value::String(name) => Ok(Currency::new(code, name)),
            other => Err(ConverterError::DataShape(format!(
                "Display name for {} is not a string: {}",
                code, other
            ))),
        })
        .collect()
}
