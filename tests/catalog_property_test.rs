//! Property tests for catalog ordering

mod common;

use common::StubProvider;
use proptest::prelude::*;
use rusty_exchange::catalog::{load_currencies, sort_catalog};
use rusty_exchange::currency::Currency;
use std::collections::HashSet;

fn currency_strategy() -> impl Strategy<Value = Currency> {
    ("[A-Z]{3}", "[A-Za-z ]{1,20}").prop_map(|(code, name)| Currency::new(code, name))
}

proptest! {
    #[test]
    fn prop_catalog_sorted_and_unique(currencies in prop::collection::vec(currency_strategy(), 0..60)) {
        let mut provider = StubProvider::new();
        provider.catalog = Ok(currencies.clone());

        let catalog = load_currencies(&provider).unwrap();

        for window in catalog.windows(2) {
            prop_assert!(window[0].display_name <= window[1].display_name);
        }

        let codes: HashSet<_> = catalog.iter().map(|c| c.code.clone()).collect();
        prop_assert_eq!(codes.len(), catalog.len());

        // Every input code survives exactly once
        let input_codes: HashSet<_> = currencies.iter().map(|c| c.code.clone()).collect();
        prop_assert_eq!(codes, input_codes);
    }

    #[test]
    fn prop_sort_catalog_is_idempotent(currencies in prop::collection::vec(currency_strategy(), 0..40)) {
        let once = sort_catalog(currencies);
        let twice = sort_catalog(once.clone());
        prop_assert_eq!(once, twice);
    }
}
