//! Error message formatting and classification

use rusty_exchange::error::ConverterError;

#[test]
fn test_operation_errors_mention_status() {
    let cases = [
        (ConverterError::CatalogUnavailable { status: 503 }, "Currency catalog unavailable"),
        (ConverterError::RateUnavailable { status: 500 }, "Conversion rate unavailable"),
        (ConverterError::HistoryUnavailable { status: 404 }, "Rate history unavailable"),
    ];

    for (err, prefix) in cases {
        let msg = err.to_string();
        assert!(msg.starts_with(prefix), "{}", msg);
        assert!(msg.contains(&err.status().unwrap().to_string()), "{}", msg);
    }
}

#[test]
fn test_http_error_message() {
    let err = ConverterError::Http {
        status: 404,
        message: "unsupported_code".to_string(),
    };
    assert_eq!(err.to_string(), "HTTP error 404: unsupported_code");
}

#[test]
fn test_validation_and_shape_messages() {
    assert_eq!(
        ConverterError::Validation("'x' is not a valid number".to_string()).to_string(),
        "Invalid input: 'x' is not a valid number"
    );
    assert_eq!(
        ConverterError::DataShape("Currency 'XYZ' not found".to_string()).to_string(),
        "Unexpected response shape: Currency 'XYZ' not found"
    );
    assert!(ConverterError::Network("timed out".to_string())
        .to_string()
        .contains("timed out"));
}

#[test]
fn test_errors_are_comparable_values() {
    let err = ConverterError::RateUnavailable { status: 500 };
    let copy = err.clone();
    assert_eq!(err, copy);
    assert_ne!(err, ConverterError::RateUnavailable { status: 502 });
}
