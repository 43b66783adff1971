//! Error types for rusty-exchange

use thiserror::Error;

/// Main error type for rusty-exchange
///
/// Every variant owns plain data so that errors can be recorded in a
/// [`SessionState`](crate::session::SessionState) and compared in tests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConverterError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Currency catalog unavailable (HTTP {status})")]
    CatalogUnavailable { status: u16 },

    #[error("Conversion rate unavailable (HTTP {status})")]
    RateUnavailable { status: u16 },

    #[error("Rate history unavailable (HTTP {status})")]
    HistoryUnavailable { status: u16 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unexpected response shape: {0}")]
    DataShape(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConverterError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ConverterError::Http { status, .. }
            | ConverterError::CatalogUnavailable { status }
            | ConverterError::RateUnavailable { status }
            | ConverterError::HistoryUnavailable { status } => Some(*status),
            _ => None,
        }
    }

    /// Re-label a generic HTTP failure with an operation-specific variant.
    ///
    /// Non-HTTP errors pass through untouched.
    pub(crate) fn map_http(self, f: impl FnOnce(u16) -> ConverterError) -> ConverterError {
        match self {
            ConverterError::Http { status, .. } => f(status),
            other => other,
        }
    }
}

impl From<serde_json::Error> for ConverterError {
    fn from(err: serde_json::Error) -> Self {
        ConverterError::DataShape(err.to_string())
    }
}

/// Result type alias for rusty-exchange operations
pub type Result<T> = std::result::Result<T, ConverterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_extraction() {
        assert_eq!(ConverterError::RateUnavailable { status: 500 }.status(), Some(500));
        assert_eq!(
            ConverterError::Http {
                status: 404,
                message: "not found".to_string()
            }
            .status(),
            Some(404)
        );
        assert_eq!(ConverterError::Validation("x".to_string()).status(), None);
    }

    #[test]
    fn test_map_http_relabels_only_http() {
        let err = ConverterError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(
            err.map_http(|status| ConverterError::CatalogUnavailable { status }),
            ConverterError::CatalogUnavailable { status: 503 }
        );

        let err = ConverterError::Network("connection refused".to_string());
        assert_eq!(
            err.clone()
                .map_http(|status| ConverterError::CatalogUnavailable { status }),
            err
        );
    }

    #[test]
    fn test_serde_error_is_data_shape() {
        let err: ConverterError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConverterError::DataShape(_)));
    }
}
