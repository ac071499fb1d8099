/// Errors surfaced to the command layer.
use chrono::NaiveDate;
use thiserror::Error;

use crate::plaid::PlaidError;

/// Everything that can stop a command.
#[derive(Debug, Error)]
pub enum BankError {
    /// Missing or invalid settings. Detected before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Plaid rejected the request.
    #[error("Plaid API error [{code}]: {message}")]
    Api {
        /// Plaid error category.
        error_type: String,
        /// Plaid error code (e.g. `INVALID_ACCESS_TOKEN`).
        code: String,
        /// Developer-facing message.
        message: String,
        /// End-user-facing message, if Plaid sent one.
        display_message: Option<String>,
        /// Plaid request id.
        request_id: Option<String>,
    },

    /// The query succeeded but matched no transactions. Not fatal.
    #[error("No transactions found between {start_date} and {end_date}")]
    NoData {
        /// First day of the queried range.
        start_date: NaiveDate,
        /// Last day of the queried range.
        end_date: NaiveDate,
    },

    /// The request could not be delivered.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<PlaidError> for BankError {
    fn from(err: PlaidError) -> Self {
        match err {
            PlaidError::Api {
                error_type,
                error_code,
                error_message,
                display_message,
                request_id,
            } => Self::Api {
                error_type,
                code: error_code,
                message: error_message,
                display_message,
                request_id,
            },
            PlaidError::Network(message) => Self::Network(message),
        }
    }
}

impl BankError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoData { .. } => 0,
            Self::Configuration(_) => 2,
            Self::Api { .. } => 3,
            Self::Network(_) => 4,
        }
    }

    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::Api { .. } => "api_error",
            Self::NoData { .. } => "no_data",
            Self::Network(_) => "network_error",
        }
    }

    /// A short suggestion for the user, printed under the error message.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Configuration(_) => Some(
                "Make sure PLAID_CLIENT_ID and PLAID_SECRET are set in the environment or a .env file"
                    .to_owned(),
            ),
            Self::Api {
                code,
                display_message,
                ..
            } => match code.as_str() {
                "INVALID_API_KEYS" | "INVALID_CLIENT_ID" | "INVALID_SECRET" => {
                    Some("Check your credentials at https://dashboard.plaid.com/".to_owned())
                }
                "INVALID_ACCESS_TOKEN" | "ITEM_NOT_FOUND" | "ITEM_LOGIN_REQUIRED" => Some(
                    "Your access token may be invalid. Try running 'setup' again.".to_owned(),
                ),
                "PRODUCT_NOT_READY" => Some(
                    "Transactions for this item are still being prepared; retry in a few seconds."
                        .to_owned(),
                ),
                "RATE_LIMIT_EXCEEDED" => Some("Wait a moment before retrying.".to_owned()),
                _ => display_message.clone(),
            },
            Self::NoData { .. } => None,
            Self::Network(_) => Some("Check your network connection and PLAID_ENV.".to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: &str) -> PlaidError {
        PlaidError::Api {
            error_type: "INVALID_INPUT".to_owned(),
            error_code: code.to_owned(),
            error_message: "the provided access token is invalid".to_owned(),
            display_message: None,
            request_id: Some("req-1".to_owned()),
        }
    }

    #[test]
    fn test_api_error_keeps_vendor_code() {
        let err = BankError::from(api_error("INVALID_ACCESS_TOKEN"));
        assert_eq!(
            err.to_string(),
            "Plaid API error [INVALID_ACCESS_TOKEN]: the provided access token is invalid"
        );
        assert_eq!(err.exit_code(), 3);
        assert!(err.hint().unwrap().contains("setup"));
    }

    #[test]
    fn test_network_error_maps_to_network() {
        let err = BankError::from(PlaidError::Network("connection refused".to_owned()));
        assert!(matches!(err, BankError::Network(_)));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_no_data_is_not_fatal() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let err = BankError::NoData {
            start_date: day,
            end_date: day,
        };
        assert_eq!(err.exit_code(), 0);
        assert!(err.hint().is_none());
    }

    #[test]
    fn test_unknown_code_falls_back_to_display_message() {
        let err = BankError::Api {
            error_type: "INSTITUTION_ERROR".to_owned(),
            code: "INSTITUTION_DOWN".to_owned(),
            message: "institution is down".to_owned(),
            display_message: Some("The bank is unavailable.".to_owned()),
            request_id: None,
        };
        assert_eq!(err.hint().as_deref(), Some("The bank is unavailable."));
    }
}
