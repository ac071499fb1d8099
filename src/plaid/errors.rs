/// Errors from the Plaid HTTP transport layer.
use std::error::Error as _;

use thiserror::Error;

/// Error code reported when a 2xx response body cannot be decoded.
pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";

/// Typed errors from a Plaid API call.
#[derive(Debug, Error)]
pub enum PlaidError {
    /// Plaid rejected the request and returned its error envelope.
    #[error("{error_type}/{error_code}: {error_message}")]
    Api {
        /// Broad error category (e.g. `INVALID_INPUT`, `ITEM_ERROR`).
        error_type: String,
        /// Specific error code (e.g. `INVALID_ACCESS_TOKEN`).
        error_code: String,
        /// Developer-facing message from Plaid.
        error_message: String,
        /// End-user-facing message, when Plaid provides one.
        display_message: Option<String>,
        /// Plaid request id, useful when contacting support.
        request_id: Option<String>,
    },

    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("{0}")]
    Network(String),
}

impl PlaidError {
    /// Build the error for a successful status whose body did not match the expected shape.
    #[must_use]
    pub fn invalid_response(endpoint: &str, detail: &str) -> Self {
        Self::Api {
            error_type: "API_ERROR".to_owned(),
            error_code: INVALID_RESPONSE.to_owned(),
            error_message: format!("unexpected response from {endpoint}: {detail}"),
            display_message: None,
            request_id: None,
        }
    }
}

impl From<reqwest::Error> for PlaidError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest nests the useful cause (connection refused, timeout) in the source chain.
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Network(message)
    }
}
