/// Shared serializable output types for all commands.
///
/// These types are what gets written to stdout as JSON. They are decoupled
/// from the Plaid wire types.
use serde::{Deserialize, Serialize};

use crate::errors::BankError;
use crate::transactions::{Summary, Transaction};

/// The `fetch-transactions --format json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReport {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
}

impl TransactionReport {
    #[must_use]
    pub fn new(transactions: &[Transaction]) -> Self {
        Self {
            transactions: transactions.to_vec(),
            summary: Summary::of(transactions),
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error kind (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Plaid error type and code, for API errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaid_error: Option<String>,
    /// Plaid request id, for API errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Suggested next step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorOutput {
    /// Construct from a `BankError`.
    #[must_use]
    pub fn from_bank_error(err: &BankError) -> Self {
        let (plaid_error, request_id) = match err {
            BankError::Api {
                error_type,
                code,
                request_id,
                ..
            } => (Some(format!("{error_type}/{code}")), request_id.clone()),
            _ => (None, None),
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.kind().to_owned(),
                message: err.to_string(),
                plaid_error,
                request_id,
                hint: err.hint(),
            },
        }
    }
}
