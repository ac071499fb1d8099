/// Typed transaction records and the derived summary.
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a transaction has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Posted,
    Pending,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Posted => "Posted",
            Self::Pending => "Pending",
        })
    }
}

/// A single transaction, in debit-negative sign convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub date: NaiveDate,
    /// Negative when money left the account, positive when it arrived.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub description: String,
    pub merchant: Option<String>,
    pub category: String,
    pub status: Status,
}

impl Transaction {
    #[must_use]
    pub fn is_debit(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

/// Aggregate over a transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of negative amounts (zero or less).
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub debits: Decimal,
    /// Sum of positive amounts (zero or more).
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub credits: Decimal,
    /// `credits + debits`.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub net: Decimal,
    pub count: usize,
}

impl Summary {
    #[must_use]
    pub fn of(transactions: &[Transaction]) -> Self {
        let (debits, credits) = transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(debits, credits), txn| {
                if txn.is_debit() {
                    (debits + txn.amount, credits)
                } else {
                    (debits, credits + txn.amount)
                }
            },
        );
        Self {
            debits,
            credits,
            net: credits + debits,
            count: transactions.len(),
        }
    }
}
