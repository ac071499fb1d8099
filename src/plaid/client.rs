/// The three operations the CLI performs against Plaid.
use chrono::NaiveDate;

use super::api::PlaidApi;
use super::wire::TransactionsGetOptions;
use crate::config::{Config, Environment};
use crate::errors::BankError;
use crate::transactions::{Transaction, from_plaid};

/// First Platypus Bank, Plaid's default sandbox institution.
pub const DEFAULT_INSTITUTION_ID: &str = "ins_109508";

/// Largest page `/transactions/get` accepts.
const PAGE_SIZE: u32 = 500;
const TRANSACTIONS_PRODUCT: &str = "transactions";
const COUNTRY_CODES: &[&str] = &["US"];

/// Result of the sandbox setup flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxToken {
    pub access_token: String,
    pub item_id: String,
}

/// What a successful connectivity check learned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionDetails {
    /// `/item/get` succeeded for the configured access token.
    Item {
        item_id: String,
        institution_id: Option<String>,
        available_products: Vec<String>,
        billed_products: Vec<String>,
    },
    /// No access token configured; the credentials were checked against an institution lookup.
    Institution {
        institution_id: String,
        name: String,
        products: Vec<String>,
    },
}

/// Outcome of `test_connection`. Failures are data, not errors.
#[derive(Debug)]
pub struct ConnectionReport {
    pub environment: Environment,
    pub outcome: Result<ConnectionDetails, BankError>,
}

/// Thin adapter over a [`PlaidApi`] transport.
pub struct TransactionClient<'a, A: PlaidApi> {
    api: A,
    config: &'a Config,
}

impl<'a, A: PlaidApi> TransactionClient<'a, A> {
    #[must_use]
    pub fn new(api: A, config: &'a Config) -> Self {
        Self { api, config }
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Create a sandbox item and exchange its public token for an access token.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Configuration` outside the sandbox tier or for a blank
    /// institution id, `BankError::Api`/`BankError::Network` if either call fails.
    pub fn create_sandbox_token(&self, institution_id: &str) -> Result<SandboxToken, BankError> {
        if self.config.environment != Environment::Sandbox {
            return Err(BankError::Configuration(format!(
                "setup only works against the sandbox tier (PLAID_ENV is '{}')",
                self.config.environment
            )));
        }
        let institution_id = institution_id.trim();
        if institution_id.is_empty() {
            return Err(BankError::Configuration(
                "institution id must not be empty".to_owned(),
            ));
        }

        let public = self
            .api
            .sandbox_public_token_create(institution_id, &[TRANSACTIONS_PRODUCT])?;
        tracing::debug!(institution_id, "sandbox public token created");

        let exchanged = self.api.item_public_token_exchange(&public.public_token)?;
        tracing::info!(item_id = %exchanged.item_id, "public token exchanged");

        Ok(SandboxToken {
            access_token: exchanged.access_token,
            item_id: exchanged.item_id,
        })
    }

    /// Fetch every transaction in `start_date..=end_date`, in the order Plaid returns them.
    ///
    /// # Errors
    ///
    /// Returns `BankError::NoData` when the range holds no transactions,
    /// `BankError::Configuration` for an inverted range, and
    /// `BankError::Api`/`BankError::Network` if any page fails. A failed page
    /// discards the pages already received.
    pub fn fetch_transactions(
        &self,
        access_token: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>, BankError> {
        if start_date > end_date {
            return Err(BankError::Configuration(format!(
                "start date {start_date} is after end date {end_date}"
            )));
        }

        let mut transactions = Vec::new();
        let mut offset: u32 = 0;
        loop {
            let options = TransactionsGetOptions {
                count: PAGE_SIZE,
                offset,
            };
            let page = self
                .api
                .transactions_get(access_token, start_date, end_date, options)?;
            let received = page.transactions.len();
            tracing::debug!(
                offset,
                received,
                total = page.total_transactions,
                "transactions page"
            );

            transactions.extend(page.transactions.into_iter().map(from_plaid));
            offset = offset.saturating_add(u32::try_from(received).unwrap_or(u32::MAX));

            if received == 0 || offset >= page.total_transactions {
                break;
            }
        }

        if transactions.is_empty() {
            return Err(BankError::NoData {
                start_date,
                end_date,
            });
        }
        tracing::info!(count = transactions.len(), "transactions fetched");
        Ok(transactions)
    }

    /// Make one authenticated call and report whether it worked.
    ///
    /// Uses `/item/get` when an access token is available, otherwise an
    /// institution lookup that only needs the client credentials.
    #[must_use]
    pub fn test_connection(&self, access_token: Option<&str>) -> ConnectionReport {
        let outcome = match access_token {
            Some(token) => self.api.item_get(token).map(|resp| ConnectionDetails::Item {
                item_id: resp.item.item_id,
                institution_id: resp.item.institution_id,
                available_products: resp.item.available_products,
                billed_products: resp.item.billed_products,
            }),
            None => self
                .api
                .institutions_get_by_id(DEFAULT_INSTITUTION_ID, COUNTRY_CODES)
                .map(|resp| ConnectionDetails::Institution {
                    institution_id: resp.institution.institution_id,
                    name: resp.institution.name,
                    products: resp.institution.products,
                }),
        }
        .map_err(BankError::from);

        if let Err(err) = &outcome {
            tracing::debug!(error = %err, "connection test failed");
        }

        ConnectionReport {
            environment: self.config.environment,
            outcome,
        }
    }
}
