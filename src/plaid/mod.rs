/// Plaid API layer: wire types, HTTP transport, and the transaction client.
pub mod api;
pub mod client;
pub mod errors;
#[cfg(test)]
pub mod fake;
pub mod wire;

pub use api::{HttpPlaidApi, PlaidApi};
pub use client::{ConnectionDetails, DEFAULT_INSTITUTION_ID, TransactionClient};
pub use errors::PlaidError;
