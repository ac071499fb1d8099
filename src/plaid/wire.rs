/// Request and response bodies for the Plaid endpoints this tool calls.
///
/// Field names follow Plaid's JSON exactly. Only the fields the tool reads are
/// declared; serde ignores the rest.
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Credentials embedded in every request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub client_id: &'a str,
    pub secret: &'a str,
}

/// `POST /sandbox/public_token/create`
#[derive(Debug, Serialize)]
pub struct SandboxPublicTokenCreateRequest<'a> {
    #[serde(flatten)]
    pub credentials: Credentials<'a>,
    pub institution_id: &'a str,
    pub initial_products: &'a [&'a str],
}

#[derive(Debug, Clone, Deserialize)]
pub struct SandboxPublicTokenCreateResponse {
    pub public_token: String,
}

/// `POST /item/public_token/exchange`
#[derive(Debug, Serialize)]
pub struct ItemPublicTokenExchangeRequest<'a> {
    #[serde(flatten)]
    pub credentials: Credentials<'a>,
    pub public_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemPublicTokenExchangeResponse {
    pub access_token: String,
    pub item_id: String,
}

/// `POST /transactions/get`
#[derive(Debug, Serialize)]
pub struct TransactionsGetRequest<'a> {
    #[serde(flatten)]
    pub credentials: Credentials<'a>,
    pub access_token: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub options: TransactionsGetOptions,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TransactionsGetOptions {
    pub count: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsGetResponse {
    pub transactions: Vec<PlaidTransaction>,
    pub total_transactions: u32,
}

/// A transaction exactly as Plaid reports it.
///
/// `amount` is positive when money leaves the account.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaidTransaction {
    pub transaction_id: String,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub name: String,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub category: Option<Vec<String>>,
    #[serde(default)]
    pub personal_finance_category: Option<PersonalFinanceCategory>,
    pub pending: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonalFinanceCategory {
    pub primary: String,
}

/// `POST /item/get`
#[derive(Debug, Serialize)]
pub struct ItemGetRequest<'a> {
    #[serde(flatten)]
    pub credentials: Credentials<'a>,
    pub access_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemGetResponse {
    pub item: Item,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub item_id: String,
    #[serde(default)]
    pub institution_id: Option<String>,
    #[serde(default)]
    pub available_products: Vec<String>,
    #[serde(default)]
    pub billed_products: Vec<String>,
}

/// `POST /institutions/get_by_id`
#[derive(Debug, Serialize)]
pub struct InstitutionsGetByIdRequest<'a> {
    #[serde(flatten)]
    pub credentials: Credentials<'a>,
    pub institution_id: &'a str,
    pub country_codes: &'a [&'a str],
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstitutionsGetByIdResponse {
    pub institution: Institution,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Institution {
    pub institution_id: String,
    pub name: String,
    #[serde(default)]
    pub products: Vec<String>,
}

/// Error envelope Plaid returns with every non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error_type: String,
    pub error_code: String,
    pub error_message: String,
    #[serde(default)]
    pub display_message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}
