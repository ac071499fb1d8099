/// Raw Plaid endpoints: the `PlaidApi` seam and its blocking HTTP implementation.
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::errors::PlaidError;
use super::wire::{
    Credentials, ErrorEnvelope, InstitutionsGetByIdRequest, InstitutionsGetByIdResponse,
    ItemGetRequest, ItemGetResponse, ItemPublicTokenExchangeRequest,
    ItemPublicTokenExchangeResponse, SandboxPublicTokenCreateRequest,
    SandboxPublicTokenCreateResponse, TransactionsGetOptions, TransactionsGetRequest,
    TransactionsGetResponse,
};
use crate::config::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PLAID_VERSION: &str = "2020-09-14";
/// Longest slice of a non-JSON error body kept in the error message.
const RAW_BODY_LIMIT: usize = 200;

/// One method per Plaid endpoint. Each call is a single blocking request.
pub trait PlaidApi {
    /// `POST /sandbox/public_token/create`
    ///
    /// # Errors
    ///
    /// Returns `PlaidError` on any non-success response or transport failure.
    fn sandbox_public_token_create(
        &self,
        institution_id: &str,
        initial_products: &[&str],
    ) -> Result<SandboxPublicTokenCreateResponse, PlaidError>;

    /// `POST /item/public_token/exchange`
    ///
    /// # Errors
    ///
    /// Returns `PlaidError` on any non-success response or transport failure.
    fn item_public_token_exchange(
        &self,
        public_token: &str,
    ) -> Result<ItemPublicTokenExchangeResponse, PlaidError>;

    /// `POST /transactions/get`, one page.
    ///
    /// # Errors
    ///
    /// Returns `PlaidError` on any non-success response or transport failure.
    fn transactions_get(
        &self,
        access_token: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        options: TransactionsGetOptions,
    ) -> Result<TransactionsGetResponse, PlaidError>;

    /// `POST /item/get`
    ///
    /// # Errors
    ///
    /// Returns `PlaidError` on any non-success response or transport failure.
    fn item_get(&self, access_token: &str) -> Result<ItemGetResponse, PlaidError>;

    /// `POST /institutions/get_by_id`
    ///
    /// # Errors
    ///
    /// Returns `PlaidError` on any non-success response or transport failure.
    fn institutions_get_by_id(
        &self,
        institution_id: &str,
        country_codes: &[&str],
    ) -> Result<InstitutionsGetByIdResponse, PlaidError>;
}

/// `PlaidApi` over HTTPS with `reqwest`'s blocking client.
pub struct HttpPlaidApi {
    http: Client,
    base_url: String,
    client_id: String,
    secret: String,
}

impl HttpPlaidApi {
    /// Build a client for the configured environment.
    ///
    /// # Errors
    ///
    /// Returns `PlaidError::Network` if the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> Result<Self, PlaidError> {
        Self::with_base_url(config, config.environment.base_url())
    }

    /// Build a client that sends every request to `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `PlaidError::Network` if the TLS backend cannot be initialised.
    pub fn with_base_url(
        config: &Config,
        base_url: impl Into<String>,
    ) -> Result<Self, PlaidError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            client_id: config.client_id.clone(),
            secret: config.secret.clone(),
        })
    }

    fn credentials(&self) -> Credentials<'_> {
        Credentials {
            client_id: &self.client_id,
            secret: &self.secret,
        }
    }

    fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, PlaidError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}{endpoint}", self.base_url);
        tracing::debug!(%url, "POST");

        let response = self
            .http
            .post(&url)
            .header("Plaid-Version", PLAID_VERSION)
            .json(body)
            .send()?;
        let status = response.status();
        let bytes = response.bytes()?;
        tracing::debug!(endpoint, status = status.as_u16(), bytes = bytes.len(), "response");

        decode(endpoint, status, &bytes)
    }
}

/// Turn a Plaid response into the expected body or a `PlaidError`.
fn decode<R: DeserializeOwned>(
    endpoint: &str,
    status: StatusCode,
    bytes: &[u8],
) -> Result<R, PlaidError> {
    if status.is_success() {
        return serde_json::from_slice(bytes)
            .map_err(|e| PlaidError::invalid_response(endpoint, &e.to_string()));
    }

    Err(match serde_json::from_slice::<ErrorEnvelope>(bytes) {
        Ok(envelope) => {
            tracing::debug!(
                endpoint,
                error_code = %envelope.error_code,
                request_id = ?envelope.request_id,
                "plaid error"
            );
            PlaidError::Api {
                error_type: envelope.error_type,
                error_code: envelope.error_code,
                error_message: envelope.error_message,
                display_message: envelope.display_message,
                request_id: envelope.request_id,
            }
        }
        // Proxies and load balancers answer with HTML or plain text.
        Err(_) => {
            let raw = String::from_utf8_lossy(bytes);
            let snippet: String = raw.chars().take(RAW_BODY_LIMIT).collect();
            PlaidError::Api {
                error_type: "API_ERROR".to_owned(),
                error_code: format!("HTTP_{}", status.as_u16()),
                error_message: if snippet.trim().is_empty() {
                    status.to_string()
                } else {
                    snippet.trim().to_owned()
                },
                display_message: None,
                request_id: None,
            }
        }
    })
}

impl PlaidApi for HttpPlaidApi {
    fn sandbox_public_token_create(
        &self,
        institution_id: &str,
        initial_products: &[&str],
    ) -> Result<SandboxPublicTokenCreateResponse, PlaidError> {
        let body = SandboxPublicTokenCreateRequest {
            credentials: self.credentials(),
            institution_id,
            initial_products,
        };
        self.post("/sandbox/public_token/create", &body)
    }

    fn item_public_token_exchange(
        &self,
        public_token: &str,
    ) -> Result<ItemPublicTokenExchangeResponse, PlaidError> {
        let body = ItemPublicTokenExchangeRequest {
            credentials: self.credentials(),
            public_token,
        };
        self.post("/item/public_token/exchange", &body)
    }

    fn transactions_get(
        &self,
        access_token: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        options: TransactionsGetOptions,
    ) -> Result<TransactionsGetResponse, PlaidError> {
        let body = TransactionsGetRequest {
            credentials: self.credentials(),
            access_token,
            start_date,
            end_date,
            options,
        };
        self.post("/transactions/get", &body)
    }

    fn item_get(&self, access_token: &str) -> Result<ItemGetResponse, PlaidError> {
        let body = ItemGetRequest {
            credentials: self.credentials(),
            access_token,
        };
        self.post("/item/get", &body)
    }

    fn institutions_get_by_id(
        &self,
        institution_id: &str,
        country_codes: &[&str],
    ) -> Result<InstitutionsGetByIdResponse, PlaidError> {
        let body = InstitutionsGetByIdRequest {
            credentials: self.credentials(),
            institution_id,
            country_codes,
        };
        self.post("/institutions/get_by_id", &body)
    }
}
