/// Configuration resolved from the process environment.
///
/// Built once in `main` and passed by reference to every component.
use std::fmt;
use std::str::FromStr;

use crate::errors::BankError;

pub const CLIENT_ID_VAR: &str = "PLAID_CLIENT_ID";
pub const SECRET_VAR: &str = "PLAID_SECRET";
pub const ENV_VAR: &str = "PLAID_ENV";
pub const ACCESS_TOKEN_VAR: &str = "PLAID_ACCESS_TOKEN";

const DASHBOARD_URL: &str = "https://dashboard.plaid.com/";

/// Plaid environment tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Mock tier with deterministic fake data.
    #[default]
    Sandbox,
    Development,
    Production,
}

impl Environment {
    /// Base URL of the Plaid API for this tier.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.plaid.com",
            Self::Development => "https://development.plaid.com",
            Self::Production => "https://production.plaid.com",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(BankError::Configuration(format!(
                "Invalid {ENV_VAR}: '{other}'. Must be 'sandbox', 'development', or 'production'"
            ))),
        }
    }
}

/// Plaid credentials and target tier.
#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub secret: String,
    pub environment: Environment,
    pub access_token: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Configuration` if the client id or secret is missing
    /// or blank, or `PLAID_ENV` names an unknown tier.
    pub fn from_env() -> Result<Self, BankError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BankError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let client_id = non_blank(CLIENT_ID_VAR).ok_or_else(|| missing(CLIENT_ID_VAR))?;
        let secret = non_blank(SECRET_VAR).ok_or_else(|| missing(SECRET_VAR))?;
        let environment = match non_blank(ENV_VAR) {
            Some(raw) => raw.parse()?,
            None => Environment::default(),
        };
        let access_token = non_blank(ACCESS_TOKEN_VAR);

        Ok(Self {
            client_id,
            secret,
            environment,
            access_token,
        })
    }

    /// The configured access token.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Configuration` when `PLAID_ACCESS_TOKEN` is not set.
    pub fn require_access_token(&self) -> Result<&str, BankError> {
        self.access_token.as_deref().ok_or_else(|| {
            BankError::Configuration(format!(
                "No access token found. Run 'setup' first and set {ACCESS_TOKEN_VAR}"
            ))
        })
    }
}

fn missing(key: &str) -> BankError {
    BankError::Configuration(format!(
        "Missing {key}. Get credentials from {DASHBOARD_URL}"
    ))
}

// Keep credentials out of debug logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("secret", &"***")
            .field("environment", &self.environment)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .finish()
    }
}
