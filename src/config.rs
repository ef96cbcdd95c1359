use crate::Result;
use anyhow::anyhow;

const API_KEY_VAR: &str = "BINANCE_API_KEY";
const API_SECRET_VAR: &str = "BINANCE_API_SECRET";

/// Testnet API credentials.
///
/// The environment is read once at the CLI boundary; everything past
/// `from_env` works with this struct.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Load credentials from `BINANCE_API_KEY` / `BINANCE_API_SECRET`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).ok();
        let api_secret = std::env::var(API_SECRET_VAR).ok();

        match (api_key, api_secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Ok(Self::new(key, secret))
            }
            _ => Err(anyhow!(
                "Missing API credentials. Set {API_KEY_VAR} and {API_SECRET_VAR} environment variables."
            )
            .into()),
        }
    }
}
