use std::time::Duration;

use anyhow::{anyhow, Context};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::Sha256;

use crate::config::Credentials;
use crate::models::{FuturesOrder, OrderParams};
use crate::{Error, Result};

pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";
const RECV_WINDOW_MS: u32 = 5000;
const REQUEST_TIMEOUT_SECS: u64 = 30;

type HmacSha256 = Hmac<Sha256>;

/// Client for the Binance USDT-M Futures testnet REST API.
///
/// Stateless between calls; all order state lives on the exchange. Signed
/// endpoints get a millisecond timestamp and an HMAC-SHA256 signature over
/// the query string. Failed calls surface immediately: no retry, no
/// backoff.
#[derive(Clone)]
pub struct BinanceFuturesClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

/// Error payload Binance attaches to rejected calls.
#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    msg: String,
}

#[derive(Debug, Deserialize)]
struct SymbolPrice {
    #[allow(dead_code)]
    symbol: String,
    price: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountSummary {
    total_wallet_balance: String,
}

impl BinanceFuturesClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, TESTNET_BASE_URL)
    }

    /// Construct against a specific base URL (tests point this at a mock
    /// server).
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            credentials,
        })
    }

    /// Construct a client and verify connectivity with a ping.
    pub async fn connect(credentials: Credentials) -> Result<Self> {
        let client = Self::new(credentials)?;
        client.ping().await?;
        tracing::info!("Successfully connected to Binance Futures Testnet");
        Ok(client)
    }

    /// GET /fapi/v1/ping — connectivity probe.
    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}/fapi/v1/ping", self.base_url);
        let response = self.http.get(&url).send().await?;
        let _: serde_json::Value = deserialize(response).await?;
        Ok(())
    }

    /// GET /fapi/v2/account — total wallet balance in USDT.
    pub async fn account_balance(&self) -> Result<f64> {
        let account: AccountSummary = self
            .signed_request(Method::GET, "/fapi/v2/account", Vec::new())
            .await?;
        account
            .total_wallet_balance
            .parse()
            .with_context(|| {
                format!(
                    "unparsable account balance: {}",
                    account.total_wallet_balance
                )
            })
            .map_err(Error::from)
    }

    /// GET /fapi/v1/ticker/price — latest price for one symbol.
    pub async fn symbol_price(&self, symbol: &str) -> Result<f64> {
        let url = format!("{}/fapi/v1/ticker/price?symbol={symbol}", self.base_url);
        let response = self.http.get(&url).send().await?;
        let ticker: SymbolPrice = deserialize(response).await?;
        ticker
            .price
            .parse()
            .with_context(|| format!("unparsable ticker price: {}", ticker.price))
            .map_err(Error::from)
    }

    /// POST /fapi/v1/order — submit one order.
    pub async fn create_order(&self, params: &OrderParams) -> Result<FuturesOrder> {
        self.signed_request(Method::POST, "/fapi/v1/order", params.to_query())
            .await
    }

    /// GET /fapi/v1/openOrders — open orders, optionally for one symbol.
    pub async fn open_orders(&self, symbol: Option<&str>) -> Result<Vec<FuturesOrder>> {
        let mut params = Vec::new();
        if let Some(symbol) = symbol {
            params.push(("symbol", symbol.to_string()));
        }
        self.signed_request(Method::GET, "/fapi/v1/openOrders", params)
            .await
    }

    /// DELETE /fapi/v1/order — cancel one order by id.
    pub async fn cancel_order(&self, symbol: &str, order_id: u64) -> Result<FuturesOrder> {
        self.signed_request(
            Method::DELETE,
            "/fapi/v1/order",
            vec![
                ("symbol", symbol.to_string()),
                ("orderId", order_id.to_string()),
            ],
        )
        .await
    }

    /// DELETE /fapi/v1/allOpenOrders — cancel every open order for a symbol.
    pub async fn cancel_all_orders(&self, symbol: &str) -> Result<()> {
        let ack: ApiError = self
            .signed_request(
                Method::DELETE,
                "/fapi/v1/allOpenOrders",
                vec![("symbol", symbol.to_string())],
            )
            .await?;
        // This endpoint acknowledges with a code/msg body instead of an order.
        if ack.code == 200 {
            Ok(())
        } else {
            Err(Error::Exchange {
                code: ack.code,
                msg: ack.msg,
            })
        }
    }

    /// GET /fapi/v1/order — status of one order.
    pub async fn get_order(&self, symbol: &str, order_id: u64) -> Result<FuturesOrder> {
        self.signed_request(
            Method::GET,
            "/fapi/v1/order",
            vec![
                ("symbol", symbol.to_string()),
                ("orderId", order_id.to_string()),
            ],
        )
        .await
    }

    async fn signed_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T> {
        let query = self.signed_query(params)?;
        let url = format!("{}{}?{}", self.base_url, path, query);

        let response = self
            .http
            .request(method, &url)
            .header("X-MBX-APIKEY", &self.credentials.api_key)
            .send()
            .await?;

        deserialize(response).await
    }

    fn signed_query(&self, mut params: Vec<(&'static str, String)>) -> Result<String> {
        params.push(("recvWindow", RECV_WINDOW_MS.to_string()));
        params.push(("timestamp", Utc::now().timestamp_millis().to_string()));

        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let signature = self.sign(&query)?;
        Ok(format!("{query}&signature={signature}"))
    }

    fn sign(&self, payload: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.credentials.api_secret.as_bytes())
            .map_err(|_| anyhow!("invalid API secret"))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Map a response to a typed payload, turning Binance rejection bodies
/// into `Error::Exchange`.
async fn deserialize<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
            return Err(Error::Exchange {
                code: api_error.code,
                msg: api_error.msg,
            });
        }
        return Err(anyhow!("HTTP {status}: {body}").into());
    }

    serde_json::from_str(&body)
        .with_context(|| format!("unexpected response payload: {body}"))
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> BinanceFuturesClient {
        BinanceFuturesClient::new(Credentials::new("key", "secret")).unwrap()
    }

    #[test]
    fn test_sign_is_deterministic_hex() {
        let client = test_client();
        let first = client.sign("symbol=BTCUSDT&timestamp=1").unwrap();
        let second = client.sign("symbol=BTCUSDT&timestamp=1").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sign_depends_on_secret() {
        let a = test_client().sign("symbol=BTCUSDT").unwrap();
        let b = BinanceFuturesClient::new(Credentials::new("key", "other"))
            .unwrap()
            .sign("symbol=BTCUSDT")
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_signed_query_appends_timestamp_and_signature() {
        let client = test_client();
        let query = client
            .signed_query(vec![("symbol", "BTCUSDT".to_string())])
            .unwrap();

        assert!(query.starts_with("symbol=BTCUSDT&recvWindow=5000&timestamp="));
        assert!(query.contains("&signature="));
    }
}
