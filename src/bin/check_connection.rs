use futuresbot::api::BinanceFuturesClient;
use futuresbot::config::Credentials;
use futuresbot::error::fail;

/// Verify testnet connectivity and credentials by fetching the account
/// balance.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = futuresbot::logging::init() {
        fail(e);
    }

    println!("Testing Binance Futures Testnet connection...");

    match run().await {
        Ok(balance) => {
            println!("✓ Connection successful!");
            println!("Account balance: {balance} USDT");
        }
        Err(e) => {
            println!("✗ Connection failed. Check your API credentials and network.");
            fail(e);
        }
    }
}

async fn run() -> futuresbot::Result<f64> {
    let client = BinanceFuturesClient::connect(Credentials::from_env()?).await?;
    client.account_balance().await
}
