use clap::Parser;
use futuresbot::api::BinanceFuturesClient;
use futuresbot::config::Credentials;
use futuresbot::error::fail;
use futuresbot::orders::place_limit_order;

/// Place a GTC limit order on the Binance USDT-M Futures testnet.
#[derive(Parser)]
#[command(name = "limit-order")]
struct Args {
    /// Trading symbol, e.g. BTCUSDT
    symbol: String,
    /// Order side: BUY or SELL
    side: String,
    /// Order quantity in the base asset
    quantity: String,
    /// Limit price
    price: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Err(e) = futuresbot::logging::init() {
        fail(e);
    }

    if let Err(e) = run(args).await {
        fail(e);
    }
}

async fn run(args: Args) -> futuresbot::Result<()> {
    let client = BinanceFuturesClient::connect(Credentials::from_env()?).await?;
    let order = place_limit_order(
        &client,
        &args.symbol,
        &args.side,
        &args.quantity,
        &args.price,
    )
    .await?;

    println!("\n✓ Limit order placed successfully!");
    println!("Order ID: {}", order.order_id);
    println!("Symbol: {}", order.symbol);
    println!("Side: {}", order.side);
    println!("Quantity: {}", order.orig_qty.as_deref().unwrap_or("N/A"));
    println!("Price: {}", order.price_label());
    println!("Status: {}", order.status);

    Ok(())
}
