use clap::Parser;
use futuresbot::api::BinanceFuturesClient;
use futuresbot::config::Credentials;
use futuresbot::error::fail;
use futuresbot::orders::place_stop_limit_order;

/// Place a stop-limit order on the Binance USDT-M Futures testnet.
///
/// For BUY the stop price must be >= the limit price; for SELL it must
/// be <= the limit price.
#[derive(Parser)]
#[command(name = "stop-limit")]
struct Args {
    /// Trading symbol, e.g. BTCUSDT
    symbol: String,
    /// Order side: BUY or SELL
    side: String,
    /// Order quantity in the base asset
    quantity: String,
    /// Stop trigger price
    stop_price: String,
    /// Limit price once triggered
    limit_price: String,
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
    let order = place_stop_limit_order(
        &client,
        &args.symbol,
        &args.side,
        &args.quantity,
        &args.stop_price,
        &args.limit_price,
    )
    .await?;

    println!("\n✓ Stop-limit order placed successfully!");
    println!("Order ID: {}", order.order_id);
    println!("Symbol: {}", order.symbol);
    println!("Side: {}", order.side);
    println!("Quantity: {}", order.orig_qty.as_deref().unwrap_or("N/A"));
    println!(
        "Stop Price: {}",
        order.stop_price.as_deref().unwrap_or("N/A")
    );
    println!("Limit Price: {}", order.price_label());
    println!("Status: {}", order.status);

    Ok(())
}
