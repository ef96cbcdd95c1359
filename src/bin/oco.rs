use clap::Parser;
use futuresbot::api::BinanceFuturesClient;
use futuresbot::config::Credentials;
use futuresbot::error::fail;
use futuresbot::strategy::place_oco_order;

/// Place a take-profit / stop-loss pair closing an existing position.
///
/// The futures API has no server-side OCO: the two legs are independent
/// resting orders and filling one does not cancel the other.
#[derive(Parser)]
#[command(name = "oco")]
struct Args {
    /// Trading symbol, e.g. BTCUSDT
    symbol: String,
    /// Side of the original position: BUY or SELL
    side: String,
    /// Order quantity in the base asset
    quantity: String,
    /// Take-profit price
    take_profit_price: String,
    /// Stop trigger price
    stop_price: String,
    /// Stop limit price once triggered
    stop_limit_price: String,
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
    let report = place_oco_order(
        &client,
        &args.symbol,
        &args.side,
        &args.quantity,
        &args.take_profit_price,
        &args.stop_price,
        &args.stop_limit_price,
    )
    .await?;

    println!("\n✓ OCO orders placed successfully!");

    println!("\nTake Profit Order:");
    println!("  Order ID: {}", report.take_profit.order_id);
    println!("  Price: {}", report.take_profit.price_label());
    println!("  Status: {}", report.take_profit.status);

    println!("\nStop Loss Order:");
    println!("  Order ID: {}", report.stop_loss.order_id);
    println!(
        "  Stop Price: {}",
        report.stop_loss.stop_price.as_deref().unwrap_or("N/A")
    );
    println!("  Limit Price: {}", report.stop_loss.price_label());
    println!("  Status: {}", report.stop_loss.status);

    Ok(())
}
