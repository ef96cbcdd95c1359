use clap::Parser;
use futuresbot::api::BinanceFuturesClient;
use futuresbot::config::Credentials;
use futuresbot::error::fail;
use futuresbot::orders::place_market_order;

/// Place a market order on the Binance USDT-M Futures testnet.
#[derive(Parser)]
#[command(name = "market-order")]
struct Args {
    /// Trading symbol, e.g. BTCUSDT
    symbol: String,
    /// Order side: BUY or SELL
    side: String,
    /// Order quantity in the base asset
    quantity: String,
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
    let order = place_market_order(&client, &args.symbol, &args.side, &args.quantity).await?;

    println!("\n✓ Market order placed successfully!");
    println!("Order ID: {}", order.order_id);
    println!("Symbol: {}", order.symbol);
    println!("Side: {}", order.side);
    println!(
        "Quantity: {}",
        order.executed_qty.as_deref().unwrap_or("N/A")
    );
    println!("Status: {}", order.status);

    if let Some(avg_price) = order.avg_price.as_deref() {
        println!("Average Price: {avg_price}");
    }

    Ok(())
}
