use clap::Parser;
use futuresbot::api::BinanceFuturesClient;
use futuresbot::config::Credentials;
use futuresbot::error::fail;
use futuresbot::strategy::execute_twap;

/// Execute a TWAP: split a total quantity into equal market-order slices
/// spread evenly over time.
#[derive(Parser)]
#[command(name = "twap")]
struct Args {
    /// Trading symbol, e.g. BTCUSDT
    symbol: String,
    /// Order side: BUY or SELL
    side: String,
    /// Total quantity to trade
    total_quantity: String,
    /// Number of orders to split into
    num_orders: String,
    /// Seconds between consecutive orders
    interval_seconds: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Err(e) = futuresbot::logging::init() {
        fail(e);
    }

    // Already-executed slices are not rolled back on interrupt.
    tokio::select! {
        result = run(args) => {
            if let Err(e) = result {
                fail(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("TWAP execution interrupted by user");
            println!("\n\n✗ TWAP execution interrupted by user");
            std::process::exit(1);
        }
    }
}

async fn run(args: Args) -> futuresbot::Result<()> {
    println!("\nStarting TWAP execution...");
    println!("Total quantity: {} {}", args.total_quantity, args.symbol);
    println!("Split into: {} orders", args.num_orders);
    println!("Interval: {} seconds\n", args.interval_seconds);

    let client = BinanceFuturesClient::connect(Credentials::from_env()?).await?;
    let report = execute_twap(
        &client,
        &args.symbol,
        &args.side,
        &args.total_quantity,
        &args.num_orders,
        &args.interval_seconds,
    )
    .await?;

    println!("\n✓ TWAP execution completed!");
    println!(
        "Successfully executed: {}/{} orders",
        report.executed_count(),
        report.slices.len()
    );

    if let Some(avg_price) = report.average_fill_price() {
        println!("Average execution price: {avg_price:.2}");
    }

    Ok(())
}
