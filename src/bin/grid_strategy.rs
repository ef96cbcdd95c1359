use clap::Parser;
use futuresbot::api::BinanceFuturesClient;
use futuresbot::config::Credentials;
use futuresbot::error::fail;
use futuresbot::strategy::setup_grid_strategy;

/// Set up a grid of resting limit orders: buys below the current market
/// price, sells above, at evenly spaced levels between the two bounds.
#[derive(Parser)]
#[command(name = "grid-strategy")]
struct Args {
    /// Trading symbol, e.g. BTCUSDT
    symbol: String,
    /// Quantity for each grid level
    quantity_per_grid: String,
    /// Lower bound price
    lower_price: String,
    /// Upper bound price
    upper_price: String,
    /// Number of grid levels (at least 2)
    num_grids: String,
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
    println!("\nSetting up grid strategy for {}...", args.symbol);
    println!("Price range: {} - {}", args.lower_price, args.upper_price);
    println!("Grid levels: {}", args.num_grids);
    println!("Quantity per grid: {}\n", args.quantity_per_grid);

    let client = BinanceFuturesClient::connect(Credentials::from_env()?).await?;
    let report = setup_grid_strategy(
        &client,
        &args.symbol,
        &args.quantity_per_grid,
        &args.lower_price,
        &args.upper_price,
        &args.num_grids,
    )
    .await?;

    let buys = report.buy_orders().len();
    let sells = report.sell_orders().len();

    println!("\n✓ Grid strategy setup completed!");
    println!("Current market price: {}", report.current_price);
    println!("Buy orders placed: {buys}");
    println!("Sell orders placed: {sells}");
    println!("Total orders: {}", buys + sells);

    println!("\nGrid price levels:");
    let step = report.levels[1] - report.levels[0];
    for (i, level) in report.levels.iter().enumerate() {
        let marker = if (level - report.current_price).abs() < step {
            "→"
        } else {
            " "
        };
        println!("  {marker} Level {}: {level:.2}", i + 1);
    }

    Ok(())
}
