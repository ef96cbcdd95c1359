use clap::{Parser, Subcommand};
use futuresbot::api::BinanceFuturesClient;
use futuresbot::config::Credentials;
use futuresbot::error::fail;
use futuresbot::manager;

/// View and cancel open orders on the Binance USDT-M Futures testnet.
#[derive(Parser)]
#[command(name = "order-manager")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List open orders, optionally for one symbol
    List { symbol: Option<String> },
    /// Cancel a specific order
    Cancel { symbol: String, order_id: u64 },
    /// Cancel all open orders for a symbol
    CancelAll { symbol: String },
    /// Show the status of a specific order
    Status { symbol: String, order_id: u64 },
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

    match args.command {
        Command::List { symbol } => {
            let orders = manager::open_orders(&client, symbol.as_deref()).await?;
            println!("{}", manager::render_order_table(&orders));
        }
        Command::Cancel { symbol, order_id } => {
            manager::cancel_order(&client, &symbol, order_id).await?;
            println!("✓ Order {order_id} cancelled successfully");
        }
        Command::CancelAll { symbol } => {
            manager::cancel_all_orders(&client, &symbol).await?;
            println!(
                "✓ All orders for {} cancelled successfully",
                symbol.to_uppercase()
            );
        }
        Command::Status { symbol, order_id } => {
            let order = manager::order_status(&client, &symbol, order_id).await?;

            println!("\nOrder Details:");
            println!("  Order ID: {}", order.order_id);
            println!("  Symbol: {}", order.symbol);
            println!("  Side: {}", order.side);
            println!("  Type: {}", order.order_type);
            println!("  Status: {}", order.status);
            println!(
                "  Original Qty: {}",
                order.orig_qty.as_deref().unwrap_or("N/A")
            );
            println!(
                "  Executed Qty: {}",
                order.executed_qty.as_deref().unwrap_or("N/A")
            );
            println!("  Price: {}", order.price_label());
            if let Some(stop_price) = order.stop_price.as_deref() {
                println!("  Stop Price: {stop_price}");
            }
        }
    }

    Ok(())
}
