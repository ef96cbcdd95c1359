//! Open-order management: listing, cancellation and status queries.
//!
//! Pass-through operations — the symbol is validated when present, the
//! call is forwarded, and the accessor's result or error comes back
//! unmodified.

use crate::api::BinanceFuturesClient;
use crate::models::FuturesOrder;
use crate::validate::validate_symbol;
use crate::Result;

const TABLE_WIDTH: usize = 100;

/// All open orders, optionally filtered to one symbol.
pub async fn open_orders(
    client: &BinanceFuturesClient,
    symbol: Option<&str>,
) -> Result<Vec<FuturesOrder>> {
    match symbol {
        Some(raw) => {
            let symbol = validate_symbol(raw)?;
            let orders = client.open_orders(Some(&symbol)).await?;
            tracing::info!("Retrieved {} open orders for {symbol}", orders.len());
            Ok(orders)
        }
        None => {
            let orders = client.open_orders(None).await?;
            tracing::info!("Retrieved {} open orders", orders.len());
            Ok(orders)
        }
    }
}

/// Cancel one order by id.
pub async fn cancel_order(
    client: &BinanceFuturesClient,
    symbol: &str,
    order_id: u64,
) -> Result<FuturesOrder> {
    let symbol = validate_symbol(symbol)?;
    let cancelled = client.cancel_order(&symbol, order_id).await?;
    tracing::info!("Cancelled order {order_id} for {symbol}");
    Ok(cancelled)
}

/// Cancel every open order for a symbol.
pub async fn cancel_all_orders(client: &BinanceFuturesClient, symbol: &str) -> Result<()> {
    let symbol = validate_symbol(symbol)?;
    client.cancel_all_orders(&symbol).await?;
    tracing::info!("Cancelled all orders for {symbol}");
    Ok(())
}

/// Status of one order.
pub async fn order_status(
    client: &BinanceFuturesClient,
    symbol: &str,
    order_id: u64,
) -> Result<FuturesOrder> {
    let symbol = validate_symbol(symbol)?;
    let order = client.get_order(&symbol, order_id).await?;
    tracing::info!("Retrieved status for order {order_id}");
    Ok(order)
}

/// Render orders as a fixed-width table. Market orders carry no resting
/// price and show `MARKET` in the price column.
pub fn render_order_table(orders: &[FuturesOrder]) -> String {
    if orders.is_empty() {
        return "No orders found.".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("\nTotal Orders: {}\n", orders.len()));
    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{:<15} {:<10} {:<6} {:<10} {:<12} {:<12} {:<10}\n",
        "ID", "Symbol", "Side", "Type", "Quantity", "Price", "Status"
    ));
    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push('\n');

    for order in orders {
        out.push_str(&format!(
            "{:<15} {:<10} {:<6} {:<10} {:<12} {:<12} {:<10}\n",
            order.order_id,
            order.symbol,
            order.side.as_str(),
            order.order_type,
            order.orig_qty.as_deref().unwrap_or("N/A"),
            order.price_label(),
            order.status
        ));
    }

    out
}
