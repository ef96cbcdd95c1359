//! Time-weighted average price execution: a total quantity split into
//! equal market-order slices spread evenly over time.

use tokio::time::{sleep, Duration};

use crate::api::BinanceFuturesClient;
use crate::logging::log_order;
use crate::models::{FuturesOrder, OrderParams, OrderSide};
use crate::validate::{validate_positive_integer, validate_quantity, validate_side, validate_symbol};
use crate::{Error, Result};

/// Outcome of one TWAP slice.
#[derive(Debug)]
pub enum SliceResult {
    Executed(FuturesOrder),
    Failed(Error),
}

/// Result of a TWAP run. Slices appear in execution order; a failed
/// slice never stops the ones after it.
#[derive(Debug)]
pub struct TwapReport {
    pub symbol: String,
    pub side: OrderSide,
    pub total_quantity: f64,
    pub slice_quantity: f64,
    pub slices: Vec<SliceResult>,
}

impl TwapReport {
    pub fn executed_orders(&self) -> Vec<&FuturesOrder> {
        self.slices
            .iter()
            .filter_map(|s| match s {
                SliceResult::Executed(order) => Some(order),
                SliceResult::Failed(_) => None,
            })
            .collect()
    }

    pub fn executed_count(&self) -> usize {
        self.executed_orders().len()
    }

    /// Quantity-weighted mean of the slice fill prices, over slices that
    /// reported both an executed quantity and an average price.
    pub fn average_fill_price(&self) -> Option<f64> {
        let mut total_qty = 0.0;
        let mut total_cost = 0.0;

        for order in self.executed_orders() {
            if let Some((qty, price)) = order.fill() {
                total_qty += qty;
                total_cost += qty * price;
            }
        }

        (total_qty > 0.0).then(|| total_cost / total_qty)
    }
}

/// Quantity of each slice: the total split evenly across `num_orders`.
pub fn slice_quantity(total_quantity: f64, num_orders: u32) -> f64 {
    total_quantity / num_orders as f64
}

/// Execute a TWAP: `num_orders` market orders of equal size, paced
/// `interval_seconds` apart (no pause after the last slice).
///
/// Per-slice failures are collected and the loop continues; only
/// failures outside the loop (validation, client construction) abort the
/// run. Already-executed slices are never rolled back.
pub async fn execute_twap(
    client: &BinanceFuturesClient,
    symbol: &str,
    side: &str,
    total_quantity: &str,
    num_orders: &str,
    interval_seconds: &str,
) -> Result<TwapReport> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let total_quantity = validate_quantity(total_quantity)?;
    let num_orders = validate_positive_integer(num_orders, "number of orders")?;
    let interval_seconds = validate_positive_integer(interval_seconds, "interval seconds")?;

    let quantity_per_order = slice_quantity(total_quantity, num_orders);

    tracing::info!("Starting TWAP strategy: {side} {total_quantity} {symbol}");
    tracing::info!("  Split into {num_orders} orders of {quantity_per_order} each");
    tracing::info!("  Interval: {interval_seconds} seconds");

    let mut slices = Vec::with_capacity(num_orders as usize);

    for i in 0..num_orders {
        let params = OrderParams::market(&symbol, side, quantity_per_order);
        match client.create_order(&params).await {
            Ok(order) => {
                log_order(
                    "TWAP",
                    &symbol,
                    side,
                    quantity_per_order,
                    None,
                    None,
                    Ok(&order),
                );
                println!(
                    "✓ Order {}/{num_orders} executed - ID: {}",
                    i + 1,
                    order.order_id
                );
                slices.push(SliceResult::Executed(order));
            }
            Err(error) => {
                log_order(
                    "TWAP",
                    &symbol,
                    side,
                    quantity_per_order,
                    None,
                    None,
                    Err(&error),
                );
                println!("✗ Error on order {}/{num_orders}: {error}", i + 1);
                slices.push(SliceResult::Failed(error));
            }
        }

        if i < num_orders - 1 {
            tracing::info!("Waiting {interval_seconds} seconds before next order...");
            println!("  Waiting {interval_seconds} seconds...");
            sleep(Duration::from_secs(interval_seconds as u64)).await;
        }
    }

    let report = TwapReport {
        symbol: symbol.clone(),
        side,
        total_quantity,
        slice_quantity: quantity_per_order,
        slices,
    };

    tracing::info!(
        "TWAP for {symbol} finished: {}/{num_orders} orders executed",
        report.executed_count()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(order_id: u64, executed_qty: &str, avg_price: &str) -> FuturesOrder {
        FuturesOrder {
            order_id,
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Buy,
            order_type: "MARKET".to_string(),
            status: "FILLED".to_string(),
            price: None,
            avg_price: Some(avg_price.to_string()),
            orig_qty: Some(executed_qty.to_string()),
            executed_qty: Some(executed_qty.to_string()),
            stop_price: None,
            time_in_force: None,
            reduce_only: None,
            update_time: None,
        }
    }

    fn report(slices: Vec<SliceResult>) -> TwapReport {
        TwapReport {
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Buy,
            total_quantity: 0.1,
            slice_quantity: 0.05,
            slices,
        }
    }

    #[test]
    fn test_slice_quantities_sum_to_total() {
        for num_orders in [1u32, 3, 7, 10] {
            let total = 0.1;
            let slice = slice_quantity(total, num_orders);
            let sum: f64 = (0..num_orders).map(|_| slice).sum();
            assert!((sum - total).abs() < 1e-9);
        }
    }

    #[test]
    fn test_average_fill_price_quantity_weighted() {
        let report = report(vec![
            SliceResult::Executed(filled(1, "0.01", "45000")),
            SliceResult::Executed(filled(2, "0.03", "46000")),
        ]);
        // (0.01*45000 + 0.03*46000) / 0.04 = 45750
        let avg = report.average_fill_price().unwrap();
        assert!((avg - 45750.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_fill_price_skips_unreported_slices() {
        let mut no_fill = filled(3, "0", "0");
        no_fill.avg_price = None;

        let report = report(vec![
            SliceResult::Executed(filled(1, "0.01", "45000")),
            SliceResult::Executed(no_fill),
            SliceResult::Failed(Error::validation("rejected")),
        ]);
        assert_eq!(report.executed_count(), 2);
        assert_eq!(report.average_fill_price(), Some(45000.0));
    }

    #[test]
    fn test_average_fill_price_none_without_fills() {
        let report = report(vec![SliceResult::Failed(Error::validation("rejected"))]);
        assert!(report.average_fill_price().is_none());
    }
}
