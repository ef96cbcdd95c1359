//! Grid trading: a ladder of resting GTC limit orders, buys below the
//! current price and sells above, at evenly spaced levels.

use crate::api::BinanceFuturesClient;
use crate::logging::log_order;
use crate::models::{FuturesOrder, OrderParams, OrderSide};
use crate::validate::{
    validate_positive_integer, validate_price, validate_quantity, validate_symbol,
};
use crate::{Error, Result};

/// Outcome of one grid level. A failed placement does not abort the
/// remaining levels; the caller sees every level's fate.
#[derive(Debug)]
pub enum LevelPlacement {
    Placed {
        price: f64,
        side: OrderSide,
        order: FuturesOrder,
    },
    Failed {
        price: f64,
        side: OrderSide,
        error: Error,
    },
    /// Level exactly at the sampled market price: placed as neither buy
    /// nor sell.
    Skipped { price: f64 },
}

/// Result of a grid setup run.
#[derive(Debug)]
pub struct GridReport {
    /// Market price sampled once before placement began.
    pub current_price: f64,
    /// The full ladder, both bounds included.
    pub levels: Vec<f64>,
    /// One entry per level, in ladder order.
    pub placements: Vec<LevelPlacement>,
}

impl GridReport {
    pub fn buy_orders(&self) -> Vec<&FuturesOrder> {
        self.orders_for(OrderSide::Buy)
    }

    pub fn sell_orders(&self) -> Vec<&FuturesOrder> {
        self.orders_for(OrderSide::Sell)
    }

    pub fn failed_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| matches!(p, LevelPlacement::Failed { .. }))
            .count()
    }

    fn orders_for(&self, wanted: OrderSide) -> Vec<&FuturesOrder> {
        self.placements
            .iter()
            .filter_map(|p| match p {
                LevelPlacement::Placed { side, order, .. } if *side == wanted => Some(order),
                _ => None,
            })
            .collect()
    }
}

/// Evenly spaced price levels from `lower` to `upper` inclusive.
/// Requires `num_grids >= 2`.
pub fn grid_levels(lower: f64, upper: f64, num_grids: u32) -> Vec<f64> {
    let step = (upper - lower) / (num_grids - 1) as f64;
    (0..num_grids).map(|i| lower + i as f64 * step).collect()
}

/// Which side a level trades on relative to the sampled market price.
/// A level exactly at the market price trades on neither side.
pub fn side_for_level(level: f64, current_price: f64) -> Option<OrderSide> {
    if level < current_price {
        Some(OrderSide::Buy)
    } else if level > current_price {
        Some(OrderSide::Sell)
    } else {
        None
    }
}

/// Set up a grid of GTC limit orders between `lower_price` and
/// `upper_price`.
///
/// The market price is sampled once up front; each level is then placed
/// independently, and a rejected level never stops the rest of the
/// ladder. Price may move while later levels are placed; that drift is
/// accepted, not compensated for.
pub async fn setup_grid_strategy(
    client: &BinanceFuturesClient,
    symbol: &str,
    quantity_per_grid: &str,
    lower_price: &str,
    upper_price: &str,
    num_grids: &str,
) -> Result<GridReport> {
    let symbol = validate_symbol(symbol)?;
    let quantity_per_grid = validate_quantity(quantity_per_grid)?;
    let lower_price = validate_price(lower_price, "lower price")?;
    let upper_price = validate_price(upper_price, "upper price")?;
    let num_grids = validate_positive_integer(num_grids, "number of grids")?;

    if upper_price <= lower_price {
        return Err(Error::validation(format!(
            "Upper price ({upper_price}) must be greater than lower price ({lower_price})"
        )));
    }
    if num_grids < 2 {
        return Err(Error::validation(format!(
            "Number of grids must be at least 2, got: {num_grids}"
        )));
    }

    let levels = grid_levels(lower_price, upper_price, num_grids);
    let step = (upper_price - lower_price) / (num_grids - 1) as f64;

    tracing::info!("Setting up grid strategy for {symbol}");
    tracing::info!("  Price range: {lower_price} - {upper_price}");
    tracing::info!("  Grid levels: {num_grids}");
    tracing::info!("  Price step: {step}");
    tracing::info!("  Quantity per grid: {quantity_per_grid}");

    let current_price = client.symbol_price(&symbol).await?;
    tracing::info!("Current market price: {current_price}");

    let mut placements = Vec::with_capacity(levels.len());
    let mut buy_count = 0usize;
    let mut sell_count = 0usize;

    for &level in &levels {
        let Some(side) = side_for_level(level, current_price) else {
            placements.push(LevelPlacement::Skipped { price: level });
            continue;
        };

        let params = OrderParams::limit(&symbol, side, quantity_per_grid, level);
        match client.create_order(&params).await {
            Ok(order) => {
                log_order(
                    "GRID",
                    &symbol,
                    side,
                    quantity_per_grid,
                    Some(level),
                    None,
                    Ok(&order),
                );
                match side {
                    OrderSide::Buy => {
                        buy_count += 1;
                        println!("✓ Buy order {buy_count} placed at {level}");
                    }
                    OrderSide::Sell => {
                        sell_count += 1;
                        println!("✓ Sell order {sell_count} placed at {level}");
                    }
                }
                placements.push(LevelPlacement::Placed {
                    price: level,
                    side,
                    order,
                });
            }
            Err(error) => {
                log_order(
                    "GRID",
                    &symbol,
                    side,
                    quantity_per_grid,
                    Some(level),
                    None,
                    Err(&error),
                );
                println!("✗ Error at price {level}: {error}");
                placements.push(LevelPlacement::Failed {
                    price: level,
                    side,
                    error,
                });
            }
        }
    }

    let report = GridReport {
        current_price,
        levels,
        placements,
    };

    tracing::info!(
        "Grid setup for {symbol} finished: {buy_count} buy orders, {sell_count} sell orders, {} failed",
        report.failed_count()
    );

    Ok(report)
}
