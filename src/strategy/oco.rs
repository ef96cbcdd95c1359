//! Paired closing orders: a take-profit leg and a stop-loss leg on the
//! opposite side of an existing position.
//!
//! The futures API offers no server-side OCO, so the two legs are
//! submitted independently and are NOT linked on the exchange: filling
//! one does not cancel the other, and both can rest simultaneously.

use crate::api::BinanceFuturesClient;
use crate::logging::log_order;
use crate::models::{FuturesOrder, OrderParams};
use crate::validate::{validate_price, validate_quantity, validate_side, validate_symbol};
use crate::Result;

/// Both legs of a placed OCO pair.
#[derive(Debug)]
pub struct OcoReport {
    pub take_profit: FuturesOrder,
    pub stop_loss: FuturesOrder,
}

/// Place the OCO pair: a reduce-only TAKE_PROFIT at `price` (limit and
/// trigger both at `price`), then a reduce-only STOP triggering at
/// `stop_price` and resting at `stop_limit_price`. Both legs close on
/// the side opposite to `side`, for the same quantity.
///
/// Unlike grid and TWAP there is no per-item tolerance here: a lone
/// unmatched leg is a risk exposure, so either failure propagates
/// immediately and the stop leg is never attempted after a take-profit
/// failure.
pub async fn place_oco_order(
    client: &BinanceFuturesClient,
    symbol: &str,
    side: &str,
    quantity: &str,
    price: &str,
    stop_price: &str,
    stop_limit_price: &str,
) -> Result<OcoReport> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let quantity = validate_quantity(quantity)?;
    let price = validate_price(price, "limit price")?;
    let stop_price = validate_price(stop_price, "stop price")?;
    let stop_limit_price = validate_price(stop_limit_price, "stop limit price")?;

    tracing::info!("Placing OCO order: {side} {quantity} {symbol}");
    tracing::info!("  Take Profit: {price}, Stop Loss: {stop_price}/{stop_limit_price}");

    let close_side = side.opposite();

    let tp_params = OrderParams::take_profit(&symbol, close_side, quantity, price).reduce_only();
    let take_profit = match client.create_order(&tp_params).await {
        Ok(order) => {
            log_order(
                "OCO_TAKE_PROFIT",
                &symbol,
                close_side,
                quantity,
                Some(price),
                Some(price),
                Ok(&order),
            );
            order
        }
        Err(err) => {
            log_order(
                "OCO_TAKE_PROFIT",
                &symbol,
                close_side,
                quantity,
                Some(price),
                Some(price),
                Err(&err),
            );
            return Err(err);
        }
    };

    let stop_params =
        OrderParams::stop_limit(&symbol, close_side, quantity, stop_price, stop_limit_price)
            .reduce_only();
    let stop_loss = match client.create_order(&stop_params).await {
        Ok(order) => {
            log_order(
                "OCO_STOP",
                &symbol,
                close_side,
                quantity,
                Some(stop_limit_price),
                Some(stop_price),
                Ok(&order),
            );
            order
        }
        Err(err) => {
            log_order(
                "OCO_STOP",
                &symbol,
                close_side,
                quantity,
                Some(stop_limit_price),
                Some(stop_price),
                Err(&err),
            );
            return Err(err);
        }
    };

    Ok(OcoReport {
        take_profit,
        stop_loss,
    })
}
