use crate::api::BinanceFuturesClient;
use crate::logging::log_order;
use crate::models::{FuturesOrder, OrderParams};
use crate::validate::{
    validate_price, validate_quantity, validate_side, validate_stop_limit_prices, validate_symbol,
};
use crate::Result;

/// Place a GTC stop-limit order: triggers at `stop_price`, rests at
/// `limit_price`. The stop/limit relationship is checked per side before
/// anything goes on the wire.
pub async fn place_stop_limit_order(
    client: &BinanceFuturesClient,
    symbol: &str,
    side: &str,
    quantity: &str,
    stop_price: &str,
    limit_price: &str,
) -> Result<FuturesOrder> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let quantity = validate_quantity(quantity)?;
    let stop_price = validate_price(stop_price, "stop price")?;
    let limit_price = validate_price(limit_price, "limit price")?;
    validate_stop_limit_prices(stop_price, limit_price, side)?;

    tracing::info!(
        "Placing stop-limit order: {side} {quantity} {symbol} @ stop={stop_price}, limit={limit_price}"
    );

    let params = OrderParams::stop_limit(&symbol, side, quantity, stop_price, limit_price);
    match client.create_order(&params).await {
        Ok(order) => {
            log_order(
                "STOP_LIMIT",
                &symbol,
                side,
                quantity,
                Some(limit_price),
                Some(stop_price),
                Ok(&order),
            );
            Ok(order)
        }
        Err(err) => {
            log_order(
                "STOP_LIMIT",
                &symbol,
                side,
                quantity,
                Some(limit_price),
                Some(stop_price),
                Err(&err),
            );
            Err(err)
        }
    }
}
