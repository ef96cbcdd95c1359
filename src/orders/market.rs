use crate::api::BinanceFuturesClient;
use crate::logging::log_order;
use crate::models::{FuturesOrder, OrderParams};
use crate::validate::{validate_quantity, validate_side, validate_symbol};
use crate::Result;

/// Place a market order on the futures testnet.
///
/// Validates inputs, submits one order, logs the outcome and returns the
/// raw response. Submission failures are logged with full order context
/// and propagated unchanged.
pub async fn place_market_order(
    client: &BinanceFuturesClient,
    symbol: &str,
    side: &str,
    quantity: &str,
) -> Result<FuturesOrder> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let quantity = validate_quantity(quantity)?;

    tracing::info!("Placing market order: {side} {quantity} {symbol}");

    let params = OrderParams::market(&symbol, side, quantity);
    match client.create_order(&params).await {
        Ok(order) => {
            log_order("MARKET", &symbol, side, quantity, None, None, Ok(&order));
            Ok(order)
        }
        Err(err) => {
            log_order("MARKET", &symbol, side, quantity, None, None, Err(&err));
            Err(err)
        }
    }
}
