use crate::api::BinanceFuturesClient;
use crate::logging::log_order;
use crate::models::{FuturesOrder, OrderParams};
use crate::validate::{validate_price, validate_quantity, validate_side, validate_symbol};
use crate::Result;

/// Place a GTC limit order on the futures testnet.
pub async fn place_limit_order(
    client: &BinanceFuturesClient,
    symbol: &str,
    side: &str,
    quantity: &str,
    price: &str,
) -> Result<FuturesOrder> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let quantity = validate_quantity(quantity)?;
    let price = validate_price(price, "limit price")?;

    tracing::info!("Placing limit order: {side} {quantity} {symbol} @ {price}");

    let params = OrderParams::limit(&symbol, side, quantity, price);
    match client.create_order(&params).await {
        Ok(order) => {
            log_order("LIMIT", &symbol, side, quantity, Some(price), None, Ok(&order));
            Ok(order)
        }
        Err(err) => {
            log_order("LIMIT", &symbol, side, quantity, Some(price), None, Err(&err));
            Err(err)
        }
    }
}
