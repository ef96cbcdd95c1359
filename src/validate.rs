//! Input validation for the CLI binaries.
//!
//! All validators are pure and run before any network call.

use crate::models::OrderSide;
use crate::{Error, Result};

/// Validate a trading symbol and return it uppercased.
///
/// Accepts `[A-Z0-9]+` ending in `USDT` (USDT-M futures).
pub fn validate_symbol(symbol: &str) -> Result<String> {
    if symbol.trim().is_empty() {
        return Err(Error::validation("Symbol must be a non-empty string"));
    }

    let symbol = symbol.trim().to_uppercase();

    if !symbol
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(Error::validation(format!("Invalid symbol format: {symbol}")));
    }

    if !symbol.ends_with("USDT") {
        return Err(Error::validation(format!(
            "Symbol should end with USDT for USDT-M Futures: {symbol}"
        )));
    }

    Ok(symbol)
}

/// Validate an order side (`BUY` or `SELL`, case-insensitive).
pub fn validate_side(side: &str) -> Result<OrderSide> {
    if side.trim().is_empty() {
        return Err(Error::validation("Side must be a non-empty string"));
    }

    match side.trim().to_uppercase().as_str() {
        "BUY" => Ok(OrderSide::Buy),
        "SELL" => Ok(OrderSide::Sell),
        other => Err(Error::validation(format!(
            "Side must be BUY or SELL, got: {other}"
        ))),
    }
}

/// Validate an order quantity: parseable and strictly positive.
pub fn validate_quantity(quantity: &str) -> Result<f64> {
    let qty: f64 = quantity
        .trim()
        .parse()
        .map_err(|_| Error::validation(format!("Quantity must be a number, got: {quantity}")))?;

    if !qty.is_finite() || qty <= 0.0 {
        return Err(Error::validation(format!(
            "Quantity must be greater than 0, got: {qty}"
        )));
    }

    Ok(qty)
}

/// Validate a price value; `label` names the field in error messages
/// ("limit price", "stop price", ...).
pub fn validate_price(price: &str, label: &str) -> Result<f64> {
    let value: f64 = price.trim().parse().map_err(|_| {
        Error::validation(format!("{} must be a number, got: {price}", capitalize(label)))
    })?;

    if !value.is_finite() || value <= 0.0 {
        return Err(Error::validation(format!(
            "{} must be greater than 0, got: {value}",
            capitalize(label)
        )));
    }

    Ok(value)
}

/// Validate a strictly positive integer; `label` names the field in error
/// messages.
pub fn validate_positive_integer(value: &str, label: &str) -> Result<u32> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| Error::validation(format!("{label} must be an integer, got: {value}")))?;

    if parsed <= 0 {
        return Err(Error::validation(format!(
            "{label} must be greater than 0, got: {parsed}"
        )));
    }

    u32::try_from(parsed)
        .map_err(|_| Error::validation(format!("{label} is too large: {parsed}")))
}

/// Check the stop/limit price relationship for a stop-limit order.
///
/// A buy-stop triggers at or above its limit so it chases price upward;
/// a sell-stop triggers at or below so it chases price downward.
pub fn validate_stop_limit_prices(stop_price: f64, limit_price: f64, side: OrderSide) -> Result<()> {
    match side {
        OrderSide::Buy if stop_price < limit_price => Err(Error::validation(format!(
            "For BUY stop-limit: stop price ({stop_price}) should be >= limit price ({limit_price})"
        ))),
        OrderSide::Sell if stop_price > limit_price => Err(Error::validation(format!(
            "For SELL stop-limit: stop price ({stop_price}) should be <= limit price ({limit_price})"
        ))),
        _ => Ok(()),
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
