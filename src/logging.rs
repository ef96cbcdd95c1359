use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::models::{FuturesOrder, OrderSide};
use crate::{Error, Result};

const LOG_FILE: &str = "bot.log";

/// Install the process-wide subscriber: `bot.log` at DEBUG, console at
/// INFO (overridable via `RUST_LOG`). Called once per binary, before any
/// other work.
pub fn init() -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("failed to open {LOG_FILE}"))?;

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(file))
        .with_filter(LevelFilter::DEBUG);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stdout)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        );

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| Error::from(anyhow!("failed to initialise logging: {e}")))?;

    Ok(())
}

/// Emit one structured line per order attempt, success or failure.
pub fn log_order(
    order_type: &str,
    symbol: &str,
    side: OrderSide,
    quantity: f64,
    price: Option<f64>,
    stop_price: Option<f64>,
    outcome: std::result::Result<&FuturesOrder, &Error>,
) {
    let mut msg = format!(
        "Order Type: {order_type} | Symbol: {symbol} | Side: {side} | Quantity: {quantity}"
    );

    if let Some(price) = price {
        msg.push_str(&format!(" | Price: {price}"));
    }
    if let Some(stop_price) = stop_price {
        msg.push_str(&format!(" | Stop Price: {stop_price}"));
    }

    match outcome {
        Ok(order) => {
            tracing::info!(
                "{msg} | Status: {} | Order ID: {}",
                order.status,
                order.order_id
            );
        }
        Err(err) => {
            tracing::error!("{msg} | Status: FAILED | Error: {err}");
        }
    }
}
