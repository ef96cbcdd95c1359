use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side as the exchange spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }

    /// The side that closes a position opened on `self`.
    pub fn opposite(self) -> Self {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subset of Binance futures order types this toolkit places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
    /// Stop-limit: triggers at `stopPrice`, rests at `price`.
    Stop,
    /// Take-profit limit: triggers at `stopPrice`, rests at `price`.
    TakeProfit,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::Stop => "STOP",
            OrderType::TakeProfit => "TAKE_PROFIT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForce {
    Gtc,
    Ioc,
    Fok,
}

impl TimeInForce {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }
}

/// Parameters for one `POST /fapi/v1/order` call.
///
/// Construct through the typed helpers below; they attach price/stopPrice
/// only for the order types that demand them.
#[derive(Debug, Clone)]
pub struct OrderParams {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: f64,
    pub price: Option<f64>,
    pub stop_price: Option<f64>,
    pub time_in_force: Option<TimeInForce>,
    pub reduce_only: bool,
}

impl OrderParams {
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: f64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: None,
            reduce_only: false,
        }
    }

    /// GTC limit order.
    pub fn limit(symbol: impl Into<String>, side: OrderSide, quantity: f64, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            stop_price: None,
            time_in_force: Some(TimeInForce::Gtc),
            reduce_only: false,
        }
    }

    /// GTC stop-limit order: triggers at `stop_price`, rests at `limit_price`.
    pub fn stop_limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: f64,
        stop_price: f64,
        limit_price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Stop,
            quantity,
            price: Some(limit_price),
            stop_price: Some(stop_price),
            time_in_force: Some(TimeInForce::Gtc),
            reduce_only: false,
        }
    }

    /// GTC take-profit order with limit price and trigger both at `price`.
    pub fn take_profit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: f64,
        price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::TakeProfit,
            quantity,
            price: Some(price),
            stop_price: Some(price),
            time_in_force: Some(TimeInForce::Gtc),
            reduce_only: false,
        }
    }

    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    /// Request parameters in wire order, before timestamp and signature.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.as_str().to_string()),
            ("type", self.order_type.as_str().to_string()),
        ];
        if let Some(tif) = self.time_in_force {
            params.push(("timeInForce", tif.as_str().to_string()));
        }
        params.push(("quantity", self.quantity.to_string()));
        if let Some(price) = self.price {
            params.push(("price", price.to_string()));
        }
        if let Some(stop_price) = self.stop_price {
            params.push(("stopPrice", stop_price.to_string()));
        }
        if self.reduce_only {
            params.push(("reduceOnly", "true".to_string()));
        }
        params
    }
}

/// An order as the exchange reports it. Decimal fields arrive as strings
/// on the Binance wire and are kept that way; `fill` parses the pair the
/// strategies care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesOrder {
    pub order_id: u64,
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: String,
    pub status: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub avg_price: Option<String>,
    #[serde(default)]
    pub orig_qty: Option<String>,
    #[serde(default)]
    pub executed_qty: Option<String>,
    #[serde(default)]
    pub stop_price: Option<String>,
    #[serde(default)]
    pub time_in_force: Option<String>,
    #[serde(default)]
    pub reduce_only: Option<bool>,
    #[serde(default)]
    pub update_time: Option<u64>,
}

impl FuturesOrder {
    /// Price column for the order table; market orders carry no resting
    /// price and render as a placeholder.
    pub fn price_label(&self) -> &str {
        match self.price.as_deref() {
            Some(price) if !price.is_empty() => price,
            _ => "MARKET",
        }
    }

    /// Executed quantity and average fill price, when the exchange
    /// reported both and anything actually filled.
    pub fn fill(&self) -> Option<(f64, f64)> {
        let qty: f64 = self.executed_qty.as_deref()?.parse().ok()?;
        let avg_price: f64 = self.avg_price.as_deref()?.parse().ok()?;
        if qty > 0.0 {
            Some((qty, avg_price))
        } else {
            None
        }
    }
}
