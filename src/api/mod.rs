// Exchange API client
pub mod binance;

pub use binance::BinanceFuturesClient;
