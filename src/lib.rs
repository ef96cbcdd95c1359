// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod models;
pub mod orders;
pub mod strategy;
pub mod validate;

// Re-export commonly used types
pub use api::BinanceFuturesClient;
pub use error::{Error, Result};
pub use models::*;
