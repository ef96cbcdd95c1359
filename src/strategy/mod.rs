// Multi-order strategies
pub mod grid;
pub mod oco;
pub mod twap;

pub use grid::{setup_grid_strategy, GridReport, LevelPlacement};
pub use oco::{place_oco_order, OcoReport};
pub use twap::{execute_twap, SliceResult, TwapReport};
