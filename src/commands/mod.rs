// Commands module - HTTP handlers and the data types behind them
pub mod automation;
pub mod champion_data;
pub mod types;

pub use automation::*;
