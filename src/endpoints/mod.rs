//! CoinGecko endpoint operations
//!
//! Each module adds its operation to [`crate::CoinGeckoClient`] and keeps
//! the raw upstream shapes private; only projected records leave it.

pub mod chart;
pub mod coin;
pub mod markets;

pub use chart::axis_labels;
