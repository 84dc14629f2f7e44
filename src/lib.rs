//! # CoinGecko Market Data SDK
//!
//! Typed access to the public CoinGecko REST API for market screens:
//! the top coins by market capitalization, a single coin's USD market
//! statistics, and its historical price chart. A money formatter renders
//! the numbers for display.
//!
//! ## Usage
//!
//! ```no_run
//! use coingecko_market_sdk::{format_usd, CancelToken, CoinGeckoClient, LoadState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CoinGeckoClient::from_env()?;
//! let cancel = CancelToken::new();
//!
//! // Home screen
//! let coins = client.market_page(&cancel).await?;
//! for coin in &coins {
//!     println!("{} {}", coin.display_symbol(), format_usd(coin.current_price));
//! }
//!
//! // Detail screen: detail and chart are fetched concurrently
//! let state = LoadState::from_result(client.coin_overview("bitcoin", 7, &cancel).await);
//! if let Some(overview) = state.loaded() {
//!     println!("{} points", overview.chart.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Cancellation
//!
//! Every operation takes a [`CancelToken`]. Calling `cancel()` on any clone
//! aborts the in-flight request and the operation returns
//! [`ApiError::Cancelled`].
//!
//! ## Error Handling
//!
//! ```no_run
//! use coingecko_market_sdk::{CancelToken, CoinGeckoClient, ErrorKind};
//!
//! # async fn example(client: CoinGeckoClient) {
//! match client.coin_detail("bitcoin", &CancelToken::none()).await {
//!     Ok(coin) => println!("BTC: ${:.2}", coin.current_price),
//!     Err(e) if e.kind() == ErrorKind::Shape => {
//!         println!("Incomplete data: {}", e)
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

pub mod cancel;
pub mod client;
pub mod config;
pub mod constants;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod http;
pub mod metrics;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use cancel::CancelToken;
pub use client::CoinGeckoClient;
pub use config::ClientConfig;
pub use endpoints::axis_labels;
pub use error::{ApiError, ErrorKind};
pub use format::{
    format_money, format_money_with_locale, format_percent_change, format_usd, MoneyFormat,
    NumberLocale,
};
pub use metrics::RequestMetrics;
pub use transport::Transport;
pub use types::{ChartPoint, CoinDetail, CoinOverview, CoinSummary, LoadState};
