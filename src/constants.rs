//! Constants for the CoinGecko market data client
//!
//! Defaults for everything the client sends upstream live here. Runtime
//! overrides go through [`crate::config::ClientConfig`].

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Endpoint for the ranked market page
pub const MARKETS_ENDPOINT: &str = "/coins/markets";

/// Endpoint prefix for coin detail (`/coins/{id}`) and chart
/// (`/coins/{id}/market_chart`) requests
pub const COINS_ENDPOINT: &str = "/coins";

/// Suffix of the historical chart endpoint
pub const MARKET_CHART_SUFFIX: &str = "/market_chart";

/// Quote currency for every price-bearing field
pub const VS_CURRENCY: &str = "usd";

/// Ordering of the market page
pub const MARKET_ORDER: &str = "market_cap_desc";

/// Number of coins in the market page
pub const MARKET_PAGE_SIZE: u32 = 20;

/// Page of the ranking that is requested
pub const MARKET_PAGE: u32 = 1;

/// Sampling interval of chart series
pub const CHART_INTERVAL: &str = "daily";

/// Day window used when the caller doesn't pick one
pub const DEFAULT_CHART_DAYS: u32 = 7;

/// HTTP request timeout (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Calendar date pattern for chart points (`chrono` strftime syntax)
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Message shown to users when any fetch fails
pub const GENERIC_ERROR_MESSAGE: &str = "Error fetching coins! Try in a few minutes.";

/// User agent for HTTP requests
pub const USER_AGENT: &str = "coingecko-market-sdk/0.1.0";
