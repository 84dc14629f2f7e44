//! Public records returned by the client

use crate::{constants::GENERIC_ERROR_MESSAGE, error::ApiError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the market page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    /// CoinGecko id, e.g. `bitcoin`
    pub id: String,
    /// Ticker as reported upstream (lowercase)
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Image URL
    pub image: String,
    /// Price in USD
    pub current_price: f64,
    /// 24h price change percentage
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinSummary {
    /// Ticker as displayed (uppercase)
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// True when the 24h change is zero or positive
    pub fn is_gaining(&self) -> bool {
        self.price_change_percentage_24h.unwrap_or(0.0) >= 0.0
    }
}

/// Flat view of one coin with its USD market statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Large image URL
    pub image: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    /// `None` when upstream has no 24h history for the coin
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinDetail {
    /// Ticker as displayed (uppercase)
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// True when the 24h change is zero or positive
    pub fn is_gaining(&self) -> bool {
        self.price_change_percentage_24h.unwrap_or(0.0) >= 0.0
    }
}

/// One sample of a chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Sample time as reported upstream
    pub timestamp: DateTime<Utc>,
    /// Calendar date of the sample, no time component
    pub date: String,
    /// Price in USD
    pub price: f64,
}

/// Detail and chart of one coin, fetched together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinOverview {
    pub detail: CoinDetail,
    pub chart: Vec<ChartPoint>,
}

/// Presentation state owned by the caller
///
/// The client itself is stateless; screens keep one of these per request
/// and move it from `Loading` to `Loaded` or `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    /// Maps a fetch result to the state a screen renders
    ///
    /// Every error collapses into the generic user-facing message; the
    /// detailed error is logged. A cancelled request stays `Loading`
    /// because nobody is left to render it.
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(ApiError::Cancelled) => LoadState::Loading,
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind(), "Fetch failed");
                LoadState::Failed(GENERIC_ERROR_MESSAGE.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The loaded value, if any
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// The user-facing error message, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(change: Option<f64>) -> CoinSummary {
        CoinSummary {
            id: "bitcoin".to_string(),
            symbol: "btc".to_string(),
            name: "Bitcoin".to_string(),
            image: "https://example.com/btc.png".to_string(),
            current_price: 42000.0,
            price_change_percentage_24h: change,
        }
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(summary(None).display_symbol(), "BTC");
        assert!(summary(Some(1.2)).is_gaining());
        assert!(summary(Some(0.0)).is_gaining());
        assert!(!summary(Some(-0.4)).is_gaining());
    }

    #[test]
    fn test_load_state_transitions() {
        let state: LoadState<u32> = LoadState::default();
        assert!(state.is_loading());

        let state = LoadState::from_result(Ok(3));
        assert_eq!(state.loaded(), Some(&3));
        assert_eq!(state.error_message(), None);

        let state: LoadState<u32> = LoadState::from_result(Err(ApiError::Timeout));
        assert_eq!(state.error_message(), Some(GENERIC_ERROR_MESSAGE));

        let state: LoadState<u32> = LoadState::from_result(Err(ApiError::Cancelled));
        assert!(state.is_loading());
    }

    #[test]
    fn test_summary_serializes_with_upstream_names() {
        let json = serde_json::to_value(summary(Some(2.5))).unwrap();
        assert_eq!(json["current_price"], 42000.0);
        assert_eq!(json["price_change_percentage_24h"], 2.5);
    }
}
