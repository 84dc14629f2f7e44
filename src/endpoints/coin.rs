//! Single coin detail (`/coins/{id}`)

use crate::{
    cancel::CancelToken,
    client::CoinGeckoClient,
    constants::{COINS_ENDPOINT, VS_CURRENCY},
    error::ApiError,
    transport::Query,
    types::CoinDetail,
};
use serde::Deserialize;
use std::collections::HashMap;

/// Per-currency values, e.g. `{"usd": 42000.0, "eur": 39000.0}`
type CurrencyMap = HashMap<String, Option<f64>>;

#[derive(Debug, Deserialize)]
struct RawCoin {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: Option<RawImage>,
    #[serde(default)]
    market_data: Option<RawMarketData>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(default)]
    large: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMarketData {
    #[serde(default)]
    current_price: Option<CurrencyMap>,
    #[serde(default)]
    market_cap: Option<CurrencyMap>,
    #[serde(default)]
    total_volume: Option<CurrencyMap>,
    #[serde(default)]
    high_24h: Option<CurrencyMap>,
    #[serde(default)]
    low_24h: Option<CurrencyMap>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
}

/// Picks the USD value out of a currency map
fn usd(coin_id: &str, name: &str, values: &Option<CurrencyMap>) -> Result<f64, ApiError> {
    values
        .as_ref()
        .and_then(|m| m.get(VS_CURRENCY).copied().flatten())
        .ok_or_else(|| {
            ApiError::missing_field(coin_id, format!("market_data.{}.{}", name, VS_CURRENCY))
        })
}

impl RawCoin {
    fn into_detail(self) -> Result<CoinDetail, ApiError> {
        let id = self.id;

        let image = self
            .image
            .and_then(|img| img.large)
            .ok_or_else(|| ApiError::missing_field(&id, "image.large"))?;

        let market = self
            .market_data
            .ok_or_else(|| ApiError::missing_field(&id, "market_data"))?;

        Ok(CoinDetail {
            current_price: usd(&id, "current_price", &market.current_price)?,
            market_cap: usd(&id, "market_cap", &market.market_cap)?,
            total_volume: usd(&id, "total_volume", &market.total_volume)?,
            high_24h: usd(&id, "high_24h", &market.high_24h)?,
            low_24h: usd(&id, "low_24h", &market.low_24h)?,
            price_change_percentage_24h: market.price_change_percentage_24h,
            symbol: self.symbol,
            name: self.name,
            image,
            id,
        })
    }
}

fn detail_query() -> Query {
    vec![
        ("localization", "false".to_string()),
        ("tickers", "false".to_string()),
        ("market_data", "true".to_string()),
        ("community_data", "false".to_string()),
        ("developer_data", "false".to_string()),
        ("sparkline", "false".to_string()),
    ]
}

/// Characters that would turn an id into path, query or fragment syntax
const RESERVED_ID_CHARS: &[char] = &['/', '\\', '?', '#', '%'];

/// Rejects identifiers that can't be sent as a single path segment
///
/// Ids are opaque, but one containing `/`, `?`, `#` or an escape would
/// address a different endpoint or smuggle in query parameters.
pub(crate) fn check_coin_id(coin_id: &str) -> Result<(), ApiError> {
    if coin_id.trim().is_empty() {
        return Err(ApiError::invalid_request("coin id must not be empty"));
    }
    if coin_id.contains(RESERVED_ID_CHARS) || coin_id == "." || coin_id == ".." {
        return Err(ApiError::invalid_request(format!(
            "coin id is not a single path segment: {:?}",
            coin_id
        )));
    }
    Ok(())
}

impl CoinGeckoClient {
    /// Fetches one coin's metadata and USD market statistics
    ///
    /// # Arguments
    /// * `coin_id` - CoinGecko id, e.g. `bitcoin`
    ///
    /// # Returns
    /// The flattened detail record, or `ApiError::MissingField` when the coin
    /// has no USD market data
    pub async fn coin_detail(
        &self,
        coin_id: &str,
        cancel: &CancelToken,
    ) -> Result<CoinDetail, ApiError> {
        check_coin_id(coin_id)?;

        let path = format!("{}/{}", COINS_ENDPOINT, coin_id);
        let detail = self
            .fetch("coin", &path, detail_query(), cancel, RawCoin::into_detail)
            .await?;

        tracing::debug!(
            coin_id = %detail.id,
            price_usd = detail.current_price,
            "Fetched coin detail"
        );

        Ok(detail)
    }
}
