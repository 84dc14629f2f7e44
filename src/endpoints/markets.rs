//! Ranked market page (`/coins/markets`)

use crate::{
    cancel::CancelToken,
    client::CoinGeckoClient,
    constants::{MARKETS_ENDPOINT, MARKET_ORDER, MARKET_PAGE, MARKET_PAGE_SIZE, VS_CURRENCY},
    error::ApiError,
    transport::Query,
    types::CoinSummary,
};
use serde::Deserialize;

/// One entry of the upstream markets array
#[derive(Debug, Deserialize)]
struct RawMarketCoin {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
}

impl RawMarketCoin {
    fn into_summary(self) -> Result<CoinSummary, ApiError> {
        let image = self
            .image
            .ok_or_else(|| ApiError::missing_field(&self.id, "image"))?;
        let current_price = self
            .current_price
            .ok_or_else(|| ApiError::missing_field(&self.id, "current_price"))?;

        Ok(CoinSummary {
            id: self.id,
            symbol: self.symbol,
            name: self.name,
            image,
            current_price,
            price_change_percentage_24h: self.price_change_percentage_24h,
        })
    }
}

fn market_query() -> Query {
    vec![
        ("vs_currency", VS_CURRENCY.to_string()),
        ("order", MARKET_ORDER.to_string()),
        ("per_page", MARKET_PAGE_SIZE.to_string()),
        ("page", MARKET_PAGE.to_string()),
        ("sparkline", "false".to_string()),
    ]
}

impl CoinGeckoClient {
    /// Fetches the top coins by market capitalization
    ///
    /// # Returns
    /// Up to 20 coins in upstream (descending market cap) order
    pub async fn market_page(&self, cancel: &CancelToken) -> Result<Vec<CoinSummary>, ApiError> {
        let coins = self
            .fetch(
                "markets",
                MARKETS_ENDPOINT,
                market_query(),
                cancel,
                |raw: Vec<RawMarketCoin>| {
                    raw.into_iter()
                        .map(RawMarketCoin::into_summary)
                        .collect::<Result<Vec<_>, _>>()
                },
            )
            .await?;

        tracing::debug!(count = coins.len(), "Fetched market page");

        Ok(coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ErrorKind;
    use crate::transport::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn coin_json(rank: usize) -> serde_json::Value {
        json!({
            "id": format!("coin-{}", rank),
            "symbol": format!("c{}", rank),
            "name": format!("Coin {}", rank),
            "image": format!("https://example.com/{}.png", rank),
            "current_price": 1000.0 / rank as f64,
            "market_cap": 1_000_000_000.0 / rank as f64,
            "market_cap_rank": rank,
            "price_change_percentage_24h": -0.5,
        })
    }

    fn client_with(mock: Arc<MockTransport>) -> CoinGeckoClient {
        CoinGeckoClient::with_transport(mock, ClientConfig::default())
    }

    #[tokio::test]
    async fn test_market_page_preserves_order() {
        let mock = Arc::new(MockTransport::new());
        let page: Vec<_> = (1..=20).map(coin_json).collect();
        mock.set_json("/coins/markets", json!(page));
        let client = client_with(mock);

        let coins = client.market_page(&CancelToken::none()).await.unwrap();

        assert_eq!(coins.len(), 20);
        for (i, coin) in coins.iter().enumerate() {
            assert_eq!(coin.id, format!("coin-{}", i + 1));
        }
        assert_eq!(coins[0].current_price, 1000.0);
        assert_eq!(coins[0].price_change_percentage_24h, Some(-0.5));
    }

    #[tokio::test]
    async fn test_market_page_query() {
        let mock = Arc::new(MockTransport::new());
        mock.set_json("/coins/markets", json!([]));
        let client = client_with(mock.clone());

        let coins = client.market_page(&CancelToken::none()).await.unwrap();
        assert!(coins.is_empty());

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.path, "/coins/markets");
        assert_eq!(request.param("vs_currency"), Some("usd"));
        assert_eq!(request.param("order"), Some("market_cap_desc"));
        assert_eq!(request.param("per_page"), Some("20"));
        assert_eq!(request.param("page"), Some("1"));
        assert_eq!(request.param("sparkline"), Some("false"));
    }

    #[tokio::test]
    async fn test_null_change_is_kept_as_none() {
        let mock = Arc::new(MockTransport::new());
        let mut coin = coin_json(1);
        coin["price_change_percentage_24h"] = serde_json::Value::Null;
        mock.set_json("/coins/markets", json!([coin]));
        let client = client_with(mock);

        let coins = client.market_page(&CancelToken::none()).await.unwrap();
        assert_eq!(coins[0].price_change_percentage_24h, None);
    }

    #[tokio::test]
    async fn test_missing_price_is_shape_error() {
        let mock = Arc::new(MockTransport::new());
        let mut coin = coin_json(3);
        coin["current_price"] = serde_json::Value::Null;
        mock.set_json("/coins/markets", json!([coin_json(1), coin]));
        let client = client_with(mock);

        let err = client.market_page(&CancelToken::none()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert_eq!(err, ApiError::missing_field("coin-3", "current_price"));
    }

    #[tokio::test]
    async fn test_network_failure_surfaces() {
        let mock = Arc::new(MockTransport::new());
        mock.set_error(
            "/coins/markets",
            ApiError::HttpStatus {
                status: 503,
                body: "unavailable".to_string(),
            },
        );
        let client = client_with(mock);

        let err = client.market_page(&CancelToken::none()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
