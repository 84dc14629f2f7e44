//! CoinGecko market data client
//!
//! Owns the transport and funnels every outbound call through
//! [`CoinGeckoClient::fetch`], which races the request against the caller's
//! [`CancelToken`], decodes and projects the JSON body and records metrics. The
//! endpoint-specific operations live in [`crate::endpoints`].

use crate::{
    cancel::CancelToken,
    config::ClientConfig,
    error::ApiError,
    http::HttpTransport,
    metrics::{MetricsCollector, RequestMetrics},
    transport::{Query, Transport},
    types::CoinOverview,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Client for the CoinGecko market endpoints
///
/// Cheap to clone; clones share the transport and metrics.
///
/// # Example
/// ```no_run
/// use coingecko_market_sdk::{CancelToken, CoinGeckoClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CoinGeckoClient::new()?;
/// let cancel = CancelToken::new();
///
/// let coins = client.market_page(&cancel).await?;
/// for coin in &coins {
///     println!("{}: ${:.2}", coin.display_symbol(), coin.current_price);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CoinGeckoClient {
    transport: Arc<dyn Transport>,
    metrics: Arc<MetricsCollector>,
    config: Arc<ClientConfig>,
}

impl CoinGeckoClient {
    /// Creates a client for the public API with default settings
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client configured from `COINGECKO_*` environment variables
    pub fn from_env() -> Result<Self, ApiError> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Creates a client with explicit settings
    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(transport, config))
    }

    /// Creates a client over a custom transport
    ///
    /// This is primarily for testing with mock transports.
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        let metrics = Arc::new(MetricsCollector::new(transport.transport_name()));

        Self {
            transport,
            metrics,
            config: Arc::new(config),
        }
    }

    /// Settings in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Latency and success rate of the requests made so far
    pub async fn metrics(&self) -> RequestMetrics {
        self.metrics.get_metrics().await
    }

    /// Fetches detail and chart of one coin concurrently
    ///
    /// Both requests are in flight at the same time; if either fails the
    /// other is dropped and the error is returned, so there is never a
    /// half-filled overview.
    pub async fn coin_overview(
        &self,
        coin_id: &str,
        days: u32,
        cancel: &CancelToken,
    ) -> Result<CoinOverview, ApiError> {
        let (detail, chart) = tokio::try_join!(
            self.coin_detail(coin_id, cancel),
            self.chart_series(coin_id, days, cancel)
        )?;

        Ok(CoinOverview { detail, chart })
    }

    /// Issues one GET, decodes the body into `R` and projects it into `T`
    ///
    /// The request counts as successful in metrics only when both decoding
    /// and projection succeed.
    pub(crate) async fn fetch<R, T>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: Query,
        cancel: &CancelToken,
        project: impl FnOnce(R) -> Result<T, ApiError>,
    ) -> Result<T, ApiError>
    where
        R: DeserializeOwned,
    {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let span = tracing::debug_span!(
            "coingecko_request",
            request_id = %Uuid::new_v4(),
            endpoint,
        );

        async move {
            let start = Instant::now();

            let body = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(ApiError::Cancelled),
                body = self.transport.get(path, &query) => body,
            };

            let result = body.and_then(|body| {
                let raw: R = serde_json::from_str(&body).map_err(|e| {
                    ApiError::InvalidResponse(format!(
                        "Failed to parse CoinGecko {} response: {}",
                        endpoint, e
                    ))
                })?;
                project(raw)
            });

            let latency = start.elapsed();
            match &result {
                Ok(_) => {
                    self.metrics.record_request(endpoint, latency, true).await;
                }
                Err(ApiError::Cancelled) => {
                    tracing::debug!("Request cancelled by caller");
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        latency_ms = latency.as_millis() as u64,
                        "CoinGecko request failed"
                    );
                    self.metrics.record_request(endpoint, latency, false).await;
                }
            }

            result
        }
        .instrument(span)
        .await
    }
}
