//! Historical price series (`/coins/{id}/market_chart`)

use super::coin::check_coin_id;
use crate::{
    cancel::CancelToken,
    client::CoinGeckoClient,
    constants::{CHART_INTERVAL, COINS_ENDPOINT, MARKET_CHART_SUFFIX, VS_CURRENCY},
    error::ApiError,
    transport::Query,
    types::ChartPoint,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt::Write;

/// Upstream chart body; `market_caps` and `total_volumes` are ignored
#[derive(Debug, Deserialize)]
struct RawMarketChart {
    prices: Vec<(f64, f64)>,
}

fn chart_query(days: u32) -> Query {
    vec![
        ("vs_currency", VS_CURRENCY.to_string()),
        ("days", days.to_string()),
        ("interval", CHART_INTERVAL.to_string()),
    ]
}

/// Converts one `[timestamp_ms, price]` sample
fn to_point(timestamp_ms: f64, price: f64, date_format: &str) -> Result<ChartPoint, ApiError> {
    let timestamp = Some(timestamp_ms)
        .filter(|ms| ms.is_finite())
        .and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms as i64))
        .ok_or_else(|| {
            ApiError::InvalidResponse(format!("Timestamp out of range: {}", timestamp_ms))
        })?;

    let mut date = String::new();
    write!(date, "{}", timestamp.format(date_format)).map_err(|_| {
        ApiError::invalid_request(format!("Invalid date format: {}", date_format))
    })?;

    Ok(ChartPoint {
        timestamp,
        date,
        price,
    })
}

/// Thins chart labels down to roughly `slots` visible dates
///
/// Keeps the date of every `len / slots`-th point and blanks the others so
/// axis labels don't overlap. The result has one entry per point.
pub fn axis_labels(points: &[ChartPoint], slots: usize) -> Vec<String> {
    let step = (points.len() / slots.max(1)).max(1);

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            if i % step == 0 {
                point.date.clone()
            } else {
                String::new()
            }
        })
        .collect()
}

impl CoinGeckoClient {
    /// Fetches the daily USD price series of a coin
    ///
    /// # Arguments
    /// * `coin_id` - CoinGecko id, e.g. `bitcoin`
    /// * `days` - Trailing day window, at least 1
    ///
    /// # Returns
    /// One point per upstream sample, in upstream order. An empty upstream
    /// series gives an empty vector.
    pub async fn chart_series(
        &self,
        coin_id: &str,
        days: u32,
        cancel: &CancelToken,
    ) -> Result<Vec<ChartPoint>, ApiError> {
        check_coin_id(coin_id)?;
        if days == 0 {
            return Err(ApiError::invalid_request("day window must be at least 1"));
        }

        let path = format!("{}/{}{}", COINS_ENDPOINT, coin_id, MARKET_CHART_SUFFIX);
        let date_format = self.config().date_format.as_str();
        let points = self
            .fetch(
                "market_chart",
                &path,
                chart_query(days),
                cancel,
                |raw: RawMarketChart| {
                    raw.prices
                        .into_iter()
                        .map(|(timestamp_ms, price)| to_point(timestamp_ms, price, date_format))
                        .collect::<Result<Vec<_>, _>>()
                },
            )
            .await?;

        tracing::debug!(coin_id, days, samples = points.len(), "Fetched chart series");

        Ok(points)
    }

    /// Fetches the price series over the configured day window
    ///
    /// Same as [`CoinGeckoClient::chart_series`] with `config().chart_days`.
    pub async fn chart_series_default(
        &self,
        coin_id: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<ChartPoint>, ApiError> {
        self.chart_series(coin_id, self.config().chart_days, cancel).await
    }
}
