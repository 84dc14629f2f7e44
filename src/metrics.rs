//! Request metrics for outbound CoinGecko calls
//!
//! Tracks a latency window and success rate so callers can surface
//! "API is slow" hints without a separate metrics stack.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Maximum number of samples to keep for metrics calculation
const MAX_SAMPLES: usize = 100;

/// Snapshot of request metrics
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMetrics {
    /// Name of the transport the requests went through
    pub transport_name: String,
    /// 50th percentile latency of successful requests in milliseconds
    pub latency_p50_ms: f64,
    /// 99th percentile latency of successful requests in milliseconds
    pub latency_p99_ms: f64,
    /// Success rate (0.0 to 1.0); a response that fails to decode counts as a failure
    pub success_rate: f64,
    /// Total number of requests tracked
    pub total_requests: u64,
    /// Number of failed requests
    pub failed_requests: u64,
}

impl RequestMetrics {
    /// Creates metrics with no data
    pub fn empty(transport_name: &str) -> Self {
        Self {
            transport_name: transport_name.to_string(),
            latency_p50_ms: 0.0,
            latency_p99_ms: 0.0,
            success_rate: 1.0,
            total_requests: 0,
            failed_requests: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct LatencySample {
    endpoint: &'static str,
    duration_ms: f64,
    success: bool,
}

#[derive(Debug, Default)]
struct Counters {
    samples: VecDeque<LatencySample>,
    total_requests: u64,
    failed_requests: u64,
}

/// Collects and computes metrics for outbound requests
#[derive(Debug)]
pub struct MetricsCollector {
    transport_name: String,
    inner: Arc<RwLock<Counters>>,
}

impl MetricsCollector {
    /// Creates a new metrics collector
    pub fn new(transport_name: &str) -> Self {
        Self {
            transport_name: transport_name.to_string(),
            inner: Arc::new(RwLock::new(Counters {
                samples: VecDeque::with_capacity(MAX_SAMPLES),
                ..Counters::default()
            })),
        }
    }

    /// Records a request with its endpoint, duration and outcome
    pub async fn record_request(&self, endpoint: &'static str, duration: Duration, success: bool) {
        let mut inner = self.inner.write().await;

        inner.total_requests += 1;
        if !success {
            inner.failed_requests += 1;
        }

        if inner.samples.len() >= MAX_SAMPLES {
            inner.samples.pop_front();
        }
        inner.samples.push_back(LatencySample {
            endpoint,
            duration_ms: duration.as_secs_f64() * 1000.0,
            success,
        });
    }

    /// Computes current metrics over all endpoints
    pub async fn get_metrics(&self) -> RequestMetrics {
        self.compute(None).await
    }

    /// Computes latency percentiles for one endpoint; counters stay global
    pub async fn get_endpoint_metrics(&self, endpoint: &str) -> RequestMetrics {
        self.compute(Some(endpoint)).await
    }

    async fn compute(&self, endpoint: Option<&str>) -> RequestMetrics {
        let inner = self.inner.read().await;

        if inner.samples.is_empty() {
            return RequestMetrics::empty(&self.transport_name);
        }

        let mut latencies: Vec<f64> = inner
            .samples
            .iter()
            .filter(|s| s.success)
            .filter(|s| endpoint.map_or(true, |e| s.endpoint == e))
            .map(|s| s.duration_ms)
            .collect();

        latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let total = inner.total_requests;
        let failed = inner.failed_requests;
        let success_rate = if total > 0 {
            (total - failed) as f64 / total as f64
        } else {
            1.0
        };

        RequestMetrics {
            transport_name: self.transport_name.clone(),
            latency_p50_ms: percentile(&latencies, 50.0),
            latency_p99_ms: percentile(&latencies, 99.0),
            success_rate,
            total_requests: total,
            failed_requests: failed,
        }
    }
}

/// Calculate percentile from sorted values
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted_values.len() - 1) as f64).round() as usize;
    sorted_values[idx.min(sorted_values.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_collector() {
        let collector = MetricsCollector::new("test");

        collector
            .record_request("markets", Duration::from_millis(100), true)
            .await;
        collector
            .record_request("coin", Duration::from_millis(200), true)
            .await;
        collector
            .record_request("coin", Duration::from_millis(150), false)
            .await;

        let metrics = collector.get_metrics().await;

        assert_eq!(metrics.transport_name, "test");
        assert_eq!(metrics.total_requests, 3);
        assert_eq!(metrics.failed_requests, 1);
        assert!(metrics.success_rate > 0.6 && metrics.success_rate < 0.7);

        let coin = collector.get_endpoint_metrics("coin").await;
        assert_eq!(coin.latency_p50_ms, 200.0);
    }

    #[tokio::test]
    async fn test_window_is_bounded() {
        let collector = MetricsCollector::new("test");
        for _ in 0..(MAX_SAMPLES + 10) {
            collector
                .record_request("markets", Duration::from_millis(5), true)
                .await;
        }

        assert_eq!(collector.inner.read().await.samples.len(), MAX_SAMPLES);
        assert_eq!(collector.get_metrics().await.total_requests, 110);
    }

    #[test]
    fn test_percentile() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 50.0), 3.0);
        assert_eq!(percentile(&values, 99.0), 5.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }
}
