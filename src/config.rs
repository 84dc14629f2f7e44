//! Client configuration
//!
//! Defaults come from [`crate::constants`]. `from_env` lets a deployment
//! point the client at a proxy or tune the timeout without a rebuild.

use crate::constants::{
    COINGECKO_API_URL, DEFAULT_CHART_DAYS, DEFAULT_DATE_FORMAT, REQUEST_TIMEOUT_SECS, USER_AGENT,
};
use std::time::Duration;

/// Settings for [`crate::CoinGeckoClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent header
    pub user_agent: String,
    /// strftime pattern for chart point dates
    pub date_format: String,
    /// Day window of `chart_series_default`
    pub chart_days: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            chart_days: DEFAULT_CHART_DAYS,
        }
    }
}

impl ClientConfig {
    /// Builds a config from the environment, falling back to defaults
    ///
    /// Recognized variables:
    /// - `COINGECKO_API_URL`
    /// - `COINGECKO_TIMEOUT_SECS`
    /// - `COINGECKO_DATE_FORMAT`
    /// - `COINGECKO_CHART_DAYS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("COINGECKO_API_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("COINGECKO_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    value = %raw,
                    "Ignoring invalid COINGECKO_TIMEOUT_SECS"
                ),
            }
        }

        if let Some(pattern) = lookup("COINGECKO_DATE_FORMAT").filter(|p| !p.is_empty()) {
            config.date_format = pattern;
        }

        if let Some(raw) = lookup("COINGECKO_CHART_DAYS") {
            match raw.trim().parse::<u32>() {
                Ok(days) if days > 0 => config.chart_days = days,
                _ => tracing::warn!(
                    value = %raw,
                    "Ignoring invalid COINGECKO_CHART_DAYS"
                ),
            }
        }

        config
    }

    /// Full URL for an endpoint path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(
            config.url_for("/coins/markets"),
            "https://api.coingecko.com/api/v3/coins/markets"
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("COINGECKO_API_URL", "http://localhost:8080/api/v3/"),
            ("COINGECKO_TIMEOUT_SECS", "3"),
            ("COINGECKO_DATE_FORMAT", "%Y-%m-%d"),
            ("COINGECKO_CHART_DAYS", "30"),
        ]));

        assert_eq!(config.base_url, "http://localhost:8080/api/v3");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.chart_days, 30);
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("COINGECKO_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.timeout, Duration::from_secs(REQUEST_TIMEOUT_SECS));

        let config = ClientConfig::from_lookup(lookup_from(&[("COINGECKO_CHART_DAYS", "0")]));
        assert_eq!(config.chart_days, DEFAULT_CHART_DAYS);
    }
}
