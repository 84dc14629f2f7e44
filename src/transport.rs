//! Transport abstraction for the outbound HTTP GET

use crate::error::ApiError;
use async_trait::async_trait;

/// Query string as ordered key/value pairs
pub type Query = Vec<(&'static str, String)>;

/// Trait for issuing GET requests against the CoinGecko API
///
/// The production implementation is [`crate::http::HttpTransport`]; tests
/// plug in a mock returning canned bodies.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request and returns the response body
    ///
    /// # Arguments
    /// * `path` - Endpoint path relative to the API base URL
    /// * `query` - Query parameters, sent in order
    ///
    /// # Returns
    /// The body of a 2xx response, or a network-kind error
    async fn get(&self, path: &str, query: &Query) -> Result<String, ApiError>;

    /// Returns the name of this transport
    fn transport_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// A request seen by the mock
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub path: String,
        pub query: Vec<(String, String)>,
    }

    impl RecordedRequest {
        /// Value of a query parameter
        pub fn param(&self, key: &str) -> Option<&str> {
            self.query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        }
    }

    /// Mock transport for testing
    #[derive(Default)]
    pub struct MockTransport {
        responses: Arc<Mutex<HashMap<String, Result<String, ApiError>>>>,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
        delay: Mutex<Option<Duration>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_json(&self, path: &str, body: serde_json::Value) {
            self.responses
                .lock()
                .unwrap()
                .insert(path.to_string(), Ok(body.to_string()));
        }

        pub fn set_body(&self, path: &str, body: &str) {
            self.responses
                .lock()
                .unwrap()
                .insert(path.to_string(), Ok(body.to_string()));
        }

        pub fn set_error(&self, path: &str, error: ApiError) {
            self.responses
                .lock()
                .unwrap()
                .insert(path.to_string(), Err(error));
        }

        /// Delays every response, for cancellation tests
        pub fn set_delay(&self, delay: Duration) {
            *self.delay.lock().unwrap() = Some(delay);
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, path: &str, query: &Query) -> Result<String, ApiError> {
            self.requests.lock().unwrap().push(RecordedRequest {
                path: path.to_string(),
                query: query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            });

            let delay = *self.delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            let responses = self.responses.lock().unwrap();
            match responses.get(path) {
                Some(result) => result.clone(),
                None => Err(ApiError::HttpStatus {
                    status: 404,
                    body: format!("no mock response for {}", path),
                }),
            }
        }

        fn transport_name(&self) -> &'static str {
            "mock"
        }
    }
}
