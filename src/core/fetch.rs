use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::ZukanError;

/// Seam between the pipeline and the network. `CatalogClient` is the real
/// implementation; tests swap in an in-memory one.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, ZukanError>;
}

/// Fetches `url` and decodes it into `T`. A body that does not match `T` fails
/// with `ZukanError::Schema` instead of leaking a half-filled value.
pub async fn fetch_typed<T, F>(fetcher: &F, url: &str) -> Result<T, ZukanError>
where
    T: DeserializeOwned,
    F: JsonFetcher + ?Sized,
{
    let value = fetcher.get_json(url).await?;
    serde_json::from_value(value)
        .map_err(|source| ZukanError::Schema { url: url.to_string(), source })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        collections::{
            HashMap,
            HashSet,
        },
        sync::{
            atomic::{
                AtomicUsize,
                Ordering,
            },
            Mutex,
        },
        time::Duration,
    };

    use super::*;

    /// Serves canned JSON by URL. Unknown URLs answer 404, URLs marked as
    /// failing answer 500, and per-URL delays let tests reorder completions.
    #[derive(Default)]
    pub struct FakeFetcher {
        responses: HashMap<String, Value>,
        failing: HashSet<String>,
        delays: HashMap<String, Duration>,
        calls: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: &str, body: Value) -> Self {
            self.responses.insert(url.to_string(), body);
            self
        }

        pub fn failing(mut self, url: &str) -> Self {
            self.failing.insert(url.to_string());
            self
        }

        pub fn delayed(mut self, url: &str, delay: Duration) -> Self {
            self.delays.insert(url.to_string(), delay);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// Highest number of requests that were pending at the same time.
        pub fn max_in_flight(&self) -> usize {
            self.max_in_flight.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JsonFetcher for FakeFetcher {
        async fn get_json(&self, url: &str) -> Result<Value, ZukanError> {
            self.calls.lock().unwrap().push(url.to_string());

            let pending = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(pending, Ordering::SeqCst);

            if let Some(delay) = self.delays.get(url) {
                tokio::time::sleep(*delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(url) {
                return Err(ZukanError::Status { status: 500, url: url.to_string() });
            }

            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| ZukanError::Status { status: 404, url: url.to_string() })
        }
    }
}
