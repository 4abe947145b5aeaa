use crate::error::FetchError;
use crate::fetch::{DataFetcher, Dataset, QueryParams, Record};
use crate::key::ApiKey;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::trace;

// BEA budget: 100 requests /60s. Only the request count is tracked here; the
// byte and error budgets stay the caller's problem.

/// Request-budget wrapper around a [`DataFetcher`].
///
/// Composition is explicit: a bare `DataFetcher` never waits. Wrap one when a
/// run issues enough calls to brush against the published limit.
pub struct Throttled {
    fetcher: DataFetcher,
    limit: usize,
    window: Duration,
    sent: Mutex<VecDeque<Instant>>,
}

impl Throttled {
    /// Wrap `fetcher` with the published budget of 100 requests per minute.
    pub fn new(fetcher: DataFetcher) -> Self {
        Self::with_budget(fetcher, 100, Duration::from_secs(60))
    }

    /// Wrap `fetcher` with a custom budget of `limit` requests per `window`.
    pub fn with_budget(fetcher: DataFetcher, limit: usize, window: Duration) -> Self {
        Self {
            fetcher,
            limit,
            window,
            sent: Mutex::new(VecDeque::with_capacity(limit)),
        }
    }

    /// As [`DataFetcher::get_data`], waiting for budget first.
    pub async fn get_data(
        &self,
        key: &ApiKey,
        params: &QueryParams,
    ) -> Result<Vec<Record>, FetchError> {
        self.acquire().await;
        self.fetcher.get_data(key, params).await
    }

    /// As [`DataFetcher::get_dataset_list`], waiting for budget first.
    pub async fn get_dataset_list(&self, key: &ApiKey) -> Result<Vec<Dataset>, FetchError> {
        self.acquire().await;
        self.fetcher.get_dataset_list(key).await
    }

    // sliding window: evict sends older than the window, then either record
    // ours or sleep until the oldest send expires
    async fn acquire(&self) {
        loop {
            let wait = {
                let mut sent = self.sent.lock().await;
                let now = Instant::now();
                while let Some(oldest) = sent.front() {
                    if now.duration_since(*oldest) >= self.window {
                        sent.pop_front();
                    } else {
                        break;
                    }
                }

                if sent.len() < self.limit {
                    sent.push_back(now);
                    return;
                }

                let oldest = sent.front().expect("window to be non-empty when full");
                self.window - now.duration_since(*oldest)
            };

            trace!("request budget exhausted, backing off for {wait:?}");
            tokio::time::sleep(wait).await;
        }
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn budget_blocks_once_full() {
        let throttled = Throttled::with_budget(DataFetcher::new(), 2, Duration::from_millis(200));

        // two sends fit the budget without waiting
        let start = Instant::now();
        throttled.acquire().await;
        throttled.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(100));

        // the third waits out the window
        throttled.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn window_slides() {
        let throttled = Throttled::with_budget(DataFetcher::new(), 1, Duration::from_millis(100));

        throttled.acquire().await;
        tokio::time::sleep(Duration::from_millis(150)).await;

        // the first send has expired, so the next one is free
        let start = Instant::now();
        throttled.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
