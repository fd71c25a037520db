//! Fixed-interval polling
//!
//! Dashboards re-fetch on a timer. The first fetch happens immediately, then
//! once per interval. There is no backoff and no deduplication: a failed
//! fetch is yielded like any other result and the next tick fetches again.
//! Dropping the stream stops the timer.

use std::future::Future;
use std::time::Duration;

use async_stream::stream;
use chrono::{DateTime, Utc};
use futures::Stream;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::utils::errors::Result;

/// One polling result
#[derive(Debug)]
pub struct PollUpdate<T> {
    /// Tick number, starting at 1
    pub tick: u64,
    pub fetched_at: DateTime<Utc>,
    pub result: Result<T>,
}

/// Poll `fetch` every `interval`, yielding each result
pub fn poll<T, F, Fut>(interval: Duration, mut fetch: F) -> impl Stream<Item = PollUpdate<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    stream! {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut tick = 0u64;

        loop {
            ticker.tick().await;
            tick += 1;
            debug!(tick = tick, interval_ms = interval.as_millis() as u64, "Polling");

            let result = fetch().await;
            yield PollUpdate {
                tick,
                fetched_at: Utc::now(),
                result,
            };
        }
    }
}
