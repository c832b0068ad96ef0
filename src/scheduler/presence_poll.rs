use dioxus_logger::tracing;
use serenity::{cache::Cache, http::Http};
use std::{
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::{service::presence::PresenceService, state::AppState};

/// Shortest period the timer accepts; `tokio::time::interval` panics on zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// One run of a poll task.
pub type PollFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A repeatable unit of work run by the poll timer.
pub type PollTask = Arc<dyn Fn() -> PollFuture + Send + Sync>;

/// The timer loop currently armed.
struct ArmedJob {
    id: u64,
    period: Duration,
    handle: JoinHandle<()>,
}

/// Repeating timer for the presence poll.
///
/// Holds the handle of the one timer loop that is currently armed. Re-arming
/// aborts that loop before spawning its replacement, so there is never more than
/// one poll timer running. Each tick spawns the task on its own, so aborting the
/// loop never cancels a cycle that is already in flight.
pub struct PollScheduler {
    job: Mutex<Option<ArmedJob>>,
    next_id: AtomicU64,
}

impl PollScheduler {
    /// Creates a scheduler with no timer armed.
    pub fn new() -> Self {
        Self {
            job: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// Cancels the armed timer, if any, and arms `task` to repeat every `period`.
    ///
    /// The first run of the new timer happens one `period` from now; callers that
    /// want an immediate run must invoke the task themselves. Ticks that fall
    /// behind are delayed rather than bunched up.
    ///
    /// # Arguments
    /// - `period` - Time between runs, with millisecond precision
    /// - `task` - Work to run on each tick
    ///
    /// # Returns
    /// - `u64` - ID of the newly armed timer
    pub async fn schedule(&self, period: Duration, task: PollTask) -> u64 {
        let period = period.max(MIN_PERIOD);
        let mut job = self.job.lock().await;

        if let Some(previous) = job.take() {
            previous.handle.abort();
            tracing::debug!("Cancelled poll timer {}", previous.id);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                tokio::spawn(task());
            }
        });

        *job = Some(ArmedJob { id, period, handle });

        tracing::info!("Poll timer {} armed with period {:?}", id, period);

        id
    }

    /// ID of the currently armed timer.
    #[cfg(test)]
    pub async fn current_job(&self) -> Option<u64> {
        self.job.lock().await.as_ref().map(|job| job.id)
    }

    /// Period of the currently armed timer.
    #[cfg(test)]
    pub async fn current_period(&self) -> Option<Duration> {
        self.job.lock().await.as_ref().map(|job| job.period)
    }
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        if let Some(job) = self.job.get_mut().take() {
            job.handle.abort();
        }
    }
}

/// Builds the task that runs one presence poll cycle and logs its outcome.
///
/// # Arguments
/// - `state` - Shared bot state
/// - `cache` - Serenity cache holding guild channels and presences
/// - `http` - Discord HTTP client for member fetches and message delivery
pub fn poll_task(state: AppState, cache: Arc<Cache>, http: Arc<Http>) -> PollTask {
    Arc::new(move || -> PollFuture {
        let state = state.clone();
        let cache = cache.clone();
        let http = http.clone();

        Box::pin(async move {
            let service = PresenceService::new(&state, &cache, http);

            match service.run_cycle().await {
                Ok(0) => {}
                Ok(changed) => tracing::info!("Posted {} listening change(s)", changed),
                Err(e) => tracing::error!("Error processing presence poll: {}", e),
            }
        })
    })
}
