//! In-memory TTL cache for raw API responses
//!
//! Provides a `ResponseCache` that maps request URLs to response bytes. A single
//! reaper task, spawned on construction, wakes every `interval` and drops every
//! entry whose age exceeds that same interval, so an unrefreshed entry lives
//! somewhere between one and two intervals.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, trace};

/// Errors that can occur when constructing a cache
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    /// A zero interval would make the reaper spin
    #[error("Cache interval must be greater than zero")]
    ZeroInterval,

    /// The reaper needs a tokio runtime to run on
    #[error("Cache must be created from within a tokio runtime")]
    NoRuntime,
}

/// A stored response and the moment it was written
#[derive(Debug)]
struct CacheEntry {
    created_at: Instant,
    value: Vec<u8>,
}

type Entries = Arc<Mutex<HashMap<String, CacheEntry>>>;

/// Thread-safe response cache with interval-driven eviction
///
/// Every access, including `get`, goes through the same exclusive lock that the
/// reaper takes for its sweep. `get` does not look at entry age: a stale entry
/// stays visible until the reaper's next tick removes it.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Entries,
    interval: Duration,
    shutdown_tx: mpsc::Sender<()>,
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl ResponseCache {
    /// Creates an empty cache and spawns its reaper on the current runtime.
    ///
    /// # Arguments
    /// * `interval` - Reaper cadence and maximum age of a fresh entry
    ///
    /// # Returns
    /// * `Ok(ResponseCache)` with the reaper running
    /// * `Err(CacheError::ZeroInterval)` if `interval` is zero
    /// * `Err(CacheError::NoRuntime)` if called outside a tokio runtime
    pub fn new(interval: Duration) -> Result<Self, CacheError> {
        if interval.is_zero() {
            return Err(CacheError::ZeroInterval);
        }
        let handle = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let entries: Entries = Arc::new(Mutex::new(HashMap::new()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);

        // First sweep one full interval after construction
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let reaper = handle.spawn(reap_loop(
            Arc::clone(&entries),
            interval,
            ticker,
            shutdown_rx,
        ));
        debug!(?interval, "Response cache started");

        Ok(Self {
            entries,
            interval,
            shutdown_tx,
            reaper: Mutex::new(Some(reaper)),
        })
    }

    /// Stores `value` under `key`, replacing any previous entry and resetting its age
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        let entry = CacheEntry {
            created_at: Instant::now(),
            value: value.into(),
        };
        trace!(%key, bytes = entry.value.len(), "Cache store");
        self.entries.lock().insert(key, entry);
    }

    /// Returns a copy of the bytes stored under `key`, if present
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = self.entries.lock().get(key).map(|entry| entry.value.clone());
        trace!(%key, hit = value.is_some(), "Cache lookup");
        value
    }

    /// Number of entries currently held, stale ones included
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// The configured interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stops the reaper and waits for it to finish.
    ///
    /// Entries already stored stay readable; nothing is evicted afterwards.
    /// Calling this more than once is harmless.
    pub async fn shutdown(&self) {
        // Err means the reaper is already gone
        let _ = self.shutdown_tx.send(()).await;

        let reaper = self.reaper.lock().take();
        if let Some(reaper) = reaper {
            let _ = reaper.await;
        }
    }
}

/// Background sweep, runs until a shutdown signal arrives or every
/// `ResponseCache` handle has been dropped
async fn reap_loop(
    entries: Entries,
    interval: Duration,
    mut ticker: Interval,
    mut shutdown_rx: mpsc::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let mut guard = entries.lock();
                let evicted = reap(&mut guard, interval, now);
                let remaining = guard.len();
                drop(guard);

                if evicted > 0 {
                    debug!(evicted, remaining, "Reaped stale cache entries");
                }
            }
            _ = shutdown_rx.recv() => {
                debug!("Cache reaper stopped");
                break;
            }
        }
    }
}

/// Removes every entry strictly older than `interval` at `now`, returning the count removed
fn reap(entries: &mut HashMap<String, CacheEntry>, interval: Duration, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| now.saturating_duration_since(entry.created_at) <= interval);
    before - entries.len()
}
