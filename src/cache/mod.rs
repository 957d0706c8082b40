//! Cache module for holding raw API responses in memory
//!
//! This module provides a thread-safe key/bytes store shared between the
//! request path and a background reaper task. Entries older than the configured
//! interval are purged by the reaper on its next tick; reads never check
//! freshness themselves.

mod ttl;

pub use ttl::{CacheError, ResponseCache};
