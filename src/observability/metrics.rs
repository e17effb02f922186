//! Metrics registry for neodb
//!
//! - Counters only
//! - Monotonic increase, reset only when the database is rebuilt
//! - Relaxed atomics so read-only queries can count through `&self`

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters of one database instance
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// NEOs held by the database
    neos_indexed: AtomicU64,
    /// Approaches attached to a NEO
    approaches_linked: AtomicU64,
    /// Approaches whose designation matched no NEO
    approaches_unmatched: AtomicU64,
    /// Lookup key collisions resolved last-wins
    key_collisions: AtomicU64,
    /// Designation and name lookups
    lookups: AtomicU64,
    /// Lookups that found nothing
    lookup_misses: AtomicU64,
    /// Query streams created
    queries_started: AtomicU64,
    /// Records handed out by query streams
    records_yielded: AtomicU64,
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub neos_indexed: u64,
    pub approaches_linked: u64,
    pub approaches_unmatched: u64,
    pub key_collisions: u64,
    pub lookups: u64,
    pub lookup_misses: u64,
    pub queries_started: u64,
    pub records_yielded: u64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Linking

    pub fn set_neos_indexed(&self, count: u64) {
        self.neos_indexed.store(count, Ordering::Relaxed);
    }

    pub fn increment_linked(&self) {
        self.approaches_linked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_unmatched(&self) {
        self.approaches_unmatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_key_collisions(&self) {
        self.key_collisions.fetch_add(1, Ordering::Relaxed);
    }

    // Lookup

    /// Records one lookup and whether it hit
    pub fn record_lookup(&self, hit: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.lookup_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    // Query

    pub fn increment_queries(&self) {
        self.queries_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_yielded(&self) {
        self.records_yielded.fetch_add(1, Ordering::Relaxed);
    }

    /// Approaches currently counted as unmatched
    pub fn unmatched(&self) -> u64 {
        self.approaches_unmatched.load(Ordering::Relaxed)
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            neos_indexed: self.neos_indexed.load(Ordering::Relaxed),
            approaches_linked: self.approaches_linked.load(Ordering::Relaxed),
            approaches_unmatched: self.approaches_unmatched.load(Ordering::Relaxed),
            key_collisions: self.key_collisions.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            lookup_misses: self.lookup_misses.load(Ordering::Relaxed),
            queries_started: self.queries_started.load(Ordering::Relaxed),
            records_yielded: self.records_yielded.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}
