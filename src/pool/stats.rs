//! Pool statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by the transmit buffer pool.
///
/// All fields are atomic for lock-free, thread-safe updates; counters use
/// `Ordering::Relaxed` because only atomicity matters, not ordering between
/// counters - statistics are eventually consistent by nature.
#[derive(Debug)]
pub struct PoolStats {
    /// Successful reservations (fresh and matched alike).
    pub reservations: AtomicU64,

    /// Reservations resolved by matching an existing identifier.
    pub reuses: AtomicU64,

    /// Reservations refused because the free set was empty.
    pub exhaustion_failures: AtomicU64,

    /// Reservations refused because a buffer rejected the codeblock count.
    pub rebind_failures: AtomicU64,

    /// Buffers recycled by the sweep after their expiry slot passed.
    pub expirations: AtomicU64,

    /// Buffers recycled by the sweep after delivery was signalled.
    pub completions: AtomicU64,
}

impl PoolStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            reservations: AtomicU64::new(0),
            reuses: AtomicU64::new(0),
            exhaustion_failures: AtomicU64::new(0),
            rebind_failures: AtomicU64::new(0),
            expirations: AtomicU64::new(0),
            completions: AtomicU64::new(0),
        }
    }

    /// Fraction of successful reservations that reused an existing
    /// reservation (0.0 to 1.0).
    pub fn reuse_rate(&self) -> f64 {
        let total = self.reservations.load(Ordering::Relaxed);
        if total == 0 {
            0.0
        } else {
            self.reuses.load(Ordering::Relaxed) as f64 / total as f64
        }
    }

    /// Get a non-atomic snapshot for display or logging.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reservations: self.reservations.load(Ordering::Relaxed),
            reuses: self.reuses.load(Ordering::Relaxed),
            exhaustion_failures: self.exhaustion_failures.load(Ordering::Relaxed),
            rebind_failures: self.rebind_failures.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            completions: self.completions.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.reservations.store(0, Ordering::Relaxed);
        self.reuses.store(0, Ordering::Relaxed);
        self.exhaustion_failures.store(0, Ordering::Relaxed);
        self.rebind_failures.store(0, Ordering::Relaxed);
        self.expirations.store(0, Ordering::Relaxed);
        self.completions.store(0, Ordering::Relaxed);
    }
}

impl Default for PoolStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of pool statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub reservations: u64,
    pub reuses: u64,
    pub exhaustion_failures: u64,
    pub rebind_failures: u64,
    pub expirations: u64,
    pub completions: u64,
}

impl StatsSnapshot {
    /// Fraction of successful reservations that reused an existing
    /// reservation (0.0 to 1.0).
    pub fn reuse_rate(&self) -> f64 {
        if self.reservations == 0 {
            0.0
        } else {
            self.reuses as f64 / self.reservations as f64
        }
    }

    /// Total failed reservations.
    pub fn failures(&self) -> u64 {
        self.exhaustion_failures + self.rebind_failures
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ reservations: {}, reuses: {}, failures: {}, expirations: {}, reuse_rate: {:.2}% }}",
            self.reservations,
            self.reuses,
            self.failures(),
            self.expirations,
            self.reuse_rate() * 100.0
        )
    }
}
