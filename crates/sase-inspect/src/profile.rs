//! Hook profiling
//!
//! Per-thread entry counts and elapsed time for an inspector hook. The
//! [`Profile`] guard is opened at the top of the hook and records when it
//! goes out of scope, so early returns are timed too.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Per-thread profile counters (cache-line aligned)
///
/// Written only by the owning worker; other threads read relaxed.
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct ProfileStats {
    checks: AtomicU64,
    elapsed_ns: AtomicU64,
}

impl ProfileStats {
    pub const fn new() -> Self {
        Self {
            checks: AtomicU64::new(0),
            elapsed_ns: AtomicU64::new(0),
        }
    }

    /// Record one timed entry
    #[inline(always)]
    pub fn record(&self, elapsed: Duration) {
        // single writer: load/store instead of RMW
        let ns = elapsed.as_nanos().min(u64::MAX as u128) as u64;
        self.checks
            .store(self.checks.load(Ordering::Relaxed).wrapping_add(1), Ordering::Relaxed);
        self.elapsed_ns
            .store(self.elapsed_ns.load(Ordering::Relaxed).saturating_add(ns), Ordering::Relaxed);
    }

    pub fn checks(&self) -> u64 {
        self.checks.load(Ordering::Relaxed)
    }

    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns.load(Ordering::Relaxed)
    }

    /// Get snapshot
    pub fn snapshot(&self, name: &'static str) -> ProfileSnapshot {
        ProfileSnapshot {
            name,
            checks: self.checks(),
            elapsed_ns: self.elapsed_ns(),
        }
    }
}

/// Scoped timer over a [`ProfileStats`]
#[must_use = "the profile records when dropped"]
pub struct Profile<'a> {
    stats: &'a ProfileStats,
    start: Instant,
}

impl<'a> Profile<'a> {
    #[inline(always)]
    pub fn start(stats: &'a ProfileStats) -> Self {
        Self {
            stats,
            start: Instant::now(),
        }
    }
}

impl Drop for Profile<'_> {
    #[inline(always)]
    fn drop(&mut self) {
        self.stats.record(self.start.elapsed());
    }
}

/// Profile snapshot (non-atomic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileSnapshot {
    pub name: &'static str,
    pub checks: u64,
    pub elapsed_ns: u64,
}

impl ProfileSnapshot {
    /// Average nanoseconds per entry
    pub fn avg_ns(&self) -> f64 {
        if self.checks == 0 {
            return 0.0;
        }
        self.elapsed_ns as f64 / self.checks as f64
    }

    pub fn merge(&mut self, other: &ProfileSnapshot) {
        self.checks += other.checks;
        self.elapsed_ns = self.elapsed_ns.saturating_add(other.elapsed_ns);
    }
}
