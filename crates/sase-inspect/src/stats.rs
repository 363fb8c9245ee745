//! Inspector Statistics
//!
//! Per-thread peg counters with a per-module registry that merges them on
//! demand. Workers write their own slot without synchronization beyond
//! relaxed atomics; the registry lock is only taken to register a thread
//! or to take a snapshot, never on the packet path.

use crate::inspector::ThreadContext;
use crate::profile::{ProfileSnapshot, ProfileStats};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Peg (counter) descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PegInfo {
    pub name: &'static str,
    pub help: &'static str,
}

impl PegInfo {
    pub const fn new(name: &'static str, help: &'static str) -> Self {
        Self { name, help }
    }
}

/// One counter on its own cache line
#[repr(C, align(64))]
#[derive(Debug, Default)]
struct PegCell(AtomicU64);

/// Per-thread peg counters
///
/// Every counter is padded to a cache line, so slices owned by different
/// workers never share one.
#[derive(Debug)]
pub struct PegCounts {
    counts: Box<[PegCell]>,
}

impl PegCounts {
    pub fn new(len: usize) -> Self {
        Self {
            counts: (0..len).map(|_| PegCell::default()).collect(),
        }
    }

    /// Increment a peg by one. Out-of-range indices are ignored.
    #[inline(always)]
    pub fn bump(&self, idx: usize) {
        self.add(idx, 1);
    }

    #[inline(always)]
    pub fn add(&self, idx: usize, n: u64) {
        if let Some(PegCell(c)) = self.counts.get(idx) {
            // single writer: load/store instead of RMW
            c.store(c.load(Ordering::Relaxed).wrapping_add(n), Ordering::Relaxed);
        }
    }

    pub fn get(&self, idx: usize) -> u64 {
        self.counts
            .get(idx)
            .map(|cell| cell.0.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn values(&self) -> Vec<u64> {
        self.counts.iter().map(|cell| cell.0.load(Ordering::Relaxed)).collect()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Registered worker slot
struct ThreadSlot {
    worker: usize,
    pegs: Arc<PegCounts>,
    perf: Arc<ProfileStats>,
}

/// Per-module registry of thread slots
pub struct ModuleStats {
    module: &'static str,
    pegs: &'static [PegInfo],
    profile_name: &'static str,
    slots: Mutex<Vec<ThreadSlot>>,
}

impl ModuleStats {
    pub fn new(module: &'static str, pegs: &'static [PegInfo], profile_name: &'static str) -> Self {
        Self {
            module,
            pegs,
            profile_name,
            slots: Mutex::new(Vec::new()),
        }
    }

    /// Hand a worker the context for its slot.
    ///
    /// A worker index gets one slot for the life of the registry: a worker
    /// that registers again picks up its counters where it left off. The
    /// slot stays registered after the context is dropped so totals of
    /// finished workers are still reported. At most one live context per
    /// worker index may exist at a time.
    pub fn register_thread(&self, worker: usize) -> ThreadContext {
        let mut slots = self.slots.lock();

        if let Some(slot) = slots.iter().find(|s| s.worker == worker) {
            return ThreadContext::new(worker, Arc::clone(&slot.pegs), Arc::clone(&slot.perf));
        }

        let pegs = Arc::new(PegCounts::new(self.pegs.len()));
        let perf = Arc::new(ProfileStats::new());
        slots.push(ThreadSlot {
            worker,
            pegs: Arc::clone(&pegs),
            perf: Arc::clone(&perf),
        });

        ThreadContext::new(worker, pegs, perf)
    }

    pub fn thread_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Merge every registered slot
    pub fn snapshot(&self) -> StatsSnapshot {
        self.collect(|_| true)
    }

    /// Counters of one worker
    pub fn worker_snapshot(&self, worker: usize) -> StatsSnapshot {
        self.collect(|slot| slot.worker == worker)
    }

    fn collect(&self, filter: impl Fn(&ThreadSlot) -> bool) -> StatsSnapshot {
        let mut snap = StatsSnapshot::empty(self.module, self.pegs, self.profile_name);

        for slot in self.slots.lock().iter().filter(|s| filter(s)) {
            for (peg, value) in snap.pegs.iter_mut().zip(slot.pegs.values()) {
                peg.value += value;
            }
            snap.profile.merge(&slot.perf.snapshot(self.profile_name));
            snap.threads += 1;
        }

        snap
    }
}

/// Named peg value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PegValue {
    pub name: &'static str,
    pub value: u64,
}

/// Merged statistics (non-atomic)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub module: &'static str,
    pub threads: usize,
    pub pegs: Vec<PegValue>,
    pub profile: ProfileSnapshot,
}

impl StatsSnapshot {
    fn empty(module: &'static str, pegs: &[PegInfo], profile_name: &'static str) -> Self {
        Self {
            module,
            threads: 0,
            pegs: pegs
                .iter()
                .map(|p| PegValue {
                    name: p.name,
                    value: 0,
                })
                .collect(),
            profile: ProfileSnapshot {
                name: profile_name,
                ..Default::default()
            },
        }
    }

    /// Look up a peg by name
    pub fn peg(&self, name: &str) -> Option<u64> {
        self.pegs.iter().find(|p| p.name == name).map(|p| p.value)
    }

    /// Fold another snapshot of the same module into this one
    pub fn merge(&mut self, other: &StatsSnapshot) {
        for theirs in &other.pegs {
            match self.pegs.iter_mut().find(|p| p.name == theirs.name) {
                Some(ours) => ours.value += theirs.value,
                None => self.pegs.push(theirs.clone()),
            }
        }
        self.profile.merge(&other.profile);
        self.threads += other.threads;
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} threads)", self.module, self.threads)?;
        for peg in &self.pegs {
            writeln!(f, "    {:<24}{}", format!("{}:", peg.name), peg.value)?;
        }
        write!(
            f,
            "    profile {}: {} checks, {} ns total, {:.1} ns avg",
            self.profile.name,
            self.profile.checks,
            self.profile.elapsed_ns,
            self.profile.avg_ns()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static PEGS: &[PegInfo] = &[
        PegInfo::new("total_packets", "count of packets received"),
        PegInfo::new("matches", "count of matches"),
    ];

    #[test]
    fn test_peg_counts() {
        let pegs = PegCounts::new(2);
        pegs.bump(0);
        pegs.bump(0);
        pegs.add(1, 5);
        pegs.bump(7); // ignored

        assert_eq!(pegs.get(0), 2);
        assert_eq!(pegs.get(1), 5);
        assert_eq!(pegs.get(7), 0);
        assert_eq!(pegs.values(), vec![2, 5]);
        assert_eq!(pegs.len(), 2);
    }

    #[test]
    fn test_aggregate() {
        let stats = ModuleStats::new("rna", PEGS, "rna");
        let a = stats.register_thread(0);
        let b = stats.register_thread(1);

        a.pegs().bump(0);
        b.pegs().add(0, 2);
        b.pegs().bump(1);

        let total = stats.snapshot();
        assert_eq!(total.threads, 2);
        assert_eq!(total.peg("total_packets"), Some(3));
        assert_eq!(total.peg("matches"), Some(1));
        assert_eq!(total.peg("missing"), None);

        let one = stats.worker_snapshot(1);
        assert_eq!(one.threads, 1);
        assert_eq!(one.peg("total_packets"), Some(2));
    }

    #[test]
    fn test_counts_survive_context_drop() {
        let stats = ModuleStats::new("rna", PEGS, "rna");
        {
            let ctx = stats.register_thread(0);
            ctx.pegs().add(0, 4);
        }
        assert_eq!(stats.thread_count(), 1);
        assert_eq!(stats.snapshot().peg("total_packets"), Some(4));
    }

    #[test]
    fn test_reregistered_worker_reuses_slot() {
        let stats = ModuleStats::new("rna", PEGS, "rna");
        for _ in 0..1000 {
            stats.register_thread(0).pegs().bump(0);
        }
        stats.register_thread(1).pegs().bump(0);

        assert_eq!(stats.thread_count(), 2);
        let snap = stats.snapshot();
        assert_eq!(snap.threads, 2);
        assert_eq!(snap.peg("total_packets"), Some(1001));
        assert_eq!(stats.worker_snapshot(0).peg("total_packets"), Some(1000));
    }

    #[test]
    fn test_counters_do_not_share_cache_lines() {
        let pegs = PegCounts::new(2);
        let a = &pegs.counts[0] as *const PegCell as usize;
        let b = &pegs.counts[1] as *const PegCell as usize;
        assert_eq!(a % 64, 0);
        assert_eq!(b - a, 64);
    }

    #[test]
    fn test_snapshot_merge_and_display() {
        let stats = ModuleStats::new("rna", PEGS, "rna");
        stats.register_thread(0).pegs().bump(0);

        let mut total = stats.snapshot();
        total.merge(&stats.snapshot());
        assert_eq!(total.peg("total_packets"), Some(2));
        assert_eq!(total.threads, 2);

        let text = total.to_string();
        assert!(text.starts_with("rna (2 threads)"));
        assert!(text.contains("total_packets:"));
        assert!(text.contains("profile rna"));
    }

    proptest::proptest! {
        #[test]
        fn prop_snapshot_sums_every_thread(adds in proptest::collection::vec(0u64..1000, 1..8)) {
            let stats = ModuleStats::new("rna", PEGS, "rna");
            for (worker, n) in adds.iter().enumerate() {
                stats.register_thread(worker).pegs().add(0, *n);
            }

            let snap = stats.snapshot();
            proptest::prop_assert_eq!(snap.peg("total_packets"), Some(adds.iter().sum::<u64>()));
            proptest::prop_assert_eq!(snap.threads, adds.len());
        }
    }
}
