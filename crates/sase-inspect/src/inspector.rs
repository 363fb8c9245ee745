//! Inspector trait and per-thread context
//!
//! The host calls the hooks in this order:
//!
//! ```text
//! ctor ──► thread_init ──► eval* ──► thread_term ──► drop
//!   │        (per worker, concurrently across workers)   ▲
//!   └────────────── show (control thread, any time) ─────┘
//! ```

use crate::packet::Packet;
use crate::profile::ProfileStats;
use crate::stats::PegCounts;
use std::sync::Arc;

/// Explicit per-worker state handed to every per-thread hook.
///
/// One context exists per (module, worker). It is not `Clone`, so the
/// worker holding it is the only writer of its counters.
#[derive(Debug)]
pub struct ThreadContext {
    worker: usize,
    pegs: Arc<PegCounts>,
    perf: Arc<ProfileStats>,
}

impl ThreadContext {
    pub(crate) fn new(worker: usize, pegs: Arc<PegCounts>, perf: Arc<ProfileStats>) -> Self {
        Self { worker, pegs, perf }
    }

    pub fn worker(&self) -> usize {
        self.worker
    }

    #[inline(always)]
    pub fn pegs(&self) -> &PegCounts {
        &self.pegs
    }

    #[inline(always)]
    pub fn perf(&self) -> &ProfileStats {
        &self.perf
    }
}

/// Text sink for diagnostic dumps
pub trait LogSink {
    fn log(&mut self, line: &str);
}

/// Buffers lines (tests, embedding hosts)
impl LogSink for Vec<String> {
    fn log(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Forwards lines to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&mut self, line: &str) {
        tracing::info!("{}", line);
    }
}

/// Host-managed inspector
///
/// Implementations must keep their configuration immutable after
/// construction: hooks take `&self` and run concurrently on workers.
pub trait Inspector: Send + Sync {
    /// Plugin name
    fn name(&self) -> &'static str;

    /// Called once per worker before its first `eval`
    fn thread_init(&self, _ctx: &mut ThreadContext) {}

    /// Per-packet fast path. Must not block, fail or panic.
    fn eval(&self, packet: &Packet, ctx: &mut ThreadContext);

    /// Called once per worker after its last `eval`
    fn thread_term(&self, _ctx: &mut ThreadContext) {}

    /// Read-only diagnostic dump
    fn show(&self, sink: &mut dyn LogSink);
}
