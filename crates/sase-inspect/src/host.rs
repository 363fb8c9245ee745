//! Inspector host driver
//!
//! Drives one plugin through its lifecycle the way the packet engine
//! does: configure the module, construct the inspector, run per-worker
//! hooks, dump, destroy.

use crate::api::InspectApi;
use crate::error::{InspectError, InspectResult};
use crate::inspector::{Inspector, LogSink, ThreadContext};
use crate::module::Module;
use crate::packet::Packet;
use crate::stats::{ModuleStats, StatsSnapshot};
use std::sync::Arc;
use std::thread;

/// Runs the plugin's global cleanup when the handle goes away.
///
/// Declared last in [`InspectorHandle`] so it drops after the inspector.
struct PluginGuard(&'static InspectApi);

impl Drop for PluginGuard {
    fn drop(&mut self) {
        if let Some(pterm) = self.0.pterm {
            pterm();
        }
        tracing::debug!("{}: plugin terminated", self.0.name);
    }
}

/// Constructed inspector with its module and statistics
pub struct InspectorHandle {
    inspector: Box<dyn Inspector>,
    module: Box<dyn Module>,
    stats: Arc<ModuleStats>,
    _plugin: PluginGuard,
}

impl InspectorHandle {
    /// Configure the module with `options` and construct the inspector
    pub fn create(api: &'static InspectApi, options: &[(&str, &str)]) -> InspectResult<Self> {
        api.check_version()?;

        if let Some(pinit) = api.pinit {
            pinit();
        }
        let plugin = PluginGuard(api);

        let mut module = (api.mod_ctor)();
        module.begin()?;
        for (param, value) in options {
            module.set(param, value)?;
        }
        module.end()?;

        let inspector = (api.ctor)(module.as_mut())?;
        let stats = Arc::new(ModuleStats::new(
            api.name,
            module.pegs(),
            module.profile_name(),
        ));

        tracing::debug!("{}: inspector constructed", api.name);

        Ok(Self {
            inspector,
            module,
            stats,
            _plugin: plugin,
        })
    }

    pub fn inspector(&self) -> &dyn Inspector {
        self.inspector.as_ref()
    }

    pub fn module(&self) -> &dyn Module {
        self.module.as_ref()
    }

    pub fn module_stats(&self) -> &Arc<ModuleStats> {
        &self.stats
    }

    /// Register a worker and run the inspector's thread init
    pub fn thread_init(&self, worker: usize) -> ThreadContext {
        let mut ctx = self.stats.register_thread(worker);
        self.inspector.thread_init(&mut ctx);
        tracing::debug!("{}: worker {} ready", self.inspector.name(), worker);
        ctx
    }

    #[inline]
    pub fn evaluate(&self, ctx: &mut ThreadContext, packet: &Packet) {
        self.inspector.eval(packet, ctx);
    }

    /// Run the inspector's thread teardown; counters stay registered
    pub fn thread_teardown(&self, mut ctx: ThreadContext) {
        self.inspector.thread_term(&mut ctx);
        tracing::debug!("{}: worker {} torn down", self.inspector.name(), ctx.worker());
    }

    pub fn show(&self, sink: &mut dyn LogSink) {
        self.inspector.show(sink);
    }

    /// Merged statistics over every worker registered so far
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Drive `threads` workers to completion.
    ///
    /// Each worker runs init, evaluates the packets `packets_for(worker)`
    /// returns, then tears down. Workers are indexed `0..threads`, so
    /// repeated runs reuse the same counter slots.
    pub fn run_workers<F>(&self, threads: usize, packets_for: F) -> InspectResult<StatsSnapshot>
    where
        F: Fn(usize) -> Vec<Packet> + Sync,
    {
        let packets_for = &packets_for;

        thread::scope(|s| {
            let mut handles = Vec::with_capacity(threads);

            for worker in 0..threads {
                let handle = thread::Builder::new()
                    .name(format!("{}-worker-{}", self.inspector.name(), worker))
                    .spawn_scoped(s, move || {
                        let packets = packets_for(worker);
                        let mut ctx = self.thread_init(worker);
                        for pkt in &packets {
                            self.evaluate(&mut ctx, pkt);
                        }
                        self.thread_teardown(ctx);
                    })
                    .map_err(|e| InspectError::SpawnFailed(e.to_string()))?;
                handles.push((worker, handle));
            }

            // join everything before reporting so no panic is left unobserved
            let mut result = Ok(());
            for (worker, handle) in handles {
                if handle.join().is_err() && result.is_ok() {
                    result = Err(InspectError::WorkerPanicked(worker));
                }
            }
            result
        })?;

        Ok(self.stats())
    }

    /// Destroy the inspector and release the plugin
    pub fn destroy(self) {
        tracing::debug!("{}: destroying inspector", self.inspector.name());
    }
}
