//! RNA inspector
//!
//! Holds the module descriptor and the parsed configuration, both frozen
//! at construction. The packet hook only counts.

use crate::config::RnaConfig;
use crate::module::{RnaModuleConfig, PEG_TOTAL_PACKETS, RNA_NAME};
use sase_inspect::{Inspector, LogSink, Packet, Profile, ThreadContext};

/// Control inspector for network discovery
#[derive(Debug)]
pub struct RnaInspector {
    mod_conf: RnaModuleConfig,
    rna_conf: RnaConfig,
}

impl RnaInspector {
    /// Build from the module descriptor, loading `rna_conf_path`.
    ///
    /// A missing or unreadable file leaves the defaults in place.
    pub fn new(mod_conf: RnaModuleConfig) -> Self {
        let report = RnaConfig::load(&mod_conf.rna_conf_path);
        if let Some(failure) = &report.failure {
            tracing::warn!("{}, using defaults", failure);
        }

        tracing::debug!(
            path = %mod_conf.rna_conf_path,
            warnings = report.warnings.len(),
            "RNA: configuration ready"
        );

        Self {
            mod_conf,
            rna_conf: report.config,
        }
    }

    pub fn config(&self) -> &RnaConfig {
        &self.rna_conf
    }

    pub fn module_config(&self) -> &RnaModuleConfig {
        &self.mod_conf
    }
}

fn show_line(sink: &mut dyn LogSink, label: &str, value: impl std::fmt::Display) {
    sink.log(&format!("    {:<24}{}", label, value));
}

impl Inspector for RnaInspector {
    fn name(&self) -> &'static str {
        RNA_NAME
    }

    // no per-thread state yet
    fn thread_init(&self, _ctx: &mut ThreadContext) {}

    fn eval(&self, packet: &Packet, ctx: &mut ThreadContext) {
        let _profile = Profile::start(ctx.perf());

        // reassembled bytes were already counted
        if packet.is_rebuilt_stream() {
            return;
        }

        ctx.pegs().bump(PEG_TOTAL_PACKETS);
    }

    fn thread_term(&self, _ctx: &mut ThreadContext) {}

    fn show(&self, sink: &mut dyn LogSink) {
        sink.log("RNA Configuration");

        let paths = [
            ("Config path:", &self.mod_conf.rna_conf_path),
            ("Library path:", &self.mod_conf.rna_util_lib_path),
            ("Fingerprint dir:", &self.mod_conf.fingerprint_dir),
            ("Custom fingerprint dir:", &self.mod_conf.custom_fingerprint_dir),
        ];
        for (label, path) in paths {
            if !path.is_empty() {
                show_line(sink, label, path);
            }
        }

        let conf = &self.rna_conf;
        show_line(sink, "Update timeout:", format_args!("{} secs", conf.update_timeout));
        show_line(sink, "Max host client apps:", conf.max_host_client_apps);
        show_line(sink, "Max payloads:", conf.max_payloads);
        show_line(sink, "Max host services:", conf.max_host_services);
        show_line(sink, "Max host service info:", conf.max_host_service_info);
        show_line(sink, "Banner grab:", conf.enable_banner_grab);
        sink.log("");
    }
}
