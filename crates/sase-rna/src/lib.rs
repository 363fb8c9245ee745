//! # SASE RNA Inspector
//!
//! Real-time network awareness plugin for the inspection host.
//!
//! ## Features
//!
//! - **Configuration**: line-oriented `<type> <key> <value>` file
//!   with discovery limits and a banner grab switch
//! - **Option layer**: four host-supplied paths set through [`RnaModule`]
//! - **Packet hook**: per-worker `total_packets` peg, profiled under `rna`
//! - **Diagnostics**: `show` dump of every effective setting
//!
//! ## Usage
//!
//! ```no_run
//! use sase_inspect::{InspectorHandle, Packet, TracingSink};
//!
//! let handle = InspectorHandle::create(
//!     &sase_rna::RNA_API,
//!     &[("rna_conf_path", "/etc/sase/rna.conf")],
//! )?;
//! handle.show(&mut TracingSink);
//!
//! let stats = handle.run_workers(4, |_| vec![Packet::default(); 1000])?;
//! println!("{}", stats);
//! # Ok::<(), sase_inspect::InspectError>(())
//! ```

pub mod config;
pub mod error;
pub mod inspector;
pub mod module;

pub use config::{ConfigLoader, Directive, LoadReport, RnaConfig};
pub use error::ConfigError;
pub use inspector::RnaInspector;
pub use module::{RnaModule, RnaModuleConfig, PEG_TOTAL_PACKETS, RNA_NAME, RNA_PEGS};

use sase_inspect::{
    downcast_module, InspectApi, InspectResult, Inspector, InspectorType, Module,
    INSAPI_VERSION, PROTO_BIT_ANY_IP,
};

fn rna_mod_ctor() -> Box<dyn Module> {
    Box::new(RnaModule::new())
}

fn rna_inspector_pinit() {
    tracing::trace!("RNA: plugin init");
}

fn rna_inspector_pterm() {
    tracing::trace!("RNA: plugin term");
}

fn rna_inspector_ctor(module: &mut dyn Module) -> InspectResult<Box<dyn Inspector>> {
    let module = downcast_module::<RnaModule>(RNA_NAME, module)?;
    Ok(Box::new(RnaInspector::new(module.take_config())))
}

/// Plugin table for the RNA inspector
pub static RNA_API: InspectApi = InspectApi {
    name: RNA_NAME,
    help: module::RNA_HELP,
    api_version: INSAPI_VERSION,
    kind: InspectorType::Control,
    proto_bits: PROTO_BIT_ANY_IP,
    mod_ctor: rna_mod_ctor,
    pinit: Some(rna_inspector_pinit),
    pterm: Some(rna_inspector_pterm),
    ctor: rna_inspector_ctor,
};

static PLUGINS: [&InspectApi; 1] = [&RNA_API];

/// Every plugin this crate exports
pub fn plugins() -> &'static [&'static InspectApi] {
    &PLUGINS
}
