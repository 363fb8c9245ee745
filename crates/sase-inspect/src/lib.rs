//! OpenSASE Inspector Framework
//!
//! The contract between the packet engine and pluggable inspectors.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         INSPECTOR HOST                           │
//! │                                                                  │
//! │  InspectApi ──► Module (begin/set/end) ──► Inspector (ctor)      │
//! │                                                │                 │
//! │   ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │   │  Worker 0    │  │  Worker 1    │  │  Worker N    │           │
//! │   │ ThreadContext│  │ ThreadContext│  │ ThreadContext│           │
//! │   │  pegs  perf  │  │  pegs  perf  │  │  pegs  perf  │           │
//! │   └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │          └─────────────────┼─────────────────┘                   │
//! │                            ▼                                     │
//! │                 ModuleStats::snapshot()                          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration is immutable once the inspector exists, so workers read
//! it without locks. Counters are per worker and single-writer; the
//! registry merges them when asked.

pub mod api;
pub mod error;
pub mod host;
pub mod inspector;
pub mod module;
pub mod packet;
pub mod profile;
pub mod stats;

pub use api::{InspectApi, InspectorType, INSAPI_VERSION, PROTO_BIT_ANY_IP};
pub use error::{InspectError, InspectResult};
pub use host::InspectorHandle;
pub use inspector::{Inspector, LogSink, ThreadContext, TracingSink};
pub use module::{downcast_module, find_param, Module, Parameter};
pub use packet::{Packet, PacketFlags, PKT_REBUILT_STREAM};
pub use profile::{Profile, ProfileSnapshot, ProfileStats};
pub use stats::{ModuleStats, PegCounts, PegInfo, PegValue, StatsSnapshot};
