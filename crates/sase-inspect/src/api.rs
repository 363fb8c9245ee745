//! Plugin descriptor table
//!
//! Static metadata plus constructor pointers the host uses to build a
//! module and its inspector. Teardown is ownership: dropping the boxes
//! releases them, `pterm` runs once the host is done with the plugin.

use crate::error::{InspectError, InspectResult};
use crate::inspector::Inspector;
use crate::module::Module;

/// Inspector API revision understood by this host
pub const INSAPI_VERSION: u32 = 1;

pub const PROTO_BIT_NONE: u16 = 0x0000;
pub const PROTO_BIT_IP: u16 = 0x0001;
pub const PROTO_BIT_ICMP: u16 = 0x0002;
pub const PROTO_BIT_TCP: u16 = 0x0004;
pub const PROTO_BIT_UDP: u16 = 0x0008;
pub const PROTO_BIT_ANY_IP: u16 = PROTO_BIT_IP | PROTO_BIT_ICMP | PROTO_BIT_TCP | PROTO_BIT_UDP;

/// Where the host places the inspector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectorType {
    /// Raw packet processing
    Packet,
    /// Application service inspection
    Service,
    /// Runs on every packet after detection
    Control,
    /// Periodic / out-of-band
    Probe,
}

/// Module constructor
pub type ModCtor = fn() -> Box<dyn Module>;

/// Inspector constructor; receives the configured module
pub type InspectorCtor = fn(&mut dyn Module) -> InspectResult<Box<dyn Inspector>>;

/// Plugin descriptor
pub struct InspectApi {
    pub name: &'static str,
    pub help: &'static str,
    pub api_version: u32,
    pub kind: InspectorType,
    pub proto_bits: u16,
    pub mod_ctor: ModCtor,
    /// Global init, once per plugin before any module is built
    pub pinit: Option<fn()>,
    /// Global cleanup, once after the last inspector is gone
    pub pterm: Option<fn()>,
    pub ctor: InspectorCtor,
}

impl std::fmt::Debug for InspectApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InspectApi")
            .field("name", &self.name)
            .field("api_version", &self.api_version)
            .field("kind", &self.kind)
            .field("proto_bits", &format_args!("{:#06x}", self.proto_bits))
            .finish_non_exhaustive()
    }
}

impl InspectApi {
    /// Reject plugins built against another API revision
    pub fn check_version(&self) -> InspectResult<()> {
        if self.api_version != INSAPI_VERSION {
            return Err(InspectError::VersionMismatch {
                api: self.name,
                found: self.api_version,
                expected: INSAPI_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::{LogSink, ThreadContext};
    use crate::module::Parameter;
    use crate::packet::Packet;
    use std::any::Any;

    struct NullModule;

    impl Module for NullModule {
        fn name(&self) -> &'static str {
            "null"
        }
        fn help(&self) -> &'static str {
            "does nothing"
        }
        fn params(&self) -> &'static [Parameter] {
            &[]
        }
        fn begin(&mut self) -> InspectResult<()> {
            Ok(())
        }
        fn set(&mut self, param: &str, _value: &str) -> InspectResult<()> {
            Err(InspectError::UnknownParameter {
                module: "null",
                param: param.into(),
            })
        }
        fn end(&mut self) -> InspectResult<()> {
            Ok(())
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct NullInspector;

    impl Inspector for NullInspector {
        fn name(&self) -> &'static str {
            "null"
        }
        fn eval(&self, _packet: &Packet, _ctx: &mut ThreadContext) {}
        fn show(&self, _sink: &mut dyn LogSink) {}
    }

    fn null_mod_ctor() -> Box<dyn Module> {
        Box::new(NullModule)
    }

    fn null_ctor(_m: &mut dyn Module) -> InspectResult<Box<dyn Inspector>> {
        Ok(Box::new(NullInspector))
    }

    #[test]
    fn test_version_check() {
        let mut api = InspectApi {
            name: "null",
            help: "does nothing",
            api_version: INSAPI_VERSION,
            kind: InspectorType::Packet,
            proto_bits: PROTO_BIT_TCP,
            mod_ctor: null_mod_ctor,
            pinit: None,
            pterm: None,
            ctor: null_ctor,
        };
        assert!(api.check_version().is_ok());

        api.api_version = INSAPI_VERSION + 1;
        assert!(matches!(
            api.check_version(),
            Err(InspectError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_any_ip() {
        for bit in [PROTO_BIT_IP, PROTO_BIT_ICMP, PROTO_BIT_TCP, PROTO_BIT_UDP] {
            assert_eq!(PROTO_BIT_ANY_IP & bit, bit);
        }
        assert_eq!(PROTO_BIT_ANY_IP & PROTO_BIT_NONE, 0);
    }
}
