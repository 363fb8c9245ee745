//! RNA module: parameters, pegs and the module descriptor

use sase_inspect::{find_param, InspectError, InspectResult, Module, Parameter, PegInfo};
use std::any::Any;

pub const RNA_NAME: &str = "rna";
pub const RNA_HELP: &str = "Real-time network awareness module";

static RNA_PARAMS: &[Parameter] = &[
    Parameter::new("rna_conf_path", "", "path to rna configuration"),
    Parameter::new(
        "rna_util_lib_path",
        "",
        "path to library for utilities such as fingerprint decoder",
    ),
    Parameter::new("fingerprint_dir", "", "directory to fingerprint patterns"),
    Parameter::new("custom_fingerprint_dir", "", "directory to custom fingerprint patterns"),
];

pub static RNA_PEGS: &[PegInfo] = &[PegInfo::new("total_packets", "count of packets received")];

/// Index of `total_packets` in [`RNA_PEGS`]
pub const PEG_TOTAL_PACKETS: usize = 0;

/// Host-supplied paths; read-only once the inspector owns it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RnaModuleConfig {
    pub rna_conf_path: String,
    pub rna_util_lib_path: String,
    pub fingerprint_dir: String,
    pub custom_fingerprint_dir: String,
}

/// Option layer for the RNA inspector
#[derive(Debug, Default)]
pub struct RnaModule {
    mod_conf: Option<RnaModuleConfig>,
    configuring: bool,
}

impl RnaModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand the descriptor to the inspector.
    ///
    /// Without a prior configuration pass this yields an empty descriptor.
    pub fn take_config(&mut self) -> RnaModuleConfig {
        self.mod_conf.take().unwrap_or_default()
    }
}

impl Module for RnaModule {
    fn name(&self) -> &'static str {
        RNA_NAME
    }

    fn help(&self) -> &'static str {
        RNA_HELP
    }

    fn params(&self) -> &'static [Parameter] {
        RNA_PARAMS
    }

    fn pegs(&self) -> &'static [PegInfo] {
        RNA_PEGS
    }

    fn begin(&mut self) -> InspectResult<()> {
        self.mod_conf.get_or_insert_with(RnaModuleConfig::default);
        self.configuring = true;
        Ok(())
    }

    fn set(&mut self, param: &str, value: &str) -> InspectResult<()> {
        if find_param(RNA_PARAMS, param).is_none() {
            return Err(InspectError::UnknownParameter {
                module: RNA_NAME,
                param: param.to_string(),
            });
        }
        if !self.configuring {
            return Err(InspectError::NotConfiguring {
                module: RNA_NAME,
                param: param.to_string(),
            });
        }

        let conf = self.mod_conf.get_or_insert_with(RnaModuleConfig::default);
        let field = match param {
            "rna_conf_path" => &mut conf.rna_conf_path,
            "rna_util_lib_path" => &mut conf.rna_util_lib_path,
            "fingerprint_dir" => &mut conf.fingerprint_dir,
            _ => &mut conf.custom_fingerprint_dir,
        };
        *field = value.to_string();

        Ok(())
    }

    fn end(&mut self) -> InspectResult<()> {
        self.configuring = false;
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_pass() {
        let mut module = RnaModule::new();
        module.begin().unwrap();
        module.set("rna_conf_path", "/etc/rna/rna.conf").unwrap();
        module.set("rna_util_lib_path", "/usr/lib/rna_util.so").unwrap();
        module.set("fingerprint_dir", "/etc/rna/fp").unwrap();
        module.set("custom_fingerprint_dir", "/etc/rna/custom").unwrap();
        module.end().unwrap();

        assert_eq!(
            module.take_config(),
            RnaModuleConfig {
                rna_conf_path: "/etc/rna/rna.conf".into(),
                rna_util_lib_path: "/usr/lib/rna_util.so".into(),
                fingerprint_dir: "/etc/rna/fp".into(),
                custom_fingerprint_dir: "/etc/rna/custom".into(),
            }
        );

        // ownership moved out with the first take
        assert_eq!(module.take_config(), RnaModuleConfig::default());
    }

    #[test]
    fn test_rejects_unknown_and_out_of_pass() {
        let mut module = RnaModule::new();
        assert!(matches!(
            module.set("rna_conf_path", "x"),
            Err(InspectError::NotConfiguring { .. })
        ));

        module.begin().unwrap();
        assert!(matches!(
            module.set("UpdateTimeout", "5"),
            Err(InspectError::UnknownParameter { module: "rna", .. })
        ));
        module.end().unwrap();
    }

    #[test]
    fn test_metadata() {
        let module = RnaModule::new();
        assert_eq!(module.name(), "rna");
        assert_eq!(module.profile_name(), "rna");
        assert_eq!(module.params().len(), 4);
        assert!(module.params().iter().all(|p| p.default.is_empty()));
        assert_eq!(module.pegs()[PEG_TOTAL_PACKETS].name, "total_packets");
    }
}
