//! Module option layer
//!
//! A module is the configuration half of a plugin. The host runs one
//! `begin` / `set`* / `end` pass over it, then hands it to the inspector
//! constructor, which takes whatever the pass produced.

use crate::error::{InspectError, InspectResult};
use crate::stats::PegInfo;
use std::any::Any;

/// Declared module parameter (string valued)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub default: &'static str,
    pub help: &'static str,
}

impl Parameter {
    pub const fn new(name: &'static str, default: &'static str, help: &'static str) -> Self {
        Self {
            name,
            default,
            help,
        }
    }
}

/// Find a declared parameter by exact name
pub fn find_param<'a>(params: &'a [Parameter], name: &str) -> Option<&'a Parameter> {
    params.iter().find(|p| p.name == name)
}

/// Configuration half of a plugin
pub trait Module: Any + Send + Sync {
    fn name(&self) -> &'static str;

    fn help(&self) -> &'static str;

    fn params(&self) -> &'static [Parameter];

    fn pegs(&self) -> &'static [PegInfo] {
        &[]
    }

    fn profile_name(&self) -> &'static str {
        self.name()
    }

    /// Start a configuration pass
    fn begin(&mut self) -> InspectResult<()>;

    /// Assign one parameter
    fn set(&mut self, param: &str, value: &str) -> InspectResult<()>;

    /// Finish the configuration pass
    fn end(&mut self) -> InspectResult<()>;

    /// Recover the concrete module in an inspector constructor
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Downcast a module handed to an inspector constructor
pub fn downcast_module<'a, M: Module>(
    api: &'static str,
    module: &'a mut dyn Module,
) -> InspectResult<&'a mut M> {
    let name = module.name();
    module
        .as_any_mut()
        .downcast_mut::<M>()
        .ok_or(InspectError::ModuleMismatch { api, module: name })
}
