//! Error types for the inspector framework

use thiserror::Error;

/// Inspector framework error type
#[derive(Error, Debug)]
pub enum InspectError {
    /// Parameter name not declared by the module
    #[error("{module}: unknown parameter '{param}'")]
    UnknownParameter { module: &'static str, param: String },

    /// `set` called outside a `begin`/`end` pass
    #[error("{module}: parameter '{param}' set outside of a configuration pass")]
    NotConfiguring { module: &'static str, param: String },

    /// Inspector constructor was handed a module of another plugin
    #[error("{api}: constructor received module '{module}'")]
    ModuleMismatch {
        api: &'static str,
        module: &'static str,
    },

    /// Plugin built against another API revision
    #[error("{api}: api version {found}, host expects {expected}")]
    VersionMismatch {
        api: &'static str,
        found: u32,
        expected: u32,
    },

    /// Worker thread could not be spawned
    #[error("failed to spawn worker: {0}")]
    SpawnFailed(String),

    /// A worker thread panicked while driving the hooks
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),
}

/// Result type for the inspector framework
pub type InspectResult<T> = Result<T, InspectError>;
