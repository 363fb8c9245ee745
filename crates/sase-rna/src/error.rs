//! RNA configuration errors
//!
//! None of these are fatal: the loader logs each one and keeps going with
//! whatever record it has.

use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// Configuration loading problem
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be opened
    #[error("RNA: failed to open configuration file '{path}': {source}")]
    Unavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Fewer than three tokens on a line
    #[error("RNA: empty configuration items at line {line} from {path}")]
    MalformedLine { line: u32, path: String },

    /// Numeric directive with a value that is not an unsigned 32-bit integer
    #[error("RNA: invalid value '{value}' for {key} at line {line} from {path}")]
    UnparseableValue {
        line: u32,
        path: String,
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Read failed part way through the file
    #[error("RNA: read error at line {line} from {path}: {source}")]
    Read {
        line: u32,
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    /// Line the problem was found on, if it is line specific
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Unavailable { .. } => None,
            Self::MalformedLine { line, .. }
            | Self::UnparseableValue { line, .. }
            | Self::Read { line, .. } => Some(*line),
        }
    }
}
