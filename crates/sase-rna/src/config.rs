//! RNA Configuration File
//!
//! Line oriented `<type> <key> <value>` directives:
//!
//! ```text
//! # discovery limits
//! pnd      UpdateTimeout       3600
//! config   MaxHostClientApps   16
//! config   MaxPayloads         100
//! config   MaxHostServices     100
//! config   MaxHostServiceInfo  16
//! protoid  BannerGrab          1
//! ```
//!
//! Parsing starts from the defaults and overrides one field per accepted
//! line. Bad lines are warned about and skipped; unknown directives are
//! skipped silently.

use crate::error::ConfigError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const DEFAULT_UPDATE_TIMEOUT: u32 = 3600;
pub const DEFAULT_MAX_HOST_CLIENT_APPS: u32 = 16;
pub const DEFAULT_MAX_PAYLOADS: u32 = 100;
pub const DEFAULT_MAX_HOST_SERVICES: u32 = 100;
pub const DEFAULT_MAX_HOST_SERVICE_INFO: u32 = 16;

/// Discovery limits and feature flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RnaConfig {
    /// Seconds between host updates
    pub update_timeout: u32,
    pub max_host_client_apps: u32,
    pub max_payloads: u32,
    pub max_host_services: u32,
    pub max_host_service_info: u32,
    /// Collect service banners
    pub enable_banner_grab: bool,
}

impl Default for RnaConfig {
    fn default() -> Self {
        Self {
            update_timeout: DEFAULT_UPDATE_TIMEOUT,
            max_host_client_apps: DEFAULT_MAX_HOST_CLIENT_APPS,
            max_payloads: DEFAULT_MAX_PAYLOADS,
            max_host_services: DEFAULT_MAX_HOST_SERVICES,
            max_host_service_info: DEFAULT_MAX_HOST_SERVICE_INFO,
            enable_banner_grab: false,
        }
    }
}

impl RnaConfig {
    /// Load from file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> LoadReport {
        let path = path.as_ref();
        ConfigLoader::new(path.display().to_string()).load_file(path)
    }
}

/// Recognized directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    UpdateTimeout,
    MaxHostClientApps,
    MaxPayloads,
    MaxHostServices,
    MaxHostServiceInfo,
    BannerGrab,
}

impl Directive {
    /// Exact, case-sensitive match on (type, key)
    pub fn lookup(kind: &str, key: &str) -> Option<Self> {
        match (kind, key) {
            ("pnd", "UpdateTimeout") => Some(Self::UpdateTimeout),
            ("config", "MaxHostClientApps") => Some(Self::MaxHostClientApps),
            ("config", "MaxPayloads") => Some(Self::MaxPayloads),
            ("config", "MaxHostServices") => Some(Self::MaxHostServices),
            ("config", "MaxHostServiceInfo") => Some(Self::MaxHostServiceInfo),
            ("protoid", "BannerGrab") => Some(Self::BannerGrab),
            _ => None,
        }
    }

    fn numeric_field(self, config: &mut RnaConfig) -> Option<&mut u32> {
        match self {
            Self::UpdateTimeout => Some(&mut config.update_timeout),
            Self::MaxHostClientApps => Some(&mut config.max_host_client_apps),
            Self::MaxPayloads => Some(&mut config.max_payloads),
            Self::MaxHostServices => Some(&mut config.max_host_services),
            Self::MaxHostServiceInfo => Some(&mut config.max_host_service_info),
            Self::BannerGrab => None,
        }
    }
}

/// Outcome of a load
#[derive(Debug)]
pub struct LoadReport {
    /// Defaults plus every accepted line
    pub config: RnaConfig,
    /// Per-line problems, in file order
    pub warnings: Vec<ConfigError>,
    /// Set when the file could not be opened
    pub failure: Option<ConfigError>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Line parser bound to a source name used in diagnostics
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    source: String,
}

impl ConfigLoader {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Open and parse a file.
    ///
    /// An open failure is returned in [`LoadReport::failure`] for the
    /// caller to report.
    pub fn load_file(&self, path: &Path) -> LoadReport {
        match File::open(path) {
            Ok(file) => self.parse(BufReader::new(file)),
            Err(source) => {
                let err = ConfigError::Unavailable {
                    path: self.source.clone(),
                    source,
                };
                LoadReport {
                    config: RnaConfig::default(),
                    warnings: Vec::new(),
                    failure: Some(err),
                }
            }
        }
    }

    /// Parse directives from a reader.
    ///
    /// A read error stops parsing; lines accepted before it are kept.
    pub fn parse<R: BufRead>(&self, mut reader: R) -> LoadReport {
        let mut config = RnaConfig::default();
        let mut warnings = Vec::new();
        let mut line_num: u32 = 0;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            line_num = line_num.saturating_add(1);

            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(source) => {
                    let err = ConfigError::Read {
                        line: line_num,
                        path: self.source.clone(),
                        source,
                    };
                    tracing::warn!("{}", err);
                    warnings.push(err);
                    break;
                }
            }

            let text = String::from_utf8_lossy(&buf);
            let line = text.strip_suffix('\n').unwrap_or(text.as_ref());

            if let Err(err) = self.apply_line(&mut config, line, line_num) {
                tracing::warn!("{}", err);
                warnings.push(err);
            }
        }

        LoadReport {
            config,
            warnings,
            failure: None,
        }
    }

    /// Apply one line to the record. Rejected lines leave it untouched.
    pub fn apply_line(
        &self,
        config: &mut RnaConfig,
        line: &str,
        line_num: u32,
    ) -> Result<(), ConfigError> {
        // only column zero starts a comment
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let mut tokens = line.split_whitespace();
        let (Some(kind), Some(key), Some(value)) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(ConfigError::MalformedLine {
                line: line_num,
                path: self.source.clone(),
            });
        };

        let Some(directive) = Directive::lookup(kind, key) else {
            return Ok(());
        };

        if directive == Directive::BannerGrab {
            // "0" leaves the flag as it was; this key never clears it
            if value != "0" {
                config.enable_banner_grab = true;
            }
            return Ok(());
        }

        let parsed = value
            .parse::<u32>()
            .map_err(|source| ConfigError::UnparseableValue {
                line: line_num,
                path: self.source.clone(),
                key: key.to_string(),
                value: value.to_string(),
                source,
            })?;

        if let Some(field) = directive.numeric_field(config) {
            *field = parsed;
        }

        Ok(())
    }
}
