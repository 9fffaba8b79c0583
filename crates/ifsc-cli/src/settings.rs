//! Layered runtime settings.
//!
//! Precedence, lowest first: built-in defaults, the TOML file, then command
//! line flags (clap also reads each flag from its `IFSC_*` variable).

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use ifsc_core::logging_facility::Profile;
use ifsc_core::PaginationConfig;
use serde::Deserialize;
use thiserror::Error;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ifsc.toml";

pub const DEFAULT_DATABASE_PATH: &str = "data/indian_banks.db";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid pagination settings: {0}")]
    Pagination(#[from] ifsc_core::errors::ConfigError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub database_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub log_profile: Profile,
    /// `["*"]` allows any origin; an empty list disables CORS.
    pub cors_origins: Vec<String>,
    pub pagination: PaginationConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_profile: Profile::Development,
            cors_origins: vec!["*".to_string()],
            pagination: PaginationConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, or from `ifsc.toml` if it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        settings.pagination.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
