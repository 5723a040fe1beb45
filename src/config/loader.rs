//! Reads the optional TOML config file.
//!
//! A missing `--config` flag means built-in defaults; a path that was given
//! must exist, parse, and pass validation.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ClaimerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Why a config file was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config {} rejected: {}", .path.display(), join_errors(.errors))]
    Validation {
        path: PathBuf,
        errors: Vec<ValidationError>,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate `path`.
pub fn load_config(path: &Path) -> Result<ClaimerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: ClaimerConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&config).map_err(|errors| ConfigError::Validation {
        path: path.to_path_buf(),
        errors,
    })?;

    Ok(config)
}

/// `load_config` when a path is given, otherwise the defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ClaimerConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ClaimerConfig::default()),
    }
}
