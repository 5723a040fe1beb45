//! Configuration validation.
//!
//! Serde handles the syntax; this pass checks value ranges and returns
//! every violation rather than stopping at the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::ClaimerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("retries.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroTimeout,

    #[error("api.base_url '{0}' is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("input.tokens_path must not be empty")]
    EmptyTokensPath,
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ClaimerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let base_ok = Url::parse(&config.api.base_url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false);
    if !base_ok {
        errors.push(ValidationError::InvalidBaseUrl(config.api.base_url.clone()));
    }

    if config.input.tokens_path.trim().is_empty() {
        errors.push(ValidationError::EmptyTokensPath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
