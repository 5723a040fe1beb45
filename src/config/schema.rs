//! Configuration schema definitions.
//!
//! Every section carries defaults matching the stock behaviour of the
//! claimer, so an empty TOML file (or no file at all) is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration for the referral claimer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClaimerConfig {
    /// Remote API settings.
    pub api: ApiConfig,

    /// Retry policy for every API request.
    pub retries: RetryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Claim loop pacing.
    pub claims: ClaimConfig,

    /// Input file locations.
    pub input: InputConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host the endpoint paths are appended to.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.teneo.pro".to_string(),
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per request, including the first.
    pub max_attempts: u32,

    /// Fixed pause between attempts in milliseconds.
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_ms: 12_000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Claim loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClaimConfig {
    /// Pause after each claim attempt in milliseconds.
    pub delay_ms: u64,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self { delay_ms: 2_000 }
    }
}

/// Input file locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// Newline-separated bearer tokens, one account per line.
    pub tokens_path: String,

    /// Newline-separated proxy list. A missing file means no proxies.
    pub proxies_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            tokens_path: "token.txt".to_string(),
            proxies_path: "proxy.txt".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
