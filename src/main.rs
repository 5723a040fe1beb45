//! Batch referral claimer (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!   token.txt ──▶ BatchRunner ──▶ Account (token, proxy, index/total)
//!                     │                    │
//!   proxy.txt ──▶ ProxyPool                ▼
//!                                   AccountWorkflow
//!                                          │ fetch → tally → claim loop
//!                                          ▼
//!                                   ReferralClient
//!                                          │
//!                                          ▼
//!                                   RequestExecutor ──▶ referral API
//!                                   (retry, user agent, proxy, timeout)
//! ```
//!
//! Accounts are processed strictly one at a time.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use referral_claimer::config::{load_or_default, ClaimerConfig};
use referral_claimer::observability::{init_logging, TracingSink};
use referral_claimer::BatchRunner;

#[derive(Parser, Debug)]
#[command(name = "referral-claimer")]
#[command(about = "Claim referral rewards for a list of accounts", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Token file, one bearer token per line (overrides config).
    #[arg(short, long)]
    tokens: Option<PathBuf>,

    /// Proxy file, one proxy per line (overrides config).
    #[arg(short, long)]
    proxies: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ClaimerConfig::default().observability);
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Some(tokens) = cli.tokens {
        config.input.tokens_path = tokens.to_string_lossy().into_owned();
    }
    if let Some(proxies) = cli.proxies {
        config.input.proxies_path = proxies.to_string_lossy().into_owned();
    }

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api = %config.api.base_url,
        max_attempts = config.retries.max_attempts,
        retry_delay_ms = config.retries.delay_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "referral-claimer starting"
    );

    let runner = BatchRunner::new(config, Arc::new(TracingSink));
    match runner.run().await {
        Ok(summary) => {
            tracing::info!(
                total = summary.total,
                successful = summary.successful,
                "Run finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            ExitCode::FAILURE
        }
    }
}
