//! Batch runner.
//!
//! Reads the token file, assigns each account a proxy and runs the account
//! workflows one after another. Only an unreadable token file aborts the
//! run; every per-account problem is logged and the batch moves on.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::ClaimerConfig;
use crate::http::RequestError;
use crate::observability::{AccountLog, LogSink};
use crate::proxy::{ProxyHandle, ProxyPool};
use crate::referral::{ReferralApi, ReferralClient};
use crate::workflow::account::{Account, AccountWorkflow, WorkflowOutcome};

/// Errors that abort the whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read token file {}: {}", .path.display(), .source)]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    /// Accounts whose workflow ran to completion.
    pub successful: usize,
    pub outcomes: Vec<Option<WorkflowOutcome>>,
}

/// Read bearer tokens, one per line. Blank lines are dropped.
pub fn load_tokens(path: &Path) -> Result<Vec<String>, BatchError> {
    let content = fs::read_to_string(path).map_err(|source| BatchError::TokenFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_tokens(&content))
}

pub fn parse_tokens(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds the per-account API client.
pub trait ClientFactory {
    type Api: ReferralApi;

    fn build(
        &self,
        proxy: Option<&ProxyHandle>,
        config: &ClaimerConfig,
        log: AccountLog,
    ) -> Result<Self::Api, RequestError>;
}

/// Real HTTP clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClientFactory;

impl ClientFactory for HttpClientFactory {
    type Api = ReferralClient;

    fn build(
        &self,
        proxy: Option<&ProxyHandle>,
        config: &ClaimerConfig,
        log: AccountLog,
    ) -> Result<ReferralClient, RequestError> {
        ReferralClient::new(proxy, config, log)
    }
}

/// Processes every account of a token file sequentially.
pub struct BatchRunner<F = HttpClientFactory> {
    config: ClaimerConfig,
    sink: Arc<dyn LogSink>,
    factory: F,
}

impl BatchRunner {
    pub fn new(config: ClaimerConfig, sink: Arc<dyn LogSink>) -> Self {
        Self::with_factory(config, sink, HttpClientFactory)
    }
}

impl<F: ClientFactory> BatchRunner<F> {
    pub fn with_factory(config: ClaimerConfig, sink: Arc<dyn LogSink>, factory: F) -> Self {
        Self {
            config,
            sink,
            factory,
        }
    }

    pub async fn run(&self) -> Result<BatchSummary, BatchError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("batch", run_id = %run_id);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> Result<BatchSummary, BatchError> {
        let batch_log = AccountLog::batch(self.sink.clone());

        let tokens = load_tokens(Path::new(&self.config.input.tokens_path))?;
        let total = tokens.len();

        if total == 0 {
            batch_log.error("No accounts found");
            return Ok(BatchSummary::default());
        }
        batch_log.info(&format!("Found {} accounts", total));

        let proxies = ProxyPool::load(Path::new(&self.config.input.proxies_path));
        if proxies.is_loaded() {
            batch_log.info(&format!("Loaded {} proxies", proxies.len()));
        } else {
            batch_log.error("No proxies found");
        }

        let claim_delay = Duration::from_millis(self.config.claims.delay_ms);
        let mut summary = BatchSummary {
            total,
            ..BatchSummary::default()
        };

        for (i, token) in tokens.into_iter().enumerate() {
            let index = i + 1;
            let log = AccountLog::new(self.sink.clone(), index, total);
            log.info("Processing account");

            let proxy = proxies.get_random_proxy(index, total);
            match &proxy {
                Some(p) => log.info(&format!("Using proxy {}", p)),
                None => log.info("Using direct connection"),
            }

            let client = match self.factory.build(proxy.as_ref(), &self.config, log.clone()) {
                Ok(client) => client,
                Err(e) => {
                    log.error(&format!("Skipping account: {}", e));
                    summary.outcomes.push(None);
                    continue;
                }
            };

            let account = Account::new(token, proxy, index, total);
            let workflow = AccountWorkflow::new(account, client, log, claim_delay);
            let outcome = workflow
                .run()
                .instrument(tracing::info_span!("account", index))
                .await;

            summary.successful += 1;
            summary.outcomes.push(Some(outcome));
        }

        batch_log.success(&format!(
            "Batch complete: {}/{} accounts processed",
            summary.successful, summary.total
        ));

        Ok(summary)
    }
}
