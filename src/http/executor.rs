//! Retrying HTTP request executor.
//!
//! # Responsibilities
//! - Own one reqwest client per account (timeout, optional proxy)
//! - Attach a fresh user agent and the JSON content type to every attempt
//! - Retry any failure on a fixed delay, then give up with no result

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tokio::time::sleep;

use crate::config::ClaimerConfig;
use crate::http::error::RequestError;
use crate::http::identity::random_user_agent;
use crate::observability::AccountLog;
use crate::proxy::ProxyHandle;
use crate::resilience::RetryPolicy;

/// Description of a request, replayed verbatim on every attempt.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Merged over the default headers.
    pub headers: HeaderMap,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            bearer: None,
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Issues requests for one account and retries them on failure.
pub struct RequestExecutor {
    client: Client,
    policy: RetryPolicy,
    log: AccountLog,
}

impl RequestExecutor {
    /// Build the executor for an account, routing through `proxy` when given.
    pub fn new(
        proxy: Option<&ProxyHandle>,
        config: &ClaimerConfig,
        log: AccountLog,
    ) -> Result<Self, RequestError> {
        let timeout = Duration::from_secs(config.timeouts.request_secs);
        let mut builder = Client::builder().timeout(timeout);

        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy.to_reqwest().map_err(RequestError::Build)?);
        } else {
            builder = builder.no_proxy();
        }

        let client = builder.build().map_err(RequestError::Build)?;

        Ok(Self::from_client(client, RetryPolicy::from(&config.retries), log))
    }

    pub fn from_client(client: Client, policy: RetryPolicy, log: AccountLog) -> Self {
        Self { client, policy, log }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Execute with the configured attempt count.
    pub async fn execute(&self, request: &ApiRequest) -> Option<Response> {
        self.execute_with_attempts(request, self.policy.max_attempts).await
    }

    /// Execute with an explicit attempt budget.
    ///
    /// Returns the first 2xx response, or `None` once every attempt failed.
    /// Never returns an error: exhaustion means "nothing to process".
    pub async fn execute_with_attempts(
        &self,
        request: &ApiRequest,
        max_attempts: u32,
    ) -> Option<Response> {
        let policy = self.policy.with_attempts(max_attempts);

        for attempt in 1..=policy.max_attempts {
            match self.attempt(request).await {
                Ok(response) => return Some(response),
                Err(e) => {
                    self.log.error(&e.to_string());
                    tracing::debug!(
                        method = %request.method,
                        url = %request.url,
                        attempt,
                        max_attempts = policy.max_attempts,
                        status = ?e.status(),
                        "Request attempt failed"
                    );

                    match policy.delay_after(attempt) {
                        Some(delay) => {
                            self.log.process("Retrying request...");
                            sleep(delay).await;
                        }
                        None => {
                            self.log.error(&format!(
                                "Request failed after {} attempts",
                                policy.max_attempts
                            ));
                        }
                    }
                }
            }
        }

        None
    }

    async fn attempt(&self, request: &ApiRequest) -> Result<Response, RequestError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(attempt_headers(request));

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestError::Status { status, body });
        }

        Ok(response)
    }
}

/// Default headers with the caller's headers laid over them. A caller name
/// replaces the default entirely and keeps all of its values.
fn attempt_headers(request: &ApiRequest) -> HeaderMap {
    let mut headers = HeaderMap::new();
    // A generated agent is always a valid header value; skip it if not.
    if let Ok(agent) = HeaderValue::from_str(&random_user_agent()) {
        headers.insert(USER_AGENT, agent);
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.extend(request.headers.clone());
    headers
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("policy", &self.policy)
            .field("log", &self.log)
            .finish()
    }
}
