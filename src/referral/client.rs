//! Referral API client.
//!
//! # Responsibilities
//! - Fetch the account's referral list
//! - Claim a single referral by id
//!
//! Neither call ever fails towards its caller. Exhausted retries, a
//! `success` flag other than `true`, and undecodable bodies are all logged
//! and reported as "no data" (`None` / `false`).

use crate::config::ClaimerConfig;
use crate::http::{ApiRequest, RequestError, RequestExecutor};
use crate::observability::AccountLog;
use crate::proxy::ProxyHandle;
use crate::referral::types::{
    ClaimRequest, ClaimResponse, Referral, ReferralId, ReferralListResponse,
};
use crate::referral::ReferralApi;

const REFERRALS_PATH: &str = "/api/users/referrals";
const CLAIM_PATH: &str = "/api/users/referrals/claim";

/// Log form of an optional id.
fn display_id(referral_id: Option<&ReferralId>) -> String {
    referral_id.map_or_else(|| "<none>".to_string(), ToString::to_string)
}

/// Referral API client bound to one account's network identity.
#[derive(Debug)]
pub struct ReferralClient {
    executor: RequestExecutor,
    base_url: String,
    log: AccountLog,
}

impl ReferralClient {
    /// Build a client for one account.
    pub fn new(
        proxy: Option<&ProxyHandle>,
        config: &ClaimerConfig,
        log: AccountLog,
    ) -> Result<Self, RequestError> {
        let executor = RequestExecutor::new(proxy, config, log.clone())?;
        Ok(Self::with_executor(executor, &config.api.base_url, log))
    }

    pub fn with_executor(executor: RequestExecutor, base_url: &str, log: AccountLog) -> Self {
        Self {
            executor,
            base_url: base_url.trim_end_matches('/').to_string(),
            log,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ReferralApi for ReferralClient {
    async fn fetch_referrals(&self, token: &str) -> Option<Vec<Referral>> {
        self.log.process("Trying to get referral data...");

        let request = ApiRequest::get(self.endpoint(REFERRALS_PATH)).bearer(token);

        let Some(response) = self.executor.execute(&request).await else {
            self.log.error("Failed to get referral data.");
            return None;
        };

        match response.json::<ReferralListResponse>().await {
            Ok(body) if body.success => {
                let referrals = body.into_referrals();
                self.log.success(&format!(
                    "Referral data received. Total referrals: {}",
                    referrals.len()
                ));
                Some(referrals)
            }
            Ok(_) => {
                self.log.error("Failed to get referral data.");
                None
            }
            Err(e) => {
                self.log
                    .error(&format!("Error getting referral data, message: {}", e));
                None
            }
        }
    }

    async fn claim_referral(&self, token: &str, referral_id: Option<&ReferralId>) -> bool {
        let body = match serde_json::to_value(ClaimRequest { referral_id }) {
            Ok(body) => body,
            Err(e) => {
                self.log
                    .error(&format!("Error claiming referral, message: {}", e));
                return false;
            }
        };
        let request = ApiRequest::post(self.endpoint(CLAIM_PATH))
            .bearer(token)
            .json(body);
        let shown_id = display_id(referral_id);

        let Some(response) = self.executor.execute(&request).await else {
            self.log.error(&format!("Failed to claim referral {}", shown_id));
            return false;
        };

        match response.json::<ClaimResponse>().await {
            Ok(body) if body.success => {
                let message = body.message.unwrap_or_else(|| "Referral claimed".to_string());
                self.log.success(&message);
                true
            }
            Ok(body) => {
                let reason = body.message.unwrap_or_else(|| "no message".to_string());
                self.log
                    .error(&format!("Claim rejected for referral {}: {}", shown_id, reason));
                false
            }
            Err(e) => {
                self.log
                    .error(&format!("Error claiming referral, message: {}", e));
                false
            }
        }
    }
}
