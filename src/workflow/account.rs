//! Per-account claim workflow.
//!
//! # States
//! ```text
//! Start → Fetched → Tallied → Claiming → Done
//!   │        │          │
//!   └────────┴──────────┴──→ early exit (no data, nothing claimable)
//! ```
//!
//! Claims run sequentially in list order with a fixed pause after each,
//! whatever the individual claim outcome. There is no verification
//! re-fetch afterwards.

use std::fmt;
use std::time::Duration;

use tokio::time::sleep;

use crate::observability::AccountLog;
use crate::proxy::ProxyHandle;
use crate::referral::{ReferralApi, ReferralStatistics};

/// One account of the batch.
#[derive(Clone)]
pub struct Account {
    pub token: String,
    pub proxy: Option<ProxyHandle>,
    /// 1-based position in the batch.
    pub index: usize,
    pub total: usize,
}

impl Account {
    pub fn new(
        token: impl Into<String>,
        proxy: Option<ProxyHandle>,
        index: usize,
        total: usize,
    ) -> Self {
        Self {
            token: token.into(),
            proxy,
            index,
            total,
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("token", &"<redacted>")
            .field("proxy", &self.proxy)
            .field("index", &self.index)
            .field("total", &self.total)
            .finish()
    }
}

/// How a workflow run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The fetch failed or returned an empty list.
    NoReferrals,
    /// Referrals exist but none can be claimed.
    NothingClaimable { stats: ReferralStatistics },
    /// Every claimable referral was attempted once.
    Claimed {
        stats: ReferralStatistics,
        attempted: usize,
        succeeded: usize,
    },
}

/// Runs fetch → tally → claim for a single account.
pub struct AccountWorkflow<A> {
    account: Account,
    api: A,
    log: AccountLog,
    claim_delay: Duration,
}

impl<A: ReferralApi> AccountWorkflow<A> {
    pub fn new(account: Account, api: A, log: AccountLog, claim_delay: Duration) -> Self {
        Self {
            account,
            api,
            log,
            claim_delay,
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub async fn run(&self) -> WorkflowOutcome {
        let token = self.account.token.as_str();

        let referrals = match self.api.fetch_referrals(token).await {
            Some(referrals) if !referrals.is_empty() => referrals,
            _ => {
                self.log.error("No referral data found.");
                return WorkflowOutcome::NoReferrals;
            }
        };

        let stats = ReferralStatistics::from_referrals(&referrals);
        stats.report(&self.log);

        let claimable: Vec<_> = referrals.iter().filter(|r| r.can_claim).collect();
        let total_claims = claimable.len();

        if total_claims == 0 {
            self.log.info("No claimable referrals.");
            return WorkflowOutcome::NothingClaimable { stats };
        }

        let mut succeeded = 0;
        for (i, referral) in claimable.iter().enumerate() {
            self.log
                .process(&format!("Trying to claim referral {}/{}", i + 1, total_claims));

            if self.api.claim_referral(token, referral.id.as_ref()).await {
                succeeded += 1;
            }

            sleep(self.claim_delay).await;
        }

        tracing::debug!(
            index = self.account.index,
            attempted = total_claims,
            succeeded,
            "Claim loop finished"
        );
        self.log.success("All claimable referrals processed.");

        WorkflowOutcome::Claimed {
            stats,
            attempted: total_claims,
            succeeded,
        }
    }
}
