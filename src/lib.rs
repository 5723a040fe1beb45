//! Batch referral claimer library.
//!
//! For every bearer token in a list: fetch the account's referrals, report
//! status counts, and claim each claimable referral, optionally routing the
//! account's traffic through its own proxy.

pub mod config;
pub mod http;
pub mod observability;
pub mod proxy;
pub mod referral;
pub mod resilience;
pub mod workflow;

pub use config::ClaimerConfig;
pub use referral::{ReferralApi, ReferralClient};
pub use workflow::{AccountWorkflow, BatchRunner, BatchSummary};
