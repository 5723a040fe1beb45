//! Referral subsystem.
//!
//! # Data Flow
//! ```text
//! AccountWorkflow
//!     → ReferralApi (trait seam)
//!     → client.rs (ReferralClient)
//!     → http::RequestExecutor
//!     → JSON body → types.rs
//! ```

use std::future::Future;

pub mod client;
pub mod types;

pub use client::ReferralClient;
pub use types::{
    ClaimRequest, ClaimResponse, Referral, ReferralId, ReferralListResponse, ReferralStatistics,
    ReferralStatus,
};

/// Operations the account workflow needs from the referral API.
///
/// Implementations log their own failures and never surface errors:
/// `None` from a fetch and `false` from a claim both mean "nothing usable".
pub trait ReferralApi {
    /// Fetch all referrals for `token`.
    fn fetch_referrals(
        &self,
        token: &str,
    ) -> impl Future<Output = Option<Vec<Referral>>> + Send;

    /// Claim one referral; `true` when the API flagged success.
    ///
    /// A `None` id is still submitted, with no `referralId` in the body.
    fn claim_referral(
        &self,
        token: &str,
        referral_id: Option<&ReferralId>,
    ) -> impl Future<Output = bool> + Send;
}
