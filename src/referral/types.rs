//! Referral API data model.
//!
//! Everything here is deserialized leniently: unknown fields are ignored and
//! missing or null fields fall back to defaults, so one odd entry does not
//! discard the whole list.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::observability::AccountLog;

/// Opaque referral identifier, echoed back to the API exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferralId(pub Value);

impl From<&str> for ReferralId {
    fn from(id: &str) -> Self {
        Self(Value::String(id.to_string()))
    }
}

impl fmt::Display for ReferralId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// Referral status as reported by the API.
///
/// Any JSON value is accepted; non-string values land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<Value>")]
pub enum ReferralStatus {
    Pending,
    Success,
    Claimable,
    Other(String),
}

impl Default for ReferralStatus {
    fn default() -> Self {
        ReferralStatus::Other(String::new())
    }
}

impl From<Option<Value>> for ReferralStatus {
    fn from(status: Option<Value>) -> Self {
        match status {
            Some(Value::String(s)) => match s.as_str() {
                "Pending" => ReferralStatus::Pending,
                "Success" => ReferralStatus::Success,
                "Claimable" => ReferralStatus::Claimable,
                _ => ReferralStatus::Other(s),
            },
            None | Some(Value::Null) => ReferralStatus::default(),
            Some(other) => ReferralStatus::Other(other.to_string()),
        }
    }
}

impl From<&str> for ReferralStatus {
    fn from(status: &str) -> Self {
        Self::from(Some(Value::String(status.to_string())))
    }
}

/// `POST /api/users/referrals/claim` request body. A missing id is left out,
/// so the body is `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ClaimRequest<'a> {
    #[serde(rename = "referralId", skip_serializing_if = "Option::is_none")]
    pub referral_id: Option<&'a ReferralId>,
}

/// One referral entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Referral {
    /// `None` when the entry carries no id (or a null one).
    #[serde(default)]
    pub id: Option<ReferralId>,

    #[serde(default)]
    pub status: ReferralStatus,

    #[serde(rename = "canClaim", default, deserialize_with = "strict_true")]
    pub can_claim: bool,
}

impl Referral {
    pub fn new(id: &str, status: &str, can_claim: bool) -> Self {
        Self {
            id: Some(ReferralId::from(id)),
            status: ReferralStatus::from(status),
            can_claim,
        }
    }
}

/// `GET /api/users/referrals` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferralListResponse {
    #[serde(default, deserialize_with = "strict_true")]
    pub success: bool,

    #[serde(default)]
    pub unfiltered: Option<ReferralPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferralPage {
    #[serde(default)]
    pub referrals: Option<Vec<Referral>>,
}

impl ReferralListResponse {
    /// The nested referral list, empty when absent.
    pub fn into_referrals(self) -> Vec<Referral> {
        self.unfiltered.and_then(|page| page.referrals).unwrap_or_default()
    }
}

/// `POST /api/users/referrals/claim` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimResponse {
    #[serde(default, deserialize_with = "strict_true")]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}

/// Only a literal JSON `true` counts; every other value is `false`.
fn strict_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// Counts derived from one fetched referral list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferralStatistics {
    pub total: usize,
    pub pending: usize,
    pub success: usize,
    pub claimable: usize,
    pub can_claim: usize,
}

impl ReferralStatistics {
    pub fn from_referrals(referrals: &[Referral]) -> Self {
        let count = |status: ReferralStatus| {
            referrals.iter().filter(|r| r.status == status).count()
        };

        Self {
            total: referrals.len(),
            pending: count(ReferralStatus::Pending),
            success: count(ReferralStatus::Success),
            claimable: count(ReferralStatus::Claimable),
            can_claim: referrals.iter().filter(|r| r.can_claim).count(),
        }
    }

    pub fn report(&self, log: &AccountLog) {
        log.info("==== Referral Statistics ====");
        log.info(&format!("Total Referrals: {}", self.total));
        log.info(&format!("Pending: {}", self.pending));
        log.success(&format!("Success: {}", self.success));
        log.info(&format!("Claimable: {}", self.claimable));
        log.success(&format!("Can be Claimed: {}", self.can_claim));
        log.info("=============================");
    }
}
