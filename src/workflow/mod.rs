//! Account processing subsystem.
//!
//! # Data Flow
//! ```text
//! token file → batch.rs (load tokens, pick proxy per account)
//!     → account.rs (fetch → tally → claim loop)
//!     → referral::ReferralClient
//! ```
//!
//! # Design Decisions
//! - Accounts run strictly one at a time, in file order
//! - A failing account never stops the batch

pub mod account;
pub mod batch;

pub use account::{Account, AccountWorkflow, WorkflowOutcome};
pub use batch::{
    load_tokens, parse_tokens, BatchError, BatchRunner, BatchSummary, ClientFactory,
    HttpClientFactory,
};
