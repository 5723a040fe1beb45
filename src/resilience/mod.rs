//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to the referral API:
//!     → per-client timeout (set once on the reqwest client)
//!     → On failure: retries.rs (fixed delay, bounded attempts)
//!     → Exhausted: caller receives no result
//! ```

pub mod retries;

pub use retries::RetryPolicy;
