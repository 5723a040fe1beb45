//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! ApiRequest (method, url, headers, bearer, body)
//!     → executor.rs (defaults + identity.rs user agent, send)
//!     → non-2xx or transport error → error.rs → retry (resilience)
//!     → reqwest::Response or None
//! ```

pub mod error;
pub mod executor;
pub mod identity;

pub use error::RequestError;
pub use executor::{ApiRequest, RequestExecutor};
pub use identity::random_user_agent;
