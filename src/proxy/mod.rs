//! Outbound proxy subsystem.
//!
//! # Data Flow
//! ```text
//! proxy file (optional)
//!     → pool.rs (load, skip invalid lines)
//!     → handle.rs (parse into ProxyHandle)
//!     → batch runner asks for one proxy per account
//!     → reqwest client for that account routes through it
//! ```

pub mod handle;
pub mod pool;

pub use handle::{ProxyHandle, ProxyParseError};
pub use pool::ProxyPool;
