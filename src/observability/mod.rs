//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Workflow / client / executor
//!     → AccountLog (binds index/total)
//!     → LogSink (write-only)
//!     → TracingSink → tracing subscriber (logging.rs)
//! ```
//!
//! # Design Decisions
//! - Core code never talks to the subscriber directly for per-account output
//! - Tests swap in MemorySink to assert on messages

pub mod logging;
pub mod sink;

pub use logging::init_logging;
pub use sink::{AccountLog, LogEntry, LogSink, MemorySink, Severity, TracingSink};
