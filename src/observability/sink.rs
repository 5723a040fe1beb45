//! Account-scoped log sink.
//!
//! The workflow only ever writes `(index, total, message, severity)`
//! tuples; how they are rendered is up to the [`LogSink`] implementation.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Presentation category of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Error,
    /// An operation about to start or in flight.
    Process,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Process => "process",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-only destination for workflow messages.
pub trait LogSink: Send + Sync {
    fn log(&self, index: Option<usize>, total: Option<usize>, message: &str, severity: Severity);
}

/// Renders messages as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, index: Option<usize>, total: Option<usize>, message: &str, severity: Severity) {
        let account = match (index, total) {
            (Some(i), Some(t)) => format!("{}/{}", i, t),
            _ => "-".to_string(),
        };

        match severity {
            Severity::Error => {
                tracing::error!(account = %account, severity = %severity, "{}", message)
            }
            _ => tracing::info!(account = %account, severity = %severity, "{}", message),
        }
    }
}

/// One recorded log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub index: Option<usize>,
    pub total: Option<usize>,
    pub message: String,
    pub severity: Severity,
}

/// Keeps every message in memory. Used by tests to assert on output.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Messages logged for one account index, in order.
    pub fn messages_for(&self, index: usize) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.index == Some(index))
            .map(|e| e.message)
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries().iter().any(|e| e.message.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, index: Option<usize>, total: Option<usize>, message: &str, severity: Severity) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                index,
                total,
                message: message.to_string(),
                severity,
            });
        }
    }
}

/// A sink bound to one account's position in the batch.
#[derive(Clone)]
pub struct AccountLog {
    sink: Arc<dyn LogSink>,
    index: Option<usize>,
    total: Option<usize>,
}

impl AccountLog {
    pub fn new(sink: Arc<dyn LogSink>, index: usize, total: usize) -> Self {
        Self {
            sink,
            index: Some(index),
            total: Some(total),
        }
    }

    /// Messages about the batch as a whole, not tied to an account.
    pub fn batch(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            index: None,
            total: None,
        }
    }

    pub fn log(&self, message: &str, severity: Severity) {
        self.sink.log(self.index, self.total, message, severity);
    }

    pub fn info(&self, message: &str) {
        self.log(message, Severity::Info);
    }

    pub fn success(&self, message: &str) {
        self.log(message, Severity::Success);
    }

    pub fn error(&self, message: &str) {
        self.log(message, Severity::Error);
    }

    pub fn process(&self, message: &str) {
        self.log(message, Severity::Process);
    }
}

impl fmt::Debug for AccountLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountLog")
            .field("index", &self.index)
            .field("total", &self.total)
            .finish()
    }
}
