//! Proxy pool management.
//!
//! # Responsibilities
//! - Load proxy entries from a newline-separated file
//! - Hand out one proxy per account

use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;

use crate::proxy::handle::ProxyHandle;

/// Read-only list of proxies for a batch run.
#[derive(Debug, Clone, Default)]
pub struct ProxyPool {
    proxies: Vec<ProxyHandle>,
}

impl ProxyPool {
    pub fn new(proxies: Vec<ProxyHandle>) -> Self {
        Self { proxies }
    }

    /// Load proxies from `path`.
    ///
    /// A missing file yields an empty pool. Blank lines and `#` comments are
    /// ignored; unparseable entries are logged and skipped.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Proxy file not readable");
                return Self::default();
            }
        };

        Self::from_lines(&content)
    }

    pub fn from_lines(content: &str) -> Self {
        let mut proxies = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match ProxyHandle::parse(line) {
                Ok(proxy) => proxies.push(proxy),
                Err(e) => {
                    tracing::warn!(line = line_no + 1, error = %e, "Skipping invalid proxy entry")
                }
            }
        }

        Self { proxies }
    }

    /// Whether any proxy was loaded.
    pub fn is_loaded(&self) -> bool {
        !self.proxies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Proxy for the account at 1-based `index` of `total`.
    ///
    /// With at least one proxy per account every account gets its own entry;
    /// otherwise the pick is uniformly random.
    pub fn get_random_proxy(&self, index: usize, total: usize) -> Option<ProxyHandle> {
        if self.proxies.is_empty() {
            return None;
        }

        if index >= 1 && self.proxies.len() >= total && index <= self.proxies.len() {
            return Some(self.proxies[index - 1].clone());
        }

        self.proxies.choose(&mut rand::thread_rng()).cloned()
    }
}
