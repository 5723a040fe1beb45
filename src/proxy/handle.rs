//! A single outbound proxy.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

/// Errors produced while parsing a proxy line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyParseError {
    #[error("empty proxy entry")]
    Empty,

    #[error("unrecognised proxy format '{0}'")]
    Format(String),

    #[error("unsupported proxy scheme '{0}'")]
    Scheme(String),

    #[error("proxy '{0}' has no host or port")]
    MissingAddress(String),
}

/// Parsed proxy URL used to route one account's traffic.
///
/// Accepted forms:
/// - `scheme://[user:pass@]host:port`
/// - `user:pass@host:port`
/// - `host:port`
/// - `host:port:user:pass`
///
/// Entries without a scheme are treated as plain HTTP proxies.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyHandle {
    url: Url,
}

impl ProxyHandle {
    pub fn parse(line: &str) -> Result<Self, ProxyParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ProxyParseError::Empty);
        }

        let normalized = if line.contains("://") || line.contains('@') {
            if line.contains("://") {
                line.to_string()
            } else {
                format!("http://{}", line)
            }
        } else {
            let parts: Vec<&str> = line.split(':').collect();
            match parts.as_slice() {
                [host, port] => format!("http://{}:{}", host, port),
                [host, port, user, pass] => format!("http://{}:{}@{}:{}", user, pass, host, port),
                _ => return Err(ProxyParseError::Format(line.to_string())),
            }
        };

        let url = Url::parse(&normalized).map_err(|_| ProxyParseError::Format(line.to_string()))?;

        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return Err(ProxyParseError::Scheme(url.scheme().to_string()));
        }
        if !url.has_host() || url.port_or_known_default().is_none() {
            return Err(ProxyParseError::MissingAddress(line.to_string()));
        }

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn has_credentials(&self) -> bool {
        !self.url.username().is_empty() || self.url.password().is_some()
    }

    /// Build the reqwest proxy routing all schemes through this handle.
    pub fn to_reqwest(&self) -> reqwest::Result<reqwest::Proxy> {
        reqwest::Proxy::all(self.url.as_str())
    }
}

impl FromStr for ProxyHandle {
    type Err = ProxyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Credentials are masked.
impl fmt::Display for ProxyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = self.url.host_str().unwrap_or_default();
        let port = self.url.port_or_known_default().unwrap_or_default();
        if self.has_credentials() {
            write!(f, "{}://***@{}:{}", self.url.scheme(), host, port)
        } else {
            write!(f, "{}://{}:{}", self.url.scheme(), host, port)
        }
    }
}

impl fmt::Debug for ProxyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProxyHandle").field(&self.to_string()).finish()
    }
}
