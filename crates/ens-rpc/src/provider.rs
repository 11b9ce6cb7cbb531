//! Provider endpoint descriptor

use std::fmt;
use std::time::Duration;

/// Default per-read timeout
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(8);
/// Default number of retries per read after the first try
pub const DEFAULT_RETRIES: u32 = 1;

/// JSON-RPC endpoint plus its read discipline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Display name used in logs and errors
    pub name: String,
    /// HTTP(S) endpoint URL
    pub url: String,
    /// Timeout applied to each remote read
    pub timeout: Duration,
    /// Retries per read on transport failure
    pub retries: u32,
}

impl Provider {
    /// Create provider with default timeout and retry budget
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: display_name(&url),
            url,
            timeout: DEFAULT_READ_TIMEOUT,
            retries: DEFAULT_RETRIES,
        }
    }

    /// Set display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set per-read timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set retry budget
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Host part of the URL, so API keys in paths stay out of logs.
fn display_name(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme);
    // strip userinfo
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    if host.is_empty() {
        url.to_string()
    } else {
        host.to_string()
    }
}
