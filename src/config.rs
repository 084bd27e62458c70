//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::http::RetryPolicy;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.blazeverify.com/v1";

/// Retries after the first failed attempt.
pub const DEFAULT_MAX_NETWORK_RETRIES: u32 = 1;

/// Settings shared by every call a [`Client`](crate::Client) makes.
///
/// A `Config` is an immutable value once handed to a client; build a new one
/// to change settings.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub max_network_retries: u32,
    /// Pause between retries.
    pub retry_delay: Duration,
    /// Transport-level timeout for a single attempt; `None` leaves reqwest's default.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_network_retries: DEFAULT_MAX_NETWORK_RETRIES,
            retry_delay: Duration::ZERO,
            request_timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_network_retries(mut self, retries: u32) -> Self {
        self.max_network_retries = retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub(crate) fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_network_retries: self.max_network_retries,
            delay: self.retry_delay,
        }
    }

    /// Builds the full URL for an endpoint such as `verify`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("API key is empty".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("base URL is empty".to_string()));
        }
        Ok(())
    }

    /// API key with everything but the edges masked, for logging.
    pub(crate) fn masked_api_key(&self) -> String {
        let key = &self.api_key;
        let chars: Vec<char> = key.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}*********{}", head, tail)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.masked_api_key())
            .field("base_url", &self.base_url)
            .field("max_network_retries", &self.max_network_retries)
            .field("retry_delay", &self.retry_delay)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
