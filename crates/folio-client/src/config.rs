//! Configuration for the Content API client.

use crate::errors::CaughtError;
use std::collections::HashSet;
use std::time::Duration;

/// When and how often a failed request is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Never below 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each later one.
    pub base_delay: Duration,
    /// HTTP statuses treated as transient.
    pub retryable_status_codes: HashSet<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            retryable_status_codes: [408, 429, 500, 502, 503, 504].into_iter().collect(),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Replace the set of retryable statuses.
    pub fn with_retryable_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retryable_status_codes = codes.into_iter().collect();
        self
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_status_codes.contains(&status)
    }

    /// Decide whether attempt number `attempt` (1-indexed) should be followed
    /// by another one.
    pub fn should_retry(&self, error: &CaughtError, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }

        match error {
            CaughtError::Http(failure) => match &failure.response {
                None => true,
                Some(response) => self.is_retryable_status(response.status),
            },
            CaughtError::Other(_) => false,
        }
    }

    /// Backoff before the attempt following `attempt`: `base_delay * 2^(attempt-1)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }
}

/// Access-gateway service token sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Configuration for [`crate::ContentClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// CMS origin, e.g. `https://cms.example.com`.
    pub base_url: String,
    /// Path of the Content API below the origin.
    pub api_path: String,
    /// Content API key, sent as the `key` query parameter.
    pub key: String,
    /// Value of the `Accept-Version` header.
    pub version: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Optional access-gateway credentials.
    pub gateway: Option<GatewayCredentials>,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_path: "ghost/api/content".to_string(),
            key: key.into(),
            version: "v5.0".to_string(),
            timeout: Duration::from_secs(10),
            gateway: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_gateway(mut self, gateway: GatewayCredentials) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Root of the Content API, always ending in `/`.
    pub fn content_root(&self) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            self.api_path.trim_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FailedResponse, HttpFailure};

    fn http(status: Option<u16>) -> CaughtError {
        CaughtError::Http(HttpFailure {
            message: "failed".to_string(),
            response: status.map(|status| FailedResponse {
                status,
                status_text: String::new(),
                data: String::new(),
            }),
            url: None,
        })
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(1000));
        for status in [408, 429, 500, 502, 503, 504] {
            assert!(policy.is_retryable_status(status));
        }
        assert!(!policy.is_retryable_status(404));
    }

    #[test]
    fn test_exponential_delay() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(4000));
    }

    #[test]
    fn test_should_retry_decisions() {
        let policy = RetryPolicy::default();

        assert!(policy.should_retry(&http(None), 1));
        assert!(policy.should_retry(&http(Some(503)), 2));
        assert!(!policy.should_retry(&http(Some(503)), 3));
        assert!(!policy.should_retry(&http(Some(404)), 1));
        assert!(!policy.should_retry(&http(Some(401)), 1));
        assert!(!policy.should_retry(&CaughtError::Other(Some("bug".into())), 1));
    }

    #[test]
    fn test_retryable_set_is_configurable() {
        let policy = RetryPolicy::default().with_retryable_status_codes([404]);
        assert!(policy.should_retry(&http(Some(404)), 1));
        assert!(!policy.should_retry(&http(Some(503)), 1));
    }

    #[test]
    fn test_max_attempts_never_below_one() {
        assert_eq!(RetryPolicy::default().with_max_attempts(0).max_attempts, 1);
        assert!(!RetryPolicy::none().should_retry(&http(None), 1));
    }

    #[test]
    fn test_content_root() {
        let config = ClientConfig::new("https://cms.example.com/", "key");
        assert_eq!(config.content_root(), "https://cms.example.com/ghost/api/content/");
    }
}
