//! Client configuration.

use std::time::Duration;

use cloudflare_api::{Error, DEFAULT_BASE_URL};

/// Everything needed to build an [`ApiClient`](crate::ApiClient).
///
/// Passed explicitly at construction; there is no process-wide state. Two
/// clients built from equal configs still get their own admission limiter
/// and circuit breaker.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: String,
    /// Retries allowed for a rate-limited idempotent request.
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    /// Ceiling for computed backoff (server-directed delays are honoured as sent).
    pub retry_max_delay: Duration,
    /// Applies to each attempt separately, never to a whole listing.
    pub request_timeout: Duration,
    pub max_in_flight: usize,
    pub max_queued: usize,
    pub breaker_failure_threshold: u32,
    pub breaker_cooldown: Duration,
}

impl ClientConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: api_token.into(),
            max_retries: 2,
            retry_base_delay: Duration::from_secs(1),
            retry_max_delay: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
            max_in_flight: 20,
            max_queued: 50,
            breaker_failure_threshold: 5,
            breaker_cooldown: Duration::from_secs(30),
        }
    }

    /// Reads `CLOUDFLARE_*` environment variables. The token is required;
    /// numeric settings that are missing or unparsable keep their defaults.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("CLOUDFLARE_API_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Config("CLOUDFLARE_API_TOKEN is not set".to_string()))?;
        let defaults = Self::new(token);

        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        Ok(Self {
            base_url: lookup("CLOUDFLARE_API_BASE_URL").unwrap_or(defaults.base_url.clone()),
            max_retries: parsed("CLOUDFLARE_RETRY_MAX")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.max_retries),
            retry_base_delay: parsed("CLOUDFLARE_RETRY_BASE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_base_delay),
            retry_max_delay: parsed("CLOUDFLARE_RETRY_MAX_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_max_delay),
            request_timeout: parsed("CLOUDFLARE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_in_flight: parsed("CLOUDFLARE_MAX_IN_FLIGHT")
                .and_then(|v| usize::try_from(v).ok())
                .unwrap_or(defaults.max_in_flight),
            max_queued: parsed("CLOUDFLARE_MAX_QUEUED")
                .and_then(|v| usize::try_from(v).ok())
                .unwrap_or(defaults.max_queued),
            ..defaults
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delays(mut self, base: Duration, max: Duration) -> Self {
        self.retry_base_delay = base;
        self.retry_max_delay = max;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_admission(mut self, max_in_flight: usize, max_queued: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self.max_queued = max_queued;
        self
    }

    pub fn with_breaker(mut self, failure_threshold: u32, cooldown: Duration) -> Self {
        self.breaker_failure_threshold = failure_threshold;
        self.breaker_cooldown = cooldown;
        self
    }
}
