//! One logical request: per-attempt timeout, breaker, 429 retry loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use cloudflare_api::{Client, Error, RawResponse, RequestSpec, StatusCode};

use super::circuit_breaker::CircuitBreaker;
use super::retry::{RateLimitPolicy, RetryAfter, RetryContext};
use super::sleeper::Sleeper;

/// Atomic counters of request outcomes for one client.
#[derive(Debug, Default)]
pub struct RequestTracker {
    attempts: AtomicU64,
    rate_limited: AtomicU64,
    retries: AtomicU64,
    transient_failures: AtomicU64,
    /// Cumulative retry delay in milliseconds.
    total_backoff_ms: AtomicU64,
}

impl RequestTracker {
    fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    fn record_rate_limited(&self) {
        self.rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    fn record_retry(&self, delay: Duration) {
        self.retries.fetch_add(1, Ordering::Relaxed);
        self.total_backoff_ms.fetch_add(
            u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            Ordering::Relaxed,
        );
    }

    fn record_transient_failure(&self) {
        self.transient_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> TrackerSummary {
        TrackerSummary {
            attempts: self.attempts.load(Ordering::Relaxed),
            rate_limited: self.rate_limited.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            transient_failures: self.transient_failures.load(Ordering::Relaxed),
            total_backoff: Duration::from_millis(self.total_backoff_ms.load(Ordering::Relaxed)),
        }
    }
}

/// Snapshot of [`RequestTracker`] counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSummary {
    pub attempts: u64,
    pub rate_limited: u64,
    pub retries: u64,
    pub transient_failures: u64,
    pub total_backoff: Duration,
}

#[derive(Debug)]
pub struct ResiliencePipeline {
    transport: Client,
    policy: RateLimitPolicy,
    breaker: CircuitBreaker,
    sleeper: Arc<dyn Sleeper>,
    request_timeout: Duration,
    tracker: RequestTracker,
}

impl ResiliencePipeline {
    pub fn new(
        transport: Client,
        policy: RateLimitPolicy,
        breaker: CircuitBreaker,
        sleeper: Arc<dyn Sleeper>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            policy,
            breaker,
            sleeper,
            request_timeout,
            tracker: RequestTracker::default(),
        }
    }

    pub fn transport(&self) -> &Client {
        &self.transport
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Runs `spec` until it yields a response that should not be retried.
    ///
    /// Non-429 statuses are returned as responses for the envelope layer to
    /// classify. A 429 on a mutating verb is returned on the first attempt.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<RawResponse, Error> {
        let mut ctx = RetryContext::new();
        loop {
            let raw = self.attempt(spec).await?;
            if raw.status != StatusCode::TOO_MANY_REQUESTS {
                return Ok(raw);
            }
            self.tracker.record_rate_limited();

            if !self.policy.should_retry(spec.method(), raw.status) {
                tracing::debug!(
                    "{} {} rate limited; not retrying a non-idempotent request",
                    raw.method,
                    raw.url
                );
                return Ok(raw);
            }
            if ctx.attempt >= self.policy.max_retries {
                tracing::error!(
                    "{} {} still rate limited after {} attempts (last wait {:.1}s)",
                    raw.method,
                    raw.url,
                    ctx.attempt + 1,
                    ctx.last_delay.unwrap_or_default().as_secs_f64()
                );
                return Err(Error::RateLimitExhausted {
                    attempts: ctx.attempt + 1,
                    last_response: Box::new(raw),
                });
            }

            let retry_after = raw.header("retry-after").and_then(RetryAfter::parse);
            let delay = self.policy.resolve_delay(retry_after, ctx.attempt, Utc::now());
            tracing::warn!(
                "{} {} rate limited (attempt {}/{}), retrying in {:.1}s",
                raw.method,
                raw.url,
                ctx.attempt + 1,
                self.policy.max_retries + 1,
                delay.as_secs_f64()
            );
            ctx.record(delay);
            self.tracker.record_retry(delay);
            self.sleeper.sleep(delay).await;
        }
    }

    async fn attempt(&self, spec: &RequestSpec) -> Result<RawResponse, Error> {
        self.breaker.check()?;
        self.tracker.record_attempt();

        let outcome = match tokio::time::timeout(self.request_timeout, self.transport.send(spec)).await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!(
                    "{} {} timed out after {:?}",
                    spec.method(),
                    spec.path(),
                    self.request_timeout
                );
                Err(Error::Timeout(self.request_timeout))
            }
        };

        self.breaker.observe(&outcome);
        match &outcome {
            Ok(raw) if raw.status.is_server_error() => self.tracker.record_transient_failure(),
            Err(Error::Network(_)) | Err(Error::Timeout(_)) => {
                self.tracker.record_transient_failure()
            }
            _ => {}
        }
        outcome
    }
}
