//! 429 retry policy.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use cloudflare_api::{is_idempotent, Method, StatusCode};
use rand::Rng;

/// RFC 850 and asctime. Both are always GMT.
const OBSOLETE_DATE_FORMATS: [&str; 2] = ["%A, %d-%b-%y %H:%M:%S GMT", "%a %b %e %H:%M:%S %Y"];

/// A parsed `Retry-After` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAfter {
    /// Delta-seconds form.
    Delay(Duration),
    /// HTTP-date form.
    At(DateTime<Utc>),
}

impl RetryAfter {
    /// Parses either form. Anything else (negative numbers, garbage) is `None`.
    ///
    /// Dates are read as IMF-fixdate first, then the obsolete RFC 850 and
    /// asctime forms HTTP recipients still have to accept.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(secs) = value.parse::<u64>() {
            return Some(Self::Delay(Duration::from_secs(secs)));
        }
        if let Ok(at) = DateTime::parse_from_rfc2822(value) {
            return Some(Self::At(at.with_timezone(&Utc)));
        }
        OBSOLETE_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(|at| Self::At(at.and_utc()))
    }
}

/// Retry limits for rate-limited responses.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RateLimitPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: max_delay.max(base_delay),
        }
    }

    /// Only a 429 on a read-only verb is worth another attempt.
    pub fn should_retry(&self, method: &Method, status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS && is_idempotent(method)
    }

    /// Delay before retry number `attempt` (zero-based).
    ///
    /// A delta-seconds directive is used as sent. A future date gives the
    /// time remaining until it. A past date, or no directive at all, falls
    /// back to [`backoff`](Self::backoff).
    pub fn resolve_delay(
        &self,
        retry_after: Option<RetryAfter>,
        attempt: u32,
        now: DateTime<Utc>,
    ) -> Duration {
        match retry_after {
            Some(RetryAfter::Delay(delay)) => delay,
            Some(RetryAfter::At(target)) if target > now => {
                (target - now).to_std().unwrap_or_else(|_| self.backoff(attempt))
            }
            _ => self.backoff(attempt),
        }
    }

    /// `base * 2^attempt` plus up to one `base` of jitter, capped at `max_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max_delay.as_millis()).unwrap_or(u64::MAX);
        let exp = 1u64 << attempt.min(30);
        let jitter = rand::thread_rng().gen_range(0..=base_ms);
        let delay = base_ms.saturating_mul(exp).saturating_add(jitter).min(max_ms);
        Duration::from_millis(delay)
    }
}

/// State of one logical request across its attempts. Never shared.
#[derive(Debug, Default, Clone)]
pub struct RetryContext {
    /// Retries performed so far.
    pub attempt: u32,
    /// Wait before the most recent retry.
    pub last_delay: Option<Duration>,
}

impl RetryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, delay: Duration) {
        self.attempt += 1;
        self.last_delay = Some(delay);
    }
}
