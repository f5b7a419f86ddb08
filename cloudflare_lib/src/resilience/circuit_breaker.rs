//! Consecutive-failure circuit breaker.
//!
//! ```text
//! Closed    -> Open:      threshold consecutive transient failures
//! Open      -> Half-open: cooldown elapsed, requests let through
//! Half-open -> Closed:    any success
//! Half-open -> Open:      any failure
//! ```
//!
//! Transient failures are network errors, per-attempt timeouts and 5xx
//! responses. 4xx responses (429 included) say nothing about backend
//! health and are not counted.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use cloudflare_api::Error;
use tokio::time::Instant;

const CLOSED: u64 = u64::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Lock-free breaker state, one per client.
#[derive(Debug)]
pub struct CircuitBreaker {
    failure_threshold: u32,
    cooldown: Duration,
    consecutive_failures: AtomicU32,
    /// Millis since `epoch` at which the breaker opened, or `CLOSED`.
    opened_at_ms: AtomicU64,
    epoch: Instant,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, cooldown: Duration) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            cooldown,
            consecutive_failures: AtomicU32::new(0),
            opened_at_ms: AtomicU64::new(CLOSED),
            epoch: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX - 1)
    }

    fn cooldown_ms(&self) -> u64 {
        u64::try_from(self.cooldown.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn state(&self) -> CircuitState {
        let opened = self.opened_at_ms.load(Ordering::Acquire);
        if opened == CLOSED {
            CircuitState::Closed
        } else if self.now_ms().saturating_sub(opened) >= self.cooldown_ms() {
            CircuitState::HalfOpen
        } else {
            CircuitState::Open
        }
    }

    /// Fails fast with [`Error::CircuitOpen`] while the breaker is open.
    pub fn check(&self) -> Result<(), Error> {
        let opened = self.opened_at_ms.load(Ordering::Acquire);
        if opened == CLOSED {
            return Ok(());
        }
        let elapsed = self.now_ms().saturating_sub(opened);
        let cooldown = self.cooldown_ms();
        if elapsed >= cooldown {
            return Ok(());
        }
        Err(Error::CircuitOpen {
            retry_in: Duration::from_millis(cooldown - elapsed),
        })
    }

    pub fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::Release);
        if self.opened_at_ms.swap(CLOSED, Ordering::AcqRel) != CLOSED {
            tracing::info!("Circuit breaker closed");
        }
    }

    pub fn record_failure(&self) {
        let failures = self
            .consecutive_failures
            .fetch_add(1, Ordering::AcqRel)
            .saturating_add(1);
        if failures >= self.failure_threshold {
            let previous = self.opened_at_ms.swap(self.now_ms(), Ordering::AcqRel);
            if previous == CLOSED {
                tracing::warn!(
                    "Circuit breaker opened after {} consecutive failures, cooling down for {:?}",
                    failures,
                    self.cooldown
                );
            }
        }
    }

    /// Records the outcome of one attempt.
    pub fn observe(&self, outcome: &Result<cloudflare_api::RawResponse, Error>) {
        match outcome {
            Ok(raw) if raw.status.is_server_error() => self.record_failure(),
            Ok(_) => self.record_success(),
            Err(Error::Network(_)) | Err(Error::Timeout(_)) => self.record_failure(),
            Err(_) => {}
        }
    }
}
