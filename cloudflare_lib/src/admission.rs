//! Client-wide concurrency bulkhead.
//!
//! At most `max_in_flight` requests hold a [`Permit`] at once and at most
//! `max_queued` callers wait for one. Anyone beyond that is rejected
//! immediately instead of waiting without bound.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cloudflare_api::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// The right to have one request in flight. Released when dropped, which
/// covers success, error and cancellation alike.
#[derive(Debug)]
pub struct Permit {
    _permit: OwnedSemaphorePermit,
}

/// Bounded-queue admission control, one per client instance.
#[derive(Debug)]
pub struct AdmissionLimiter {
    semaphore: Arc<Semaphore>,
    queued: Arc<AtomicUsize>,
    max_in_flight: usize,
    max_queued: usize,
}

/// Holds a queue slot while a caller waits; gives it back on drop, so an
/// abandoned wait does not leak a slot.
struct QueueSlot(Arc<AtomicUsize>);

impl Drop for QueueSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl AdmissionLimiter {
    /// `max_in_flight` is clamped to `1..=Semaphore::MAX_PERMITS`.
    pub fn new(max_in_flight: usize, max_queued: usize) -> Self {
        let max_in_flight = max_in_flight.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(max_in_flight)),
            queued: Arc::new(AtomicUsize::new(0)),
            max_in_flight,
            max_queued,
        }
    }

    /// Takes a permit, waiting in the queue if every permit is in use.
    ///
    /// Returns [`Error::AdmissionRejected`] without waiting when the queue
    /// is already full.
    pub async fn acquire(&self) -> Result<Permit, Error> {
        if let Ok(permit) = Arc::clone(&self.semaphore).try_acquire_owned() {
            return Ok(Permit { _permit: permit });
        }

        let reserved = self
            .queued
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |queued| {
                (queued < self.max_queued).then_some(queued + 1)
            });
        if reserved.is_err() {
            tracing::warn!(
                "Admission rejected: {} in flight, {} queued",
                self.max_in_flight,
                self.max_queued
            );
            return Err(Error::AdmissionRejected {
                max_in_flight: self.max_in_flight,
                max_queued: self.max_queued,
            });
        }
        let _slot = QueueSlot(Arc::clone(&self.queued));

        // The semaphore is owned here and never closed.
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| Error::Cancelled)?;
        Ok(Permit { _permit: permit })
    }

    /// Permits not currently held.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Callers currently waiting for a permit.
    pub fn queued(&self) -> usize {
        self.queued.load(Ordering::Acquire)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    pub fn max_queued(&self) -> usize {
        self.max_queued
    }
}
