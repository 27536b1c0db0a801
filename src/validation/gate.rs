//! Admission gate bounding the number of in-flight evaluations

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::core::error::{Result, UaCheckError};

/// Counting gate with `capacity` admission slots.
///
/// Besides the semaphore it tracks how many permits are currently held and
/// the highest number ever held at once, so callers can check the limit
/// was honoured after a run.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

/// One held admission slot. Dropping it returns the slot.
#[derive(Debug)]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        // Runs before `_permit` is dropped, so the counter never exceeds capacity
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AdmissionGate {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait for a free slot.
    pub async fn admit(&self) -> Result<AdmissionPermit> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| UaCheckError::Internal("admission gate was closed".to_string()))?;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        Ok(AdmissionPermit {
            _permit: permit,
            in_flight: self.in_flight.clone(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Slots currently held
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of slots held at the same time since creation
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// True when every slot has been returned
    pub fn is_idle(&self) -> bool {
        self.available() == self.capacity && self.in_flight() == 0
    }
}
