use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting permit set bounding the number of simultaneous downloads.
///
/// Every acquisition and release is recorded so the bound can be observed.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    permits: Arc<Semaphore>,
    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    held: AtomicUsize,
    peak: AtomicUsize,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl AdmissionGate {
    pub fn new(limit: NonZeroUsize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(limit.get())),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Waits for a free slot. The slot is given back when the permit drops.
    pub async fn acquire(&self) -> GatePermit {
        // The semaphore is owned by the gate and never closed.
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .expect("admission gate semaphore closed");

        let held = self.counters.held.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(held, Ordering::SeqCst);
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);

        GatePermit {
            _permit: permit,
            counters: self.counters.clone(),
        }
    }

    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn held(&self) -> usize {
        self.counters.held.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }

    pub fn acquired(&self) -> usize {
        self.counters.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.counters.released.load(Ordering::SeqCst)
    }
}

/// One occupied slot of an [`AdmissionGate`].
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
    counters: Arc<Counters>,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.counters.held.fetch_sub(1, Ordering::SeqCst);
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}
