//! A counting semaphore bounded by [`crate::types::MAXIMUM_COUNT`]
//! (`spec.md` §4.7).

use parking_lot::{Condvar, Mutex};

use crate::error::ConstructError;
use crate::types::MAXIMUM_COUNT;

/// Counting semaphore. `isFair` from the original's historical signature
/// is retired per `spec.md` §9 ("the `isFair` parameter... was advisory
/// and is retired") and intentionally has no surface here.
#[derive(Debug)]
pub struct Semaphore {
    count: Mutex<i64>,
    condvar: Condvar,
}

impl Semaphore {
    /// Constructs a semaphore with `permits` initial permits.
    /// `permits` outside `0..=MAXIMUM_COUNT` is a construction failure.
    pub fn new(permits: i64) -> Result<Self, ConstructError> {
        if !(0..=MAXIMUM_COUNT).contains(&permits) {
            return Err(ConstructError::InvalidPermits);
        }
        Ok(Semaphore {
            count: Mutex::new(permits),
            condvar: Condvar::new(),
        })
    }

    /// Blocks until a permit is available, then decrements the counter.
    /// Always returns `true` on return, since this call never fails —
    /// only blocks.
    pub fn acquire(&self) -> bool {
        let mut count = self.count.lock();
        while *count == 0 {
            self.condvar.wait(&mut count);
        }
        *count -= 1;
        true
    }

    /// Releases one permit, waking at most one blocked acquirer.
    pub fn release(&self) {
        self.release_n(1);
    }

    /// Releases `n` permits at once, saturating at `MAXIMUM_COUNT`.
    /// Used internally to grant multiple permits atomically; the public
    /// surface beyond this module stays single-permit, per `spec.md`
    /// §4.7 ("the public surface is single-permit").
    pub(crate) fn release_n(&self, n: i64) {
        if n <= 0 {
            return;
        }
        let mut count = self.count.lock();
        *count = (*count + n).min(MAXIMUM_COUNT);
        drop(count);
        self.condvar.notify_all();
    }

    /// Current permit count, for diagnostics and tests; not part of the
    /// spec's public contract.
    pub fn available_permits(&self) -> i64 {
        *self.count.lock()
    }
}

/// Factory and remover for [`Semaphore`] instances (`spec.md` §4.7).
#[derive(Debug, Default, Clone, Copy)]
pub struct SemaphoreManager;

impl SemaphoreManager {
    pub const fn new() -> Self {
        SemaphoreManager
    }

    /// Allocates a new semaphore with `permits` initial permits, or
    /// `None` if `permits` is out of range.
    pub fn create(&self, permits: i64) -> Option<Box<Semaphore>> {
        match Semaphore::new(permits) {
            Ok(sem) => {
                tracing::debug!(permits, "semaphore created");
                Some(Box::new(sem))
            }
            Err(err) => {
                tracing::debug!(permits, %err, "semaphore construction failed");
                None
            }
        }
    }

    /// Destroys a semaphore returned by [`SemaphoreManager::create`].
    pub fn remove(&self, semaphore: Box<Semaphore>) {
        drop(semaphore);
        tracing::debug!("semaphore removed");
    }
}
