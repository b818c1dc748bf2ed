//! One recoverable mutual-exclusion primitive (`spec.md` §4.6) and the
//! factory that hands it out.

use lock_api::RawMutex as _;

/// A private, non-recursive critical section. `tryLock`/`lock`/`unlock`
/// are exposed as independent calls — deliberately not RAII-guarded —
/// because the contract requires `unlock` to be its own operation that
/// the caller invokes explicitly, mirroring the Win32 `CRITICAL_SECTION`
/// this layer wraps on its reference backend.
///
/// Backed by [`parking_lot::RawMutex`] through [`lock_api::RawMutex`],
/// the one common Rust mutex primitive that exposes lock/unlock as
/// separable operations rather than a single guard-returning call.
pub struct Mutex {
    raw: parking_lot::RawMutex,
}

impl Default for Mutex {
    fn default() -> Self {
        Self::new()
    }
}

impl Mutex {
    /// Constructs an unlocked mutex. Infallible: the raw primitive this
    /// backend uses has no failure mode at construction time.
    pub fn new() -> Self {
        Mutex {
            raw: parking_lot::RawMutex::INIT,
        }
    }

    /// Attempts to lock without blocking. Never blocks, per contract.
    pub fn try_lock(&self) -> bool {
        self.raw.try_lock()
    }

    /// Locks, blocking the caller until the mutex becomes available.
    pub fn lock(&self) -> bool {
        self.raw.lock();
        true
    }

    /// Unlocks a mutex locked by the current owner.
    ///
    /// # Safety
    /// Calling this when the current thread is not the owner is
    /// undefined behavior, exactly as `spec.md` §4.6 specifies for the
    /// reference backend ("`unlock` may only be called by the current
    /// owner").
    pub unsafe fn unlock(&self) -> bool {
        // SAFETY: caller contract above.
        unsafe { self.raw.unlock() };
        true
    }
}

// SAFETY: `parking_lot::RawMutex` is itself `Send + Sync`.
unsafe impl Send for Mutex {}
unsafe impl Sync for Mutex {}

/// Factory and remover for [`Mutex`] instances (`spec.md` §4.6). Holds no
/// list of its own — once `create` returns, the caller owns the mutex and
/// is responsible for calling `remove` (dropping the box) when done.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutexManager;

impl MutexManager {
    pub const fn new() -> Self {
        MutexManager
    }

    /// Allocates a new, unlocked mutex.
    pub fn create(&self) -> Box<Mutex> {
        tracing::debug!("mutex created");
        Box::new(Mutex::new())
    }

    /// Destroys a mutex returned by [`MutexManager::create`]. Destroying
    /// a locked mutex is a program error (`spec.md` §4.6); this is
    /// intentionally not checked here, mirroring the reference backend,
    /// where destruction of a locked critical section is simply UB left
    /// to the caller to avoid.
    pub fn remove(&self, mutex: Box<Mutex>) {
        drop(mutex);
        tracing::debug!("mutex removed");
    }
}
