//! Shared constants and small value types used across the facade.

/// Sentinel returned by [`crate::thread::Thread::priority`] when the thread
/// was never usable (mirrors the original's `PRIORITY_WRONG`).
pub const PRIORITY_WRONG: i32 = -1;

/// Idle-class priority. Deliberately far below the normal `MIN..=MAX`
/// band rather than merely one below it, so that no off-by-one near the
/// band boundary can be mistaken for this special class.
pub const PRIORITY_IDLE: i32 = -100;

/// Lowest priority accepted by [`crate::thread::Thread::set_priority`] within
/// the normal band.
pub const PRIORITY_MIN: i32 = 1;

/// Default priority a thread is created with.
pub const PRIORITY_NORM: i32 = 5;

/// Highest priority accepted within the normal band.
pub const PRIORITY_MAX: i32 = 10;

/// Lock/real-time class priority. Deliberately far above the normal
/// `MIN..=MAX` band rather than merely one above it, so that
/// `PRIORITY_MAX + 1` (and other near-boundary values) stay correctly
/// rejected by [`is_valid_priority`] instead of colliding with this
/// special class.
pub const PRIORITY_LOCK: i32 = 100;

/// True if `p` is a priority value [`crate::thread::Thread::set_priority`]
/// accepts: the normal band, or one of the two named special classes.
pub fn is_valid_priority(p: i32) -> bool {
    (PRIORITY_MIN..=PRIORITY_MAX).contains(&p) || p == PRIORITY_IDLE || p == PRIORITY_LOCK
}

/// Upper bound on a [`crate::semaphore::Semaphore`]'s permit count.
pub const MAXIMUM_COUNT: i64 = i32::MAX as i64;
