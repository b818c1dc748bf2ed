//! Test-only fault injection and stub objects: a single place that owns
//! the mocks so individual tests don't hand-roll their own every time.
//!
//! Compiled only under `cfg(test)` or the `testkit` feature — neither is
//! on by default, so none of this (including the fault-injection switch
//! [`crate::heap::Heap::construct`] consults) is reachable from a normal
//! build of the published crate. It exists so the Testable Properties in
//! `spec.md` §8 (notably "construction failure propagates") can be
//! exercised without a second, mockable `Allocator` trait the rest of
//! the crate would have to thread through everywhere.

use std::sync::atomic::{AtomicBool, Ordering};

static FORCE_ALLOCATOR_FAILURE: AtomicBool = AtomicBool::new(false);

/// Forces every subsequent [`crate::heap::Heap::construct`] call to fail
/// with `ConstructError::AllocatorUnavailable` until cleared. Intended
/// for integration tests exercising `spec.md` §8 scenario 4
/// ("construction failure propagates").
pub fn force_allocator_failure(force: bool) {
    FORCE_ALLOCATOR_FAILURE.store(force, Ordering::SeqCst);
}

pub(crate) fn allocator_should_fail() -> bool {
    FORCE_ALLOCATOR_FAILURE.load(Ordering::SeqCst)
}

/// A [`crate::thread::Task`] whose `start` returns a fixed code,
/// recording whether it ran at all. Useful wherever a test needs to
/// observe that a thread actually executed its task.
pub struct RecordingTask {
    ran: std::sync::atomic::AtomicBool,
    return_code: i32,
}

impl RecordingTask {
    pub fn new(return_code: i32) -> Self {
        RecordingTask {
            ran: std::sync::atomic::AtomicBool::new(false),
            return_code,
        }
    }

    pub fn ran(&self) -> bool {
        self.ran.load(Ordering::SeqCst)
    }
}

impl crate::thread::Task for RecordingTask {
    fn start(&self) -> i32 {
        self.ran.store(true, Ordering::SeqCst);
        self.return_code
    }
}

/// A [`crate::thread::Task`] whose `start` panics, for exercising the
/// panic-to-`DEAD`-transition contract in `spec.md` §4.5.
pub struct PanickingTask;

impl crate::thread::Task for PanickingTask {
    fn start(&self) -> i32 {
        panic!("testkit::PanickingTask always panics");
    }
}
