//! Construction-failure propagation, exercised against [`eoos_sys::Heap`]
//! directly rather than through [`eoos_sys::System`] — `System` is a
//! process-wide singleton, so forcing its construction to fail here
//! would leave every other test in the binary unable to obtain one.

use eoos_sys::testkit;
use eoos_sys::{ConstructError, Heap};

#[test]
fn forced_allocator_failure_propagates_without_partial_construction() {
    testkit::force_allocator_failure(true);
    let result = Heap::construct(None);
    testkit::force_allocator_failure(false);

    assert!(matches!(result, Err(ConstructError::AllocatorUnavailable)));
    // A clean retry afterwards must succeed — the flag does not leave
    // any state behind on the `Heap` side, since none was ever created.
    assert!(Heap::construct(None).is_ok());
}

#[test]
fn heap_construct_reports_back_the_configured_size() {
    assert_eq!(Heap::construct(None).unwrap().configured_size(), None);
    assert_eq!(
        Heap::construct(Some(4096)).unwrap().configured_size(),
        Some(4096)
    );
}

#[test]
fn semaphore_rejects_out_of_range_permit_counts() {
    assert_eq!(
        eoos_sys::Semaphore::new(-1).unwrap_err(),
        ConstructError::InvalidPermits
    );
    assert_eq!(
        eoos_sys::Semaphore::new(eoos_sys::types::MAXIMUM_COUNT + 1).unwrap_err(),
        ConstructError::InvalidPermits
    );
    assert!(eoos_sys::Semaphore::new(0).is_ok());
    assert!(eoos_sys::Semaphore::new(eoos_sys::types::MAXIMUM_COUNT).is_ok());
}
