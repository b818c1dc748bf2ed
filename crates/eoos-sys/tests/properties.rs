//! Property-based checks for invariants that hold for *any* input, not
//! just the handful of cases picked in `facade.rs`.

use proptest::prelude::*;

use eoos_sys::types::{
    is_valid_priority, MAXIMUM_COUNT, PRIORITY_IDLE, PRIORITY_LOCK, PRIORITY_MAX, PRIORITY_MIN,
};

proptest! {
    /// Every priority accepted by `is_valid_priority` is either the idle
    /// class, the lock class, or inside the normal `MIN..=MAX` band —
    /// there is no fourth acceptance path. Ranges far past both named
    /// classes so a near-boundary value like `PRIORITY_MAX + 1` is
    /// actually exercised, not just the band itself.
    #[test]
    fn valid_priorities_are_one_of_three_bands(p in (PRIORITY_IDLE - 50)..(PRIORITY_LOCK + 50)) {
        let valid = is_valid_priority(p);
        let expected = (PRIORITY_MIN..=PRIORITY_MAX).contains(&p)
            || p == PRIORITY_IDLE
            || p == PRIORITY_LOCK;
        prop_assert_eq!(valid, expected);
    }

    /// A semaphore constructed with any in-range permit count reports
    /// exactly that many available permits before anything acquires one.
    #[test]
    fn semaphore_reports_its_construction_time_permits(permits in 0i64..=MAXIMUM_COUNT) {
        let sem = eoos_sys::Semaphore::new(permits).expect("in-range permits must construct");
        prop_assert_eq!(sem.available_permits(), permits);
    }

    /// Any permit count outside `0..=MAXIMUM_COUNT` is always rejected.
    #[test]
    fn semaphore_rejects_any_out_of_range_count(permits in (MAXIMUM_COUNT + 1)..=(MAXIMUM_COUNT + 1_000_000)) {
        prop_assert!(eoos_sys::Semaphore::new(permits).is_err());
    }

    /// A release followed by an equal number of acquires never blocks and
    /// leaves the permit count back where it started.
    #[test]
    fn release_then_acquire_round_trips(n in 0i64..1000) {
        let sem = eoos_sys::Semaphore::new(0).unwrap();
        for _ in 0..n {
            sem.release();
        }
        for _ in 0..n {
            prop_assert!(sem.acquire());
        }
        prop_assert_eq!(sem.available_permits(), 0);
    }
}
