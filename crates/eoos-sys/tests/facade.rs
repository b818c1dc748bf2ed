//! Exercises the facade as a user binary would: one process-wide
//! `System`, driven through its public surface only.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use eoos_sys::{Configuration, System, Task};

struct Increment {
    counter: Arc<AtomicI64>,
    mutex: Arc<eoos_sys::Mutex>,
    iterations: i64,
}

impl Task for Increment {
    fn start(&self) -> i32 {
        for _ in 0..self.iterations {
            self.mutex.lock();
            let current = self.counter.load(Ordering::Relaxed);
            self.counter.store(current + 1, Ordering::Relaxed);
            // SAFETY: this thread just locked `self.mutex` and has not
            // unlocked it since.
            unsafe { self.mutex.unlock() };
        }
        0
    }
}

struct BoundedWorker {
    semaphore: Arc<eoos_sys::Semaphore>,
    concurrent: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl Task for BoundedWorker {
    fn start(&self) -> i32 {
        self.semaphore.acquire();
        let now = self.concurrent.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(20));
        self.concurrent.fetch_sub(1, Ordering::SeqCst);
        self.semaphore.release();
        0
    }
}

struct ReturnCode(i32);

impl Task for ReturnCode {
    fn start(&self) -> i32 {
        self.0
    }
}

/// `System` is a process-wide singleton constructed exactly once, so all
/// scenarios that need it run inside a single test to keep construction
/// order deterministic across the whole test binary.
#[test]
fn system_lifecycle_scenarios() {
    let system = System::new(Configuration::platform_default()).expect("first construction");

    // A freshly bound thread starts its task and reports clean completion.
    let task: Arc<dyn Task> = Arc::new(ReturnCode(0));
    let thread = system.scheduler().create_thread(task);
    assert_eq!(thread.status(), eoos_sys::ThreadState::New);
    assert!(thread.execute());
    assert!(
        !thread.execute(),
        "second execute on a running thread is a no-op"
    );
    assert!(thread.join());
    assert_eq!(thread.status(), eoos_sys::ThreadState::Dead);
    assert!(!thread.join(), "joining a dead thread is a no-op");

    // A panicking task is recorded as dead, not a crashed process.
    struct Panics;
    impl Task for Panics {
        fn start(&self) -> i32 {
            panic!("boom");
        }
    }
    let panicking: Arc<dyn Task> = Arc::new(Panics);
    let panicking_thread = system.scheduler().create_thread(panicking);
    assert!(panicking_thread.execute());
    assert!(
        !panicking_thread.join(),
        "a panicking task is not clean completion"
    );
    assert_eq!(panicking_thread.status(), eoos_sys::ThreadState::Dead);

    // Two threads racing 100_000 increments each through one mutex must
    // land on exactly 200_000 with no lost updates.
    let counter = Arc::new(AtomicI64::new(0));
    let mutex = Arc::new(eoos_sys::Mutex::new());
    let threads: Vec<_> = (0..2)
        .map(|_| {
            let task: Arc<dyn Task> = Arc::new(Increment {
                counter: Arc::clone(&counter),
                mutex: Arc::clone(&mutex),
                iterations: 100_000,
            });
            system.scheduler().create_thread(task)
        })
        .collect();
    for t in &threads {
        assert!(t.execute());
    }
    for t in &threads {
        assert!(t.join());
    }
    assert_eq!(counter.load(Ordering::Relaxed), 200_000);

    // A semaphore with 2 permits never lets more than 2 of 4 workers run
    // concurrently.
    let semaphore = Arc::new(eoos_sys::Semaphore::new(2).expect("valid permit count"));
    let concurrent = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let task: Arc<dyn Task> = Arc::new(BoundedWorker {
                semaphore: Arc::clone(&semaphore),
                concurrent: Arc::clone(&concurrent),
                peak: Arc::clone(&peak),
            });
            system.scheduler().create_thread(task)
        })
        .collect();
    for w in &workers {
        assert!(w.execute());
    }
    for w in &workers {
        assert!(w.join());
    }
    assert!(
        peak.load(Ordering::SeqCst) <= 2,
        "semaphore bound was exceeded"
    );
    assert_eq!(semaphore.available_permits(), 2);

    // spec.md §8 concrete scenario 5: a priority one past the top of the
    // normal band is rejected outright, and the thread's priority stays
    // at its construction-time default.
    let freshly_created: Arc<dyn Task> = Arc::new(ReturnCode(0));
    let fresh_thread = system.scheduler().create_thread(freshly_created);
    assert!(!fresh_thread.set_priority(eoos_sys::types::PRIORITY_MAX + 1));
    assert_eq!(fresh_thread.priority(), eoos_sys::types::PRIORITY_NORM);

    // Priority validation: the normal band plus the two named classes are
    // accepted; everything else is rejected and leaves the prior value.
    let probe: Arc<dyn Task> = Arc::new(ReturnCode(0));
    let probe_thread = system.scheduler().create_thread(probe);
    assert_eq!(probe_thread.priority(), eoos_sys::types::PRIORITY_NORM);
    assert!(probe_thread.set_priority(eoos_sys::types::PRIORITY_MAX));
    assert_eq!(probe_thread.priority(), eoos_sys::types::PRIORITY_MAX);
    assert!(!probe_thread.set_priority(eoos_sys::types::PRIORITY_WRONG));
    assert_eq!(
        probe_thread.priority(),
        eoos_sys::types::PRIORITY_MAX,
        "a rejected priority must not change the stored value"
    );
    assert!(probe_thread.set_priority(eoos_sys::types::PRIORITY_LOCK));
    assert!(probe_thread.set_priority(eoos_sys::types::PRIORITY_IDLE));

    // Stream redirection takes effect immediately and `reset` restores
    // the construction-time default.
    struct Capturing(std::sync::Mutex<String>);
    impl eoos_sys::OutStream for Capturing {
        fn write_str(&self, s: &str) {
            self.0.lock().unwrap().push_str(s);
        }
        fn flush(&self) {}
    }
    let capture = Arc::new(Capturing(std::sync::Mutex::new(String::new())));
    let streams = system.stream_manager();
    streams.set_cout(capture.clone() as Arc<dyn eoos_sys::OutStream>);
    streams.cout().write_str("redirected");
    assert_eq!(capture.0.lock().unwrap().as_str(), "redirected");
    streams.reset_cout();
    assert!(!Arc::ptr_eq(
        &streams.cout(),
        &(capture as Arc<dyn eoos_sys::OutStream>)
    ));

    // A second `System::new` call leaves the existing instance untouched
    // and reports `AlreadyConstructed` instead of panicking or aborting.
    let second = System::new(Configuration::platform_default());
    assert!(matches!(
        second,
        Err(eoos_sys::SystemError::AlreadyConstructed(_))
    ));
}
