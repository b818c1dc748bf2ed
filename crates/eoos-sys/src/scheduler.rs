//! Thread factory, sleep/yield primitives, and the process-priority
//! anchor (`spec.md` §4.4).

use std::sync::Arc;
use std::time::Duration;

use crate::config::Configuration;
use crate::error::ConstructError;
use crate::thread::{Task, Thread};

/// The scheduler does not maintain a list of live threads — threads are
/// self-owning once handed out (`spec.md` §4.4). It stores only the
/// anchor captured at construction: the host process id and the
/// configuration that seeded it, so that later calls have a known
/// reference point.
pub struct Scheduler {
    process_id: u32,
    priority_class: i32,
    default_stack_size: usize,
}

impl Scheduler {
    /// Constructs the scheduler, capturing the current process handle
    /// and an (always non-zero) priority class anchor.
    pub fn new(config: &Configuration) -> Result<Self, ConstructError> {
        let process_id = std::process::id();
        if process_id == 0 {
            return Err(ConstructError::SchedulerUnavailable);
        }
        Ok(Scheduler {
            process_id,
            priority_class: crate::types::PRIORITY_NORM,
            default_stack_size: config.stack_size as usize,
        })
    }

    /// The host process id captured at construction.
    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    /// The priority class captured at construction; always non-zero per
    /// `spec.md` §3's invariant on a constructed `Scheduler`.
    pub fn priority_class(&self) -> i32 {
        self.priority_class
    }

    /// Binds a new [`Thread`] to `task`, in the `NEW` state. The thread
    /// is not spawned until its own `execute()` is called; when spawned,
    /// a `task.stack_size()` of `0` falls back to this scheduler's
    /// configured `default_stack_size` before falling back further to
    /// the platform default.
    pub fn create_thread(&self, task: Arc<dyn Task>) -> Thread {
        Thread::new(task, self.default_stack_size)
    }

    /// Sleeps the caller for `ms` milliseconds. Negative `ms` is an
    /// argument error (`false`, no sleep performed). `ms == 0` is
    /// normalized to a yield hint per `spec.md` §9's Open Question,
    /// rather than literally sleeping zero milliseconds.
    pub fn sleep(&self, ms: i64) -> bool {
        if ms < 0 {
            return false;
        }
        if ms == 0 {
            self.yield_now();
            return true;
        }
        std::thread::sleep(Duration::from_millis(ms as u64));
        true
    }

    /// Cooperatively yields the current time quantum.
    pub fn yield_now(&self) {
        std::thread::yield_now();
    }
}
