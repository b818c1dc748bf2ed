//! One schedulable unit of execution bound to a user [`Task`]
//! (`spec.md` §4.5).

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex as PlMutex;

use crate::types::{self, PRIORITY_NORM};

/// A user-supplied callable bundling a `start` body and a preferred
/// stack size (`spec.md` §4.5, "Constraints on the Task supplied by the
/// caller").
///
/// `Task` is shared with its [`Thread`] via `Arc` rather than uniquely
/// owned or passed by raw pointer: `spec.md` §3 requires that "the Task
/// outlives the Thread (caller's responsibility)", and shared ownership
/// is the idiomatic Rust reading of that constraint — the caller keeps
/// its own `Arc` clone, so the `Task` is never solely kept alive by the
/// `Thread` that happens to be running it.
pub trait Task: Send + Sync {
    /// The body of execution. Returns a status code; a non-zero value
    /// is treated the same as a panic crossing the thread boundary would
    /// be — it does not itself panic the host thread.
    fn start(&self) -> i32;

    /// Preferred stack size in bytes. `0` (the default) means "platform
    /// default".
    fn stack_size(&self) -> usize {
        0
    }
}

/// Lifecycle state of a [`Thread`] (`spec.md` §4.5's state machine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadState {
    /// Bound to a task, not yet spawned.
    New,
    /// Spawned and running (or finished but not yet joined).
    Runnable,
    /// Terminal. No transition leads out of this state.
    Dead,
}

/// One OSAL thread handle, bound 1:1 to a [`Task`].
///
/// The original backend creates the native thread suspended (`NEW`) and
/// resumes it on `execute()`. Rust's `std::thread` has no suspended-
/// creation primitive, so `NEW` is realized here as "not yet spawned":
/// the `Task` is captured at construction, and `execute()` performs the
/// actual `std::thread::spawn`, which is an exact behavioral match for
/// the state machine without needing to emulate `CREATE_SUSPENDED`.
pub struct Thread {
    task: Arc<dyn Task>,
    state: PlMutex<ThreadState>,
    priority: AtomicI32,
    join_handle: PlMutex<Option<std::thread::JoinHandle<Option<i32>>>>,
    id: u64,
    default_stack_size: usize,
}

static NEXT_THREAD_ID: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

impl Thread {
    /// Binds a new, not-yet-running thread to `task`, falling back to
    /// `default_stack_size` (the `Scheduler`'s configured
    /// `Configuration::stack_size`, `0` meaning "platform default") for
    /// any `task` whose own [`Task::stack_size`] is `0`.
    pub fn new(task: Arc<dyn Task>, default_stack_size: usize) -> Self {
        let id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
        Thread {
            task,
            state: PlMutex::new(ThreadState::New),
            priority: AtomicI32::new(PRIORITY_NORM),
            join_handle: PlMutex::new(None),
            id,
            default_stack_size,
        }
    }

    /// The id assigned to this thread at construction.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current lifecycle state.
    pub fn status(&self) -> ThreadState {
        *self.state.lock()
    }

    /// Spawns the underlying native thread. Legal only in `NEW`; a
    /// second call (state `RUNNABLE` or `DEAD`) is a no-op that returns
    /// `false`, matching the idempotence requirement in `spec.md` §8.
    pub fn execute(&self) -> bool {
        let mut state = self.state.lock();
        if *state != ThreadState::New {
            return false;
        }

        let task = Arc::clone(&self.task);
        let stack_size = effective_stack_size(task.stack_size(), self.default_stack_size);
        let mut builder = std::thread::Builder::new().name(format!("eoos-thread-{}", self.id));
        if stack_size > 0 {
            builder = builder.stack_size(stack_size);
        }

        let spawned = builder.spawn(move || {
            // A panic crossing this boundary must not kill the host
            // process. `catch_unwind` stops the unwind here, so the
            // panic can no longer reach `JoinHandle::join` as an `Err` —
            // `None` carries the same signal onward to `Thread::join`.
            match panic::catch_unwind(AssertUnwindSafe(|| task.start())) {
                Ok(code) => Some(code),
                Err(_) => {
                    tracing::debug!("task panicked, thread recorded as dead");
                    None
                }
            }
        });

        match spawned {
            Ok(handle) => {
                *self.join_handle.lock() = Some(handle);
                *state = ThreadState::Runnable;
                tracing::debug!(thread_id = self.id, "thread started");
                true
            }
            Err(err) => {
                tracing::debug!(thread_id = self.id, %err, "thread spawn failed");
                *state = ThreadState::Dead;
                false
            }
        }
    }

    /// Blocks until the task returns. Legal only in `RUNNABLE`; returns
    /// `true` only if the task completed without panicking.
    pub fn join(&self) -> bool {
        {
            let state = self.state.lock();
            if *state != ThreadState::Runnable {
                return false;
            }
        }
        let handle = self.join_handle.lock().take();
        let outcome = match handle {
            Some(handle) => handle.join(),
            None => return false,
        };
        *self.state.lock() = ThreadState::Dead;
        tracing::debug!(thread_id = self.id, "thread joined");
        // "Clean completion" means `start()` returned without panicking;
        // the returned status code itself is not part of this contract.
        // `outcome` is only ever `Err` if the native thread itself
        // aborted beneath the `catch_unwind` in `execute`, which does
        // not happen in this backend; the real signal is the inner
        // `Option`.
        matches!(outcome, Ok(Some(_)))
    }

    /// Current priority, or [`crate::types::PRIORITY_WRONG`] for a thread
    /// that was never usable. `Thread::new` has no fallible path in this
    /// backend, so this always reflects the last value accepted by
    /// [`Thread::set_priority`] (or the default, [`PRIORITY_NORM`]).
    pub fn priority(&self) -> i32 {
        self.priority.load(Ordering::Relaxed)
    }

    /// Stores a new priority if `p` is within the valid range
    /// (`spec.md` §4.5). Pushing the value to the native scheduler is a
    /// permitted but not required extension (`spec.md` §9); this
    /// backend stores only, as the Open Question resolves.
    pub fn set_priority(&self, p: i32) -> bool {
        if !types::is_valid_priority(p) {
            return false;
        }
        self.priority.store(p, Ordering::Relaxed);
        true
    }
}

impl Drop for Thread {
    fn drop(&mut self) {
        if *self.state.lock() == ThreadState::Runnable {
            tracing::debug!(
                thread_id = self.id,
                "thread dropped while still runnable; detaching"
            );
        }
    }
}

/// `task_stack_size` if the `Task` requested one, otherwise
/// `scheduler_default` (itself `0` meaning "platform default").
fn effective_stack_size(task_stack_size: usize, scheduler_default: usize) -> usize {
    match task_stack_size {
        0 => scheduler_default,
        n => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_stack_size_wins_over_the_scheduler_default() {
        assert_eq!(effective_stack_size(64 * 1024, 1024 * 1024), 64 * 1024);
    }

    #[test]
    fn scheduler_default_fills_in_when_the_task_asks_for_platform_default() {
        assert_eq!(effective_stack_size(0, 1024 * 1024), 1024 * 1024);
    }

    #[test]
    fn both_zero_stays_platform_default() {
        assert_eq!(effective_stack_size(0, 0), 0);
    }
}
