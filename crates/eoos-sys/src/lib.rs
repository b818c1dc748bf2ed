//! Portable operating-system abstraction layer.
//!
//! A single [`System`] facade owns a process-wide heap, scheduler,
//! mutex/semaphore managers, and console streams, and hands out
//! capability objects (`Heap`, `Scheduler`, `Mutex`, `Semaphore`,
//! `Thread`, `OutStream`) bound to it. There is exactly one `System`
//! per process: construct it once via [`System::new`], then reach it
//! from anywhere with [`System::get`].
//!
//! A host binary implements [`Program`] and drives the facade through
//! [`System::execute`]; see `demos/hello` for a minimal one.

pub mod allocator;
pub mod config;
pub mod error;
pub mod heap;
pub mod mutex;
pub mod program;
pub mod scheduler;
pub mod semaphore;
pub mod stream;
pub mod system;
#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
pub mod thread;
pub mod types;

pub use config::Configuration;
pub use error::{ConstructError, ExitCode, SystemError};
pub use heap::Heap;
pub use mutex::{Mutex, MutexManager};
pub use program::Program;
pub use scheduler::Scheduler;
pub use semaphore::{Semaphore, SemaphoreManager};
pub use stream::{Channel, ConsoleStream, OutStream};
pub use system::System;
pub use thread::{Task, Thread, ThreadState};
