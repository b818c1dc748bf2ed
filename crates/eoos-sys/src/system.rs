//! The root facade object (`spec.md` §4.2).

use std::sync::OnceLock;

use crate::config::Configuration;
use crate::error::{AlreadyConstructedError, ExitCode, SystemError};
use crate::heap::Heap;
use crate::mutex::MutexManager;
use crate::scheduler::Scheduler;
use crate::semaphore::SemaphoreManager;
use crate::stream::StreamManager;

static INSTANCE: OnceLock<System> = OnceLock::new();

/// The single root object: owns the heap, scheduler, and the mutex/
/// semaphore/stream managers, in that fixed construction order.
///
/// There is no runtime "constructed" flag to check on `System` itself —
/// the only way to obtain a `&'static System` is [`System::new`]
/// (which fails rather than returning one) or [`System::get`] (which
/// exits the process rather than returning a bad one). Every getter on
/// an obtained `&System` is therefore total, per the REDESIGN FLAGS
/// strategy in `spec.md` §9.
pub struct System {
    heap: Heap,
    scheduler: Scheduler,
    mutex_manager: MutexManager,
    semaphore_manager: SemaphoreManager,
    stream_manager: StreamManager,
}

impl System {
    /// Constructs the process-wide `System`, in construction order:
    /// heap, scheduler, mutex manager, semaphore manager, stream
    /// manager. If any sub-system fails, `System` itself is never
    /// published and the singleton stays empty — a later `System::get()`
    /// will still hit the fatal path, exactly as if `new` had never been
    /// called.
    ///
    /// A second call (the singleton is already populated) returns
    /// [`SystemError::AlreadyConstructed`] without touching the existing
    /// instance.
    pub fn new(config: Configuration) -> Result<&'static System, SystemError> {
        Self::new_with(config).and_then(|system| {
            INSTANCE
                .set(system)
                .map_err(|_| SystemError::AlreadyConstructed(AlreadyConstructedError))?;
            tracing::debug!("system constructed");
            Ok(INSTANCE.get().expect("just set"))
        })
    }

    fn new_with(config: Configuration) -> Result<System, SystemError> {
        if INSTANCE.get().is_some() {
            return Err(SystemError::AlreadyConstructed(AlreadyConstructedError));
        }
        let heap = Heap::construct(config.heap_size).map_err(SystemError::Heap)?;
        let scheduler = Scheduler::new(&config).map_err(SystemError::Scheduler)?;
        let mutex_manager = MutexManager::new();
        let semaphore_manager = SemaphoreManager::new();
        let stream_manager = StreamManager::new().map_err(SystemError::StreamManager)?;
        Ok(System {
            heap,
            scheduler,
            mutex_manager,
            semaphore_manager,
            stream_manager,
        })
    }

    /// Returns the singleton, or exits the process with
    /// [`ExitCode::SyscallCalled`] if [`System::new`] never succeeded.
    pub fn get() -> &'static System {
        match INSTANCE.get() {
            Some(system) => system,
            None => crate::error::exit(ExitCode::SyscallCalled),
        }
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn mutex_manager(&self) -> &MutexManager {
        &self.mutex_manager
    }

    pub fn semaphore_manager(&self) -> &SemaphoreManager {
        &self.semaphore_manager
    }

    pub fn stream_manager(&self) -> &StreamManager {
        &self.stream_manager
    }

    /// Forwards to [`crate::program::Program::start`]. Returns an
    /// argument-error exit code if `argc < 0`; performs no copying or
    /// parsing of `argv` itself.
    pub fn execute<P: crate::program::Program>(argc: i32, argv: &[String]) -> i32 {
        if argc < 0 {
            tracing::error!(argc, "execute called with negative argc");
            return ExitCode::ResourceNotFound.code();
        }
        P::start(argc, argv)
    }
}

// `System` is not `Clone`/`Copy`: it has process-wide identity and must
// not be duplicated (`spec.md` §9, "hand-rolled non-copyable base class").
