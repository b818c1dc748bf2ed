//! Error taxonomy for the facade.
//!
//! Four kinds of failure are distinguished, matching the contract this
//! layer follows throughout: construction failure, argument error, OS
//! failure, and the fatal path reachable only from [`crate::System::get`].
//! Only the fatal path ever terminates the process; everything else is a
//! plain `Result`/`bool`/`Option` return with no side effect.

use std::fmt;

/// Failure of a fallible component constructor (§4.1's construction
/// discipline). Carries no payload beyond *what* refused to construct,
/// since the constructors that return it never partially initialize
/// anything for a caller to clean up.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum ConstructError {
    /// The heap allocator could not be reached (e.g. a mocked/failing
    /// allocator in tests, or `no-heap` builds asked for memory).
    #[error("allocator unavailable")]
    AllocatorUnavailable,
    /// The scheduler could not capture the host process handle or
    /// priority class it anchors itself to.
    #[error("scheduler unavailable")]
    SchedulerUnavailable,
    /// A console handle for the requested channel could not be acquired.
    #[error("console stream unavailable")]
    StreamUnavailable,
    /// A semaphore was asked for a permit count outside `0..=MAXIMUM_COUNT`.
    #[error("invalid semaphore permit count")]
    InvalidPermits,
}

/// Errors raised while assembling the [`crate::System`] facade itself;
/// aggregates whichever sub-system manager failed first, in construction
/// order (§4.2).
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum SystemError {
    #[error("system heap failed to construct: {0}")]
    Heap(#[source] ConstructError),
    #[error("system scheduler failed to construct: {0}")]
    Scheduler(#[source] ConstructError),
    #[error("system mutex manager failed to construct: {0}")]
    MutexManager(#[source] ConstructError),
    #[error("system semaphore manager failed to construct: {0}")]
    SemaphoreManager(#[source] ConstructError),
    #[error("system stream manager failed to construct: {0}")]
    StreamManager(#[source] ConstructError),
    #[error(transparent)]
    AlreadyConstructed(#[from] AlreadyConstructedError),
}

/// Marker error for a second [`crate::System::new`] call.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
#[error("system already constructed")]
pub struct AlreadyConstructedError;

/// Process exit status, numerically identical to the values specified in
/// `spec.md` §6. The exit status of the process is the numeric value of
/// the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Ok = 0,
    SyscallCalled = 1,
    SystemAbort = 2,
    UserAbort = 3,
    ResourceNotFound = 4,
    Undefined = 127,
    Last = 128,
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExitCode::Ok => "OK",
            ExitCode::SyscallCalled => "SYSCALL_CALLED",
            ExitCode::SystemAbort => "SYSTEM_ABORT",
            ExitCode::UserAbort => "USER_ABORT",
            ExitCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ExitCode::Undefined => "UNDEFINED",
            ExitCode::Last => "LAST",
        };
        write!(f, "{name}({})", *self as i32)
    }
}

impl ExitCode {
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Logs `code` at `error` level and unconditionally terminates the
/// process — the one and only escape hatch in this crate, reachable
/// solely from [`crate::System::get`] on an unpublished singleton.
pub fn exit(code: ExitCode) -> ! {
    tracing::error!(exit_code = code.code(), "{code}, terminating process");
    std::process::exit(code.code())
}
