//! The optional `Configuration` collaborator (`spec.md` §6): consumed by
//! [`crate::scheduler::Scheduler`] at construction if supplied, never
//! persisted anywhere else.

/// Host-tunable knobs for the facade. Every field is optional or has a
/// documented default, since `spec.md` treats `Configuration` as an
/// *optional* collaborator — omitting it must produce the same behavior
/// as the platform default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Configuration {
    /// Bytes to reserve for the process heap. Present only in
    /// dynamic-heap builds; ignored under the `no-heap` feature.
    pub heap_size: Option<u64>,
    /// Default stack size, in bytes, for the first user thread. `0`
    /// (the default) means "platform default", matching `Task::stack_size`.
    pub stack_size: u64,
}

impl Configuration {
    /// The configuration a [`crate::scheduler::Scheduler`] uses when none
    /// is supplied.
    pub const fn platform_default() -> Self {
        Configuration {
            heap_size: None,
            stack_size: 0,
        }
    }
}
