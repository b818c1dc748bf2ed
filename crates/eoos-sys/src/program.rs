//! The user entry point the facade drives (`spec.md` §5).

/// Implemented once per binary: the single place user code hands control
/// back to after [`crate::System::new`] has assembled the facade.
///
/// `start` runs on the thread that called [`crate::System::execute`] — no
/// new thread is spawned for it. Its return value becomes the process
/// exit status verbatim.
pub trait Program {
    fn start(argc: i32, argv: &[String]) -> i32;
}
