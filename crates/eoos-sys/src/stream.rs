//! Terminal output sinks and their manager (`spec.md` §4.8).

use std::io::Write;
use std::sync::Arc;

use arc_swap::ArcSwap;
use colored::Colorize;

use crate::error::ConstructError;

/// The normal or error designation of an output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Cout,
    Cerr,
}

/// A single terminal sink. `operator<<` in the original becomes
/// [`OutStream::write_str`]/[`OutStream::write_int`]; `flush` is
/// [`OutStream::flush`].
pub trait OutStream: Send + Sync {
    /// Writes `s`, switching the channel's display attributes for the
    /// duration of the write. The error channel forces a red,
    /// high-intensity foreground.
    fn write_str(&self, s: &str);

    /// Formats `n` in base 10 through a fixed-size stack buffer (no heap
    /// touched, per `spec.md` §9) and delegates to [`OutStream::write_str`].
    fn write_int(&self, n: i64) {
        let mut buf = itoa::Buffer::new();
        self.write_str(buf.format(n));
    }

    /// Flushes the underlying buffer.
    fn flush(&self);
}

/// Singleton-per-channel console sink (`spec.md` §4.8). Snapshotting and
/// restoring console attributes around every write, as the original
/// Win32 backend does, collapses here to scoping the `colored` crate's
/// color codes to exactly the string written — nothing persists for a
/// later write to see, so there is nothing to restore.
pub struct ConsoleStream {
    channel: Channel,
}

impl ConsoleStream {
    /// Acquires the native console handle for `channel`. In this backend
    /// that is simply confirming the channel is a valid variant, since
    /// `std::io::{stdout, stderr}` hand out a process-wide handle that
    /// is always available; a backend targeting a headless service
    /// host could fail here instead.
    pub fn new(channel: Channel) -> Result<Self, ConstructError> {
        Ok(ConsoleStream { channel })
    }
}

impl OutStream for ConsoleStream {
    fn write_str(&self, s: &str) {
        match self.channel {
            Channel::Cout => {
                print!("{s}");
                let _ = std::io::stdout().flush();
            }
            Channel::Cerr => {
                eprint!("{}", s.red().bold());
                let _ = std::io::stderr().flush();
            }
        }
    }

    fn flush(&self) {
        let _ = match self.channel {
            Channel::Cout => std::io::stdout().flush(),
            Channel::Cerr => std::io::stderr().flush(),
        };
    }
}

impl Drop for ConsoleStream {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Owns the two default sinks (COUT/CERR) and the two redirection
/// pointers (current cout/current cerr) that `setCout`/`resetCout`
/// (and the `cerr` equivalents) operate on.
///
/// Redirection pointers are [`arc_swap::ArcSwap`] rather than a mutex-
/// guarded raw pointer: redirection is process-wide and must take
/// effect immediately for subsequent writes (`spec.md` §4.8) without
/// readers blocking on writers, which is exactly `ArcSwap`'s contract.
pub struct StreamManager {
    default_cout: Arc<dyn OutStream>,
    default_cerr: Arc<dyn OutStream>,
    current_cout: ArcSwap<Arc<dyn OutStream>>,
    current_cerr: ArcSwap<Arc<dyn OutStream>>,
}

impl StreamManager {
    /// Constructs the two default console sinks and points both
    /// redirection pointers at them.
    pub fn new() -> Result<Self, ConstructError> {
        let default_cout: Arc<dyn OutStream> = Arc::new(ConsoleStream::new(Channel::Cout)?);
        let default_cerr: Arc<dyn OutStream> = Arc::new(ConsoleStream::new(Channel::Cerr)?);
        Ok(StreamManager {
            current_cout: ArcSwap::from_pointee(Arc::clone(&default_cout)),
            current_cerr: ArcSwap::from_pointee(Arc::clone(&default_cerr)),
            default_cout,
            default_cerr,
        })
    }

    /// The stream currently receiving normal output.
    ///
    /// `current_cout` is `ArcSwap<Arc<dyn OutStream>>` — the extra layer
    /// of `Arc` works around `arc_swap` requiring a thin, fixed-size
    /// pointee; `load()` hands back a guard over the outer `Arc`, so we
    /// deref twice to clone the real, inner handle.
    pub fn cout(&self) -> Arc<dyn OutStream> {
        let guard = self.current_cout.load();
        Arc::clone(&**guard)
    }

    /// The stream currently receiving error output.
    pub fn cerr(&self) -> Arc<dyn OutStream> {
        let guard = self.current_cerr.load();
        Arc::clone(&**guard)
    }

    /// Redirects normal output to `stream`, effective immediately for
    /// subsequent writes.
    pub fn set_cout(&self, stream: Arc<dyn OutStream>) {
        self.current_cout.store(Arc::new(stream));
    }

    /// Redirects error output to `stream`.
    pub fn set_cerr(&self, stream: Arc<dyn OutStream>) {
        self.current_cerr.store(Arc::new(stream));
    }

    /// Restores normal output to the construction-time default.
    pub fn reset_cout(&self) {
        self.current_cout
            .store(Arc::new(Arc::clone(&self.default_cout)));
    }

    /// Restores error output to the construction-time default.
    pub fn reset_cerr(&self) {
        self.current_cerr
            .store(Arc::new(Arc::clone(&self.default_cerr)));
    }
}

impl Drop for StreamManager {
    fn drop(&mut self) {
        self.default_cout.flush();
        self.default_cerr.flush();
    }
}
