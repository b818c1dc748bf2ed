//! The `Heap` capability object (`spec.md` §4.3): a thin, polymorphic
//! wrapper around [`Allocator`] that also supports placement-style reuse
//! of a caller-supplied address.

use std::ptr::NonNull;

use crate::allocator::Allocator;
use crate::error::ConstructError;

/// Process-wide heap handle. Delegates every allocation to [`Allocator`]
/// in this backend — it exists as a named capability object so user code
/// can depend on "a heap" rather than on the `Allocator` free functions
/// directly, which keeps the door open for a future backend that *does*
/// carry state (an arena, a pool) without changing callers. The one bit
/// of state it does carry is the `Configuration::heap_size` it was
/// constructed with, for callers that want to know the reservation the
/// host was asked to make.
#[derive(Debug, Default, Clone, Copy)]
pub struct Heap {
    configured_size: Option<u64>,
}

impl Heap {
    pub const fn new() -> Self {
        Heap {
            configured_size: None,
        }
    }

    /// The fallible constructor [`crate::system::System::new`] uses,
    /// passing through the `Configuration::heap_size` it was given (if
    /// any dynamic-heap build supplied one). This reference backend's
    /// heap cannot itself fail, but the construction-discipline contract
    /// (§4.1) requires every System sub-system to go through a
    /// `Result`-returning path so a future backend (or, under
    /// `cfg(test)`/the `testkit` feature, [`crate::testkit`]'s fault
    /// injection) can report `AllocatorUnavailable` without changing
    /// `System`'s assembly code.
    pub fn construct(heap_size: Option<u64>) -> Result<Self, ConstructError> {
        #[cfg(any(test, feature = "testkit"))]
        if crate::testkit::allocator_should_fail() {
            return Err(ConstructError::AllocatorUnavailable);
        }
        Ok(Heap {
            configured_size: heap_size,
        })
    }

    /// The `Configuration::heap_size` this heap was constructed with, or
    /// `None` if the host never supplied one (the platform default
    /// applies in that case).
    pub fn configured_size(&self) -> Option<u64> {
        self.configured_size
    }

    /// Allocates `size` bytes aligned to `align`.
    ///
    /// If `preallocated` is `Some`, it is returned unchanged without
    /// consulting the allocator at all — this is the "placement-style
    /// reuse" escape hatch from `spec.md` §4.3, useful when the caller
    /// already owns a suitably sized, suitably aligned region and wants
    /// `Heap` to treat it uniformly with a freshly allocated one.
    pub fn allocate(
        &self,
        size: usize,
        align: usize,
        preallocated: Option<NonNull<u8>>,
    ) -> Option<NonNull<u8>> {
        match preallocated {
            Some(ptr) => Some(ptr),
            None => Allocator::allocate(size, align),
        }
    }

    /// Frees memory obtained from [`Heap::allocate`] when `preallocated`
    /// was `None` at allocation time. Freeing a placement pointer is the
    /// caller's own responsibility and must not be routed through here.
    ///
    /// # Safety
    /// See [`Allocator::free`].
    pub unsafe fn free(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        // SAFETY: caller contract forwarded from `Allocator::free`.
        unsafe { Allocator::free(ptr, size, align) };
    }
}
