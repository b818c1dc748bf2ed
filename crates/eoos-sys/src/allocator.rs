//! Raw byte allocation from the process-wide heap (`spec.md` §4.3).

use std::alloc::Layout;
use std::ptr::NonNull;

/// Process-wide raw allocator. Stateless: every operation delegates
/// directly to the host's global allocator, so it is reentrant-safe by
/// construction — there is no shared mutable state here to race on.
pub struct Allocator;

#[cfg(not(feature = "no-heap"))]
impl Allocator {
    /// Allocates `size` bytes with `align` alignment, or `None` on failure.
    pub fn allocate(size: usize, align: usize) -> Option<NonNull<u8>> {
        if size == 0 {
            return None;
        }
        let layout = Layout::from_size_align(size, align).ok()?;
        // SAFETY: `layout` has non-zero size, as checked above.
        let ptr = unsafe { std::alloc::alloc(layout) };
        NonNull::new(ptr)
    }

    /// Frees memory previously returned by [`Allocator::allocate`] with the
    /// same `size`/`align`.
    ///
    /// # Safety
    /// `ptr` must have been returned by [`Allocator::allocate`] with the
    /// identical `size`/`align`, and must not be freed twice.
    pub unsafe fn free(ptr: NonNull<u8>, size: usize, align: usize) {
        if let Ok(layout) = Layout::from_size_align(size, align) {
            // SAFETY: caller contract above.
            unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) };
        }
    }
}

#[cfg(feature = "no-heap")]
impl Allocator {
    /// `no-heap` builds never hand out memory.
    pub fn allocate(_size: usize, _align: usize) -> Option<NonNull<u8>> {
        None
    }

    /// `no-heap` builds have nothing to free.
    ///
    /// # Safety
    /// No-op; any pointer value is accepted.
    pub unsafe fn free(_ptr: NonNull<u8>, _size: usize, _align: usize) {}
}
