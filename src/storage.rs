//! Storage providers for `Ring`.

use alloc::alloc::{alloc, dealloc, Layout};
use core::ptr::NonNull;

use crate::error::AllocError;

/// A provider of contiguous, uninitialised slot blocks.
///
/// A `Ring` asks its allocator for exactly one block of `N` slots when it is
/// built and hands the same block back exactly once when it is dropped.
///
/// # Safety
///
/// A successful `allocate::<T>(n)` must return a pointer that is aligned for
/// `T` and valid for reads and writes of `n` consecutive `T`s until it is
/// passed to `deallocate::<T>(_, n)`. Blocks of zero bytes may be dangling.
pub unsafe trait Allocator {
    /// Acquires a block of `n` slots sized for `T`.
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, AllocError>;

    /// Returns a block previously acquired with `allocate::<T>(n)`.
    ///
    /// # Safety
    ///
    /// `block` must come from this allocator with the same `T` and `n`, and
    /// must not be used afterwards.
    unsafe fn deallocate<T>(&self, block: NonNull<T>, n: usize);
}

/// The global heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Heap;

#[inline]
fn layout_for<T>(n: usize) -> Option<Layout> {
    Layout::array::<T>(n).ok()
}

unsafe impl Allocator for Heap {
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        let layout = match layout_for::<T>(n) {
            Some(layout) => layout,
            None => {
                tracing::warn!(slots = n, "ring block size overflows the address space");
                return Err(AllocError::new(n));
            }
        };
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        let ptr = unsafe { alloc(layout) } as *mut T;
        match NonNull::new(ptr) {
            Some(block) => {
                tracing::trace!(slots = n, bytes = layout.size(), "acquired ring block");
                Ok(block)
            }
            None => {
                tracing::warn!(slots = n, bytes = layout.size(), "global allocator refused ring block");
                Err(AllocError::new(n))
            }
        }
    }

    unsafe fn deallocate<T>(&self, block: NonNull<T>, n: usize) {
        // allocate() only hands out blocks whose layout is valid
        let layout = match layout_for::<T>(n) {
            Some(layout) => layout,
            None => return,
        };
        if layout.size() == 0 {
            return;
        }
        tracing::trace!(slots = n, bytes = layout.size(), "released ring block");
        dealloc(block.as_ptr() as *mut u8, layout);
    }
}
