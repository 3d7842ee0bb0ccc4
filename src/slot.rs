//! In-place construction and destruction of ring slots.
//!
//! Every slot of a live `Ring` holds an initialised value. Overwriting a slot
//! drops its previous occupant exactly once. For element types without drop
//! glue the same assignment compiles down to a plain byte copy, so one code
//! path serves both kinds of element.

use core::mem;
use core::ptr::{self, NonNull};

use crate::storage::Allocator;

/// Overwrites an initialised slot with `value`, dropping the old one.
#[inline]
pub fn emplace<T>(slot: &mut T, value: T) {
    *slot = value;
}

/// Moves the value out of `slot`, leaving `T::default()` behind.
#[inline]
pub fn take<T: Default>(slot: &mut T) -> T {
    mem::replace(slot, T::default())
}

/// Initialises a freshly acquired block front to back.
///
/// Dropping a `Filler` before `finish` drops every slot written so far and
/// hands the block back to its allocator, so a panicking element constructor
/// leaves nothing behind.
pub struct Filler<'a, T, A: Allocator> {
    alloc: &'a A,
    block: NonNull<T>,
    len: usize,
    cap: usize,
}

impl<'a, T, A: Allocator> Filler<'a, T, A> {
    /// Takes charge of `block`, which must hold `cap` uninitialised slots
    /// acquired from `alloc`.
    #[inline]
    pub fn new(alloc: &'a A, block: NonNull<T>, cap: usize) -> Filler<'a, T, A> {
        Filler {
            alloc,
            block,
            len: 0,
            cap,
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.cap
    }

    /// Writes `value` into the next slot. Values past the end are dropped.
    #[inline]
    pub fn push(&mut self, value: T) {
        if self.is_full() {
            return;
        }
        unsafe { ptr::write(self.block.as_ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Fills every remaining slot with values produced by `f`.
    pub fn fill_with<F: FnMut() -> T>(&mut self, mut f: F) {
        while !self.is_full() {
            self.push(f());
        }
    }

    /// Moves `n` values out of `src` bitwise.
    ///
    /// The caller must make sure the values at `src` are not dropped again.
    pub unsafe fn move_from(&mut self, src: *const T, n: usize) {
        assert!(n <= self.cap - self.len);
        ptr::copy_nonoverlapping(src, self.block.as_ptr().add(self.len), n);
        self.len += n;
    }

    /// Returns the block once every slot is initialised.
    pub fn finish(self) -> NonNull<T> {
        assert!(self.is_full(), "ring block left partly initialised");
        let block = self.block;
        mem::forget(self);
        block
    }
}

impl<'a, T, A: Allocator> Drop for Filler<'a, T, A> {
    fn drop(&mut self) {
        unsafe {
            let written = ptr::slice_from_raw_parts_mut(self.block.as_ptr(), self.len);
            ptr::drop_in_place(written);
            self.alloc.deallocate(self.block, self.cap);
        }
    }
}
