//! A fixed capacity ring with independent head and tail cursors.
//!
//! A `Ring<T, N>` owns exactly `N` slots of `T` in one contiguous block taken
//! from an allocator when it is built. It can be walked like an array, from
//! slot 0 to slot `N - 1`, and it can be used as a FIFO through two cursors
//! that wrap around the block independently: `enter` writes at the head,
//! `consume` reads at the tail.
//!
//! The ring never tracks how many values are "live". Every slot always holds a
//! value, and it is up to the caller not to enter more than it consumes (or
//! the other way around).
//!
//! # Feature Flags
//! The **fixring** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd; without it the crate is `no_std` and only needs `alloc`
//!
//!
//! - `use_generic_array`
//!   - Optional
//!   - Depend on generic-array and allow moving a `GenericArray` into a ring
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! fixring = "0.1"
//! ```
//!
//! # Enter & Consume
//! ```
//! use fixring::Ring;
//!
//! let mut ring: Ring<i32, 4> = Ring::new();
//!
//! ring.enter(10);
//! ring.enter(20);
//! assert_eq!(ring.read_tail(), Some(&10));
//!
//! assert_eq!(ring.consume(), 10);
//! assert_eq!(ring.consume(), 20);
//! assert_eq!(ring.head(), ring.tail());
//! ```
//!
//! # Traverse & Rotate
//! ```
//! use fixring::Ring;
//!
//! let mut ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
//!
//! ring.rotate_left();
//! assert_eq!(format!("{}", ring), "[2, 3, 1]");
//!
//! let reversed: Vec<_> = ring.iter().rev().cloned().collect();
//! assert_eq!(reversed, vec![1, 3, 2]);
//!
//! let last = ring.rbegin();
//! assert_eq!(*last.get(), 1);
//! ```
//!
//! # Custom Storage
//! ```
//! use fixring::{AllocError, Allocator, Heap, Ring};
//! use std::ptr::NonNull;
//!
//! #[derive(Clone, Default)]
//! struct Refusing;
//!
//! unsafe impl Allocator for Refusing {
//!     fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, AllocError> {
//!         Err(AllocError::new(n))
//!     }
//!
//!     unsafe fn deallocate<T>(&self, block: NonNull<T>, n: usize) {
//!         Heap.deallocate(block, n)
//!     }
//! }
//!
//! let ring = Ring::<u32, 8, _>::with_allocator(Refusing);
//! assert_eq!(ring.unwrap_err(), AllocError::new(8));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;

pub use odds::IndexRange as RangeArgument;

pub mod error;
mod position;
mod ring;
mod slot;
mod storage;
mod utils;

pub use crate::error::AllocError;
pub use crate::position::{Position, PositionMut, RevPosition, Seek};
pub use crate::ring::{IntoIter, Iter, IterMut, Ring};
pub use crate::storage::{Allocator, Heap};
