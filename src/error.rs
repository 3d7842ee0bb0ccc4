//! Error values returned by fallible `Ring` constructors.

#[cfg(feature = "std")]
use std::error::Error;
use core::fmt;

/// Error value indicating that the allocator could not provide a block.
///
/// Returned by every constructor that takes an explicit allocator, and by
/// `Ring::try_clone`. No partially built `Ring` survives the error.
#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct AllocError {
    /// Number of slots that were requested.
    pub slots: usize,
}

const ALLOCERROR: &str = "ring storage allocation failed";

impl AllocError {
    /// Creates an error for a failed request of `slots` slots.
    #[inline]
    pub fn new(slots: usize) -> AllocError {
        AllocError { slots }
    }
}

#[cfg(feature = "std")]
impl Error for AllocError {}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} slots)", ALLOCERROR, self.slots)
    }
}

impl fmt::Debug for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AllocError: {} ({} slots)", ALLOCERROR, self.slots)
    }
}
