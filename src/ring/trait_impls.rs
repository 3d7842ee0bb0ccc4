use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter;
use core::ops::{Index, IndexMut};
use core::ptr;

use super::*;

impl<T, const N: usize, A> Clone for Ring<T, N, A>
    where T: Clone,
          A: Allocator + Clone
{
    fn clone(&self) -> Ring<T, N, A> {
        self.try_clone().unwrap_or_else(|err| alloc_failure(err))
    }
}

impl<T, const N: usize, A: Allocator> Drop for Ring<T, N, A> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
            self.alloc.deallocate(self.ptr, N);
        }
    }
}

impl<T, const N: usize, A> Default for Ring<T, N, A>
    where T: Default,
          A: Allocator + Default
{
    #[inline]
    fn default() -> Ring<T, N, A> {
        Ring::with_allocator(A::default()).unwrap_or_else(|err| alloc_failure(err))
    }
}

unsafe impl<T: Send, const N: usize, A: Allocator + Send> Send for Ring<T, N, A> {}

unsafe impl<T: Sync, const N: usize, A: Allocator + Sync> Sync for Ring<T, N, A> {}

unsafe impl<T: Send, const N: usize, A: Allocator + Send> Send for IntoIter<T, N, A> {}

unsafe impl<T: Sync, const N: usize, A: Allocator + Sync> Sync for IntoIter<T, N, A> {}

/// Rings compare slot by slot in storage order; cursor positions are ignored.
impl<T, const N: usize, A, B> PartialEq<Ring<T, N, B>> for Ring<T, N, A>
    where T: PartialEq,
          A: Allocator,
          B: Allocator
{
    #[inline]
    fn eq(&self, other: &Ring<T, N, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize, A: Allocator> Eq for Ring<T, N, A> {}

impl<T: PartialOrd, const N: usize, A: Allocator> PartialOrd for Ring<T, N, A> {
    #[inline]
    fn partial_cmp(&self, other: &Ring<T, N, A>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, const N: usize, A: Allocator> Ord for Ring<T, N, A> {
    #[inline]
    fn cmp(&self, other: &Ring<T, N, A>) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, const N: usize, A: Allocator> Hash for Ring<T, N, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash_slice(self.as_slice(), state);
    }
}

impl<T, const N: usize, A: Allocator> Index<usize> for Ring<T, N, A> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.as_slice()
            .get(index)
            .unwrap_or_else(|| {
                panic!("index out of bounds: the ring has {} slots but the index is {}",
                       N,
                       index)
            })
    }
}

impl<T, const N: usize, A: Allocator> IndexMut<usize> for Ring<T, N, A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.as_mut_slice()
            .get_mut(index)
            .unwrap_or_else(|| {
                panic!("index out of bounds: the ring has {} slots but the index is {}",
                       N,
                       index)
            })
    }
}

impl<T, const N: usize, A> iter::FromIterator<T> for Ring<T, N, A>
    where T: Default,
          A: Allocator + Default
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Ring<T, N, A> {
        Ring::from_iter_in(iter, A::default()).unwrap_or_else(|err| alloc_failure(err))
    }
}

impl<T, const N: usize> From<[T; N]> for Ring<T, N> {
    #[inline]
    fn from(array: [T; N]) -> Ring<T, N> {
        Ring::from_array(array)
    }
}

/// Extend the `Ring` by entering every value at the head.
///
/// Values beyond `N` wrap around and overwrite earlier ones.
impl<T, const N: usize, A: Allocator> Extend<T> for Ring<T, N, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enter(value);
        }
    }
}

impl<T, const N: usize, A: Allocator> IntoIterator for Ring<T, N, A> {
    type Item = T;
    type IntoIter = IntoIter<T, N, A>;

    fn into_iter(self) -> IntoIter<T, N, A> {
        IntoIter::new(self)
    }
}

impl<'a, T, const N: usize, A: Allocator> IntoIterator for &'a Ring<T, N, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, const N: usize, A: Allocator> IntoIterator for &'a mut Ring<T, N, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, const N: usize, A: Allocator> fmt::Debug for Ring<T, N, A>
    where T: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Lists the slots in storage order, as in `[1, 2, 3]`.
impl<T, const N: usize, A: Allocator> fmt::Display for Ring<T, N, A>
    where T: fmt::Display
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.as_slice().iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        f.write_str("]")
    }
}
