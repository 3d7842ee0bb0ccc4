use core::iter::FusedIterator;
use core::ptr;

use super::*;

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(ring: &'a [T], start: usize, end: usize) -> Iter<'a, T> {
        assert!(start <= end && end <= ring.len());
        Iter { ring, start, end }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    #[inline]
    fn clone(&self) -> Iter<'a, T> {
        Iter { ring: self.ring, start: self.start, end: self.end }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.start == self.end {
            return None;
        }
        let start = self.start;
        self.start += 1;
        unsafe { Some(self.ring.get_unchecked(start)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        unsafe { Some(self.ring.get_unchecked(self.end)) }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.inner.next_back()
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

impl<T, const N: usize, A: Allocator> IntoIter<T, N, A> {
    pub(crate) fn new(ring: Ring<T, N, A>) -> IntoIter<T, N, A> {
        // the iterator takes over the block and its allocator
        let ring = NoDrop::new(ring);
        IntoIter {
            block: ring.ptr,
            start: 0,
            end: N,
            alloc: unsafe { ptr::read(&ring.alloc) },
            marker: PhantomData,
        }
    }
}

impl<T, const N: usize, A: Allocator> Iterator for IntoIter<T, N, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let start = self.start;
        self.start += 1;
        unsafe { Some(ptr::read(self.block.as_ptr().add(start))) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T, const N: usize, A: Allocator> DoubleEndedIterator for IntoIter<T, N, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        unsafe { Some(ptr::read(self.block.as_ptr().add(self.end))) }
    }
}

impl<T, const N: usize, A: Allocator> ExactSizeIterator for IntoIter<T, N, A> {}

impl<T, const N: usize, A: Allocator> FusedIterator for IntoIter<T, N, A> {}

impl<T, const N: usize, A: Allocator> Drop for IntoIter<T, N, A> {
    fn drop(&mut self) {
        unsafe {
            let rest = ptr::slice_from_raw_parts_mut(self.block.as_ptr().add(self.start),
                                                     self.end - self.start);
            ptr::drop_in_place(rest);
            self.alloc.deallocate(self.block, N);
        }
    }
}
