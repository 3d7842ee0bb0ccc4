use core::marker::PhantomData;
use core::ptr::NonNull;
use core::slice;

use nodrop::NoDrop;

use crate::error::AllocError;
use crate::position::{Position, PositionMut, RevPosition};
use crate::slot::{self, Filler};
use crate::storage::{Allocator, Heap};
use crate::utils::wrap_add;
use crate::RangeArgument;

mod iterator_impls;
mod trait_impls;

/// `Ring` is a fixed capacity circular buffer of exactly `N` slots.
///
/// All `N` slots live in a single block acquired from the allocator `A` when
/// the ring is built, and every slot always holds a value. Two independent
/// cursors walk the block with wraparound: `head` is where `enter` writes
/// next, `tail` is where `consume` reads next.
///
/// # Capacity
///
/// The ring keeps no count of live elements. When `head == tail` the ring may
/// be empty or completely full; telling the two apart is up to the caller.
/// Entering more than `N` values before consuming them overwrites the oldest
/// ones, and consuming more than was entered yields whatever the slots held,
/// which is `T::default()` for slots that were already consumed.
///
/// # Examples
///
/// ```
/// use fixring::Ring;
///
/// let mut ring: Ring<i32, 4> = Ring::new();
/// ring.enter(10);
/// ring.enter(20);
///
/// assert_eq!(ring.consume(), 10);
/// assert_eq!(ring.consume(), 20);
/// assert_eq!(ring.as_slice(), &[0, 0, 0, 0]);
/// ```
pub struct Ring<T, const N: usize, A: Allocator = Heap> {
    ptr: NonNull<T>,
    head: usize,
    tail: usize,
    alloc: A,
    marker: PhantomData<T>,
}

/// `Ring` iterator over a run of physical slots.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    ring: &'a [T],
    start: usize,
    end: usize,
}

/// `Ring` mutable iterator over its physical slots.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T: 'a> {
    inner: slice::IterMut<'a, T>,
}

/// A by-value `Ring` iterator, yielding the slots in storage order.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IntoIter<T, const N: usize, A: Allocator = Heap> {
    block: NonNull<T>,
    start: usize,
    end: usize,
    alloc: A,
    marker: PhantomData<T>,
}

#[cold]
#[inline(never)]
fn alloc_failure(err: AllocError) -> ! {
    panic!("{}", err)
}

impl<T, const N: usize> Ring<T, N> {
    /// Creates a ring on the heap with every slot set to `T::default()`.
    ///
    /// # Panics
    ///
    /// Panics if the block cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let ring: Ring<usize, 3> = Ring::new();
    /// assert_eq!(ring.as_slice(), &[0, 0, 0]);
    /// ```
    #[inline]
    pub fn new() -> Ring<T, N>
        where T: Default
    {
        Ring::with_allocator(Heap).unwrap_or_else(|err| alloc_failure(err))
    }

    /// Creates a ring on the heap with every slot set to a clone of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let ring: Ring<_, 3> = Ring::from_elem("x");
    /// assert_eq!(ring.as_slice(), &["x", "x", "x"]);
    /// ```
    #[inline]
    pub fn from_elem(value: T) -> Ring<T, N>
        where T: Clone
    {
        Ring::from_elem_in(value, Heap).unwrap_or_else(|err| alloc_failure(err))
    }

    /// Creates a ring on the heap from an initializer of at most `N` values.
    ///
    /// The values fill the slots from the front, the remaining slots are set
    /// to `T::default()`. Passing more than `N` values is a contract violation
    /// caught by a debug assertion; release builds keep the first `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let ring: Ring<_, 4> = Ring::from_slice(&[1, 2]);
    /// assert_eq!(ring.as_slice(), &[1, 2, 0, 0]);
    /// ```
    #[inline]
    pub fn from_slice(values: &[T]) -> Ring<T, N>
        where T: Clone + Default
    {
        Ring::from_slice_in(values, Heap).unwrap_or_else(|err| alloc_failure(err))
    }

    /// Creates a ring on the heap by moving the `N` values of `array` into it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let mut ring = Ring::from_array([String::from("a"), String::from("b")]);
    /// assert_eq!(ring.consume(), "a");
    /// ```
    #[inline]
    pub fn from_array(array: [T; N]) -> Ring<T, N> {
        Ring::from_array_in(array, Heap).unwrap_or_else(|err| alloc_failure(err))
    }
}

impl<T, const N: usize, A: Allocator> Ring<T, N, A> {
    /// The number of slots in every `Ring<T, N, _>`.
    pub const CAPACITY: usize = N;

    /// Acquires a block from `alloc` and lets `init` fill all `N` slots.
    fn build<F>(alloc: A, init: F) -> Result<Ring<T, N, A>, AllocError>
        where F: FnOnce(&mut Filler<'_, T, A>)
    {
        let block = alloc.allocate::<T>(N)?;
        let ptr = {
            let mut filler = Filler::new(&alloc, block, N);
            init(&mut filler);
            filler.finish()
        };
        Ok(Ring {
            ptr,
            head: 0,
            tail: 0,
            alloc,
            marker: PhantomData,
        })
    }

    /// Creates a ring in storage from `alloc`, with every slot set to
    /// `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns `AllocError` if `alloc` cannot provide the block.
    #[inline]
    pub fn with_allocator(alloc: A) -> Result<Ring<T, N, A>, AllocError>
        where T: Default
    {
        Ring::build(alloc, |filler| filler.fill_with(T::default))
    }

    /// Creates a ring in storage from `alloc`, with every slot set to a clone
    /// of `value`.
    #[inline]
    pub fn from_elem_in(value: T, alloc: A) -> Result<Ring<T, N, A>, AllocError>
        where T: Clone
    {
        Ring::build(alloc, |filler| filler.fill_with(|| value.clone()))
    }

    /// Creates a ring in storage from `alloc` from an initializer of at most
    /// `N` values. See `Ring::from_slice`.
    pub fn from_slice_in(values: &[T], alloc: A) -> Result<Ring<T, N, A>, AllocError>
        where T: Clone + Default
    {
        debug_assert!(values.len() <= N,
                      "an initializer of {} values is too large for a ring of {} slots",
                      values.len(),
                      N);
        Ring::build(alloc, |filler| {
            for value in values.iter().take(N) {
                filler.push(value.clone());
            }
            filler.fill_with(T::default);
        })
    }

    /// Creates a ring in storage from `alloc` from an iterator of at most `N`
    /// values.
    ///
    /// Remaining slots are set to `T::default()`. Yielding more than `N`
    /// values is a contract violation caught by a debug assertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::{Heap, Ring};
    ///
    /// let ring: Ring<_, 5> = Ring::from_iter_in(1..4, Heap).unwrap();
    /// assert_eq!(ring.as_slice(), &[1, 2, 3, 0, 0]);
    /// ```
    pub fn from_iter_in<I>(iter: I, alloc: A) -> Result<Ring<T, N, A>, AllocError>
        where I: IntoIterator<Item = T>,
              T: Default
    {
        let mut iter = iter.into_iter();
        let ring = Ring::build(alloc, |filler| {
            for value in iter.by_ref().take(N) {
                filler.push(value);
            }
            filler.fill_with(T::default);
        })?;
        debug_assert!(iter.next().is_none(),
                      "the range is too large for a ring of {} slots",
                      N);
        Ok(ring)
    }

    /// Creates a ring in storage from `alloc` by moving the `N` values of
    /// `array` into it.
    pub fn from_array_in(array: [T; N], alloc: A) -> Result<Ring<T, N, A>, AllocError> {
        Ring::build(alloc, move |filler| {
            // the values now belong to the block
            let array = NoDrop::new(array);
            unsafe { filler.move_from(array.as_ptr(), N) }
        })
    }

    /// Creates a ring in storage from `alloc` by moving the values of a
    /// `GenericArray` into it.
    ///
    /// # Panics
    ///
    /// Panics if the array does not hold exactly `N` values. Unlike the
    /// length checks of `from_slice_in` and `from_iter_in`, this one is kept
    /// in release builds: the values are moved bitwise, and a shorter array
    /// would leave slots uninitialised.
    #[cfg(feature = "use_generic_array")]
    pub fn from_generic_array_in<U>(array: generic_array::GenericArray<T, U>,
                                    alloc: A)
                                    -> Result<Ring<T, N, A>, AllocError>
        where U: generic_array::ArrayLength<T>
    {
        use generic_array::typenum::Unsigned;

        assert_eq!(<U as Unsigned>::USIZE,
                   N,
                   "a generic array of {} values does not fit a ring of {} slots",
                   <U as Unsigned>::USIZE,
                   N);
        Ring::build(alloc, move |filler| {
            let array = NoDrop::new(array);
            unsafe { filler.move_from(array.as_slice().as_ptr(), N) }
        })
    }

    /// Duplicates the ring into a fresh block from a clone of its allocator.
    ///
    /// The copy has its own storage and the same cursor positions.
    ///
    /// # Errors
    ///
    /// Returns `AllocError` if the allocator cannot provide the block.
    pub fn try_clone(&self) -> Result<Ring<T, N, A>, AllocError>
        where T: Clone,
              A: Clone
    {
        let mut ring = Ring::build(self.alloc.clone(), |filler| {
            for value in self.as_slice() {
                filler.push(value.clone());
            }
        })?;
        ring.head = self.head;
        ring.tail = self.tail;
        Ok(ring)
    }

    /// Returns the number of slots, `N`.
    #[inline]
    pub fn capacity(&self) -> usize {
        N
    }

    /// Returns a reference to the allocator backing this ring.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a copy of the allocator backing this ring.
    #[inline]
    pub fn get_allocator(&self) -> A
        where A: Clone
    {
        self.alloc.clone()
    }

    /// Returns a raw pointer to slot 0.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Views the slots in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), N) }
    }

    /// Views the slots mutably in storage order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), N) }
    }

    /// Returns the slot index the head cursor points at.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the slot index the tail cursor points at.
    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Advances the head cursor by one slot, wrapping to slot 0 after the
    /// last one.
    #[inline]
    pub fn step_head(&mut self) {
        if N == 0 {
            return;
        }
        self.head = wrap_add(self.head, 1, N);
    }

    /// Advances the tail cursor by one slot, wrapping to slot 0 after the
    /// last one.
    #[inline]
    pub fn step_tail(&mut self) {
        if N == 0 {
            return;
        }
        self.tail = wrap_add(self.tail, 1, N);
    }

    /// Returns the value under the head cursor, or `None` if `N == 0`.
    #[inline]
    pub fn read_head(&self) -> Option<&T> {
        self.as_slice().get(self.head)
    }

    /// Returns the value under the tail cursor, or `None` if `N == 0`.
    #[inline]
    pub fn read_tail(&self) -> Option<&T> {
        self.as_slice().get(self.tail)
    }

    #[inline]
    fn emplace_at(&mut self, index: usize, value: T) -> Option<&mut T> {
        let target = self.as_mut_slice().get_mut(index)?;
        slot::emplace(target, value);
        Some(target)
    }

    /// Writes `value` into the slot under the head cursor without moving it.
    ///
    /// The previous occupant of the slot is dropped. Returns the written slot,
    /// or `None` (dropping `value`) if `N == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let mut ring: Ring<u8, 2> = Ring::new();
    /// *ring.emplace_head(4).unwrap() += 1;
    /// assert_eq!(ring.read_head(), Some(&5));
    /// assert_eq!(ring.head(), 0);
    /// ```
    #[inline]
    pub fn emplace_head(&mut self, value: T) -> Option<&mut T> {
        let head = self.head;
        self.emplace_at(head, value)
    }

    /// Writes `value` into the slot under the tail cursor without moving it.
    ///
    /// Returns the written slot, or `None` (dropping `value`) if `N == 0`.
    #[inline]
    pub fn emplace_tail(&mut self, value: T) -> Option<&mut T> {
        let tail = self.tail;
        self.emplace_at(tail, value)
    }

    /// Builds a value with `f` directly into the slot under the head cursor.
    ///
    /// `f` is not called if `N == 0`.
    #[inline]
    pub fn emplace_head_with<F>(&mut self, f: F) -> Option<&mut T>
        where F: FnOnce() -> T
    {
        if N == 0 {
            return None;
        }
        self.emplace_head(f())
    }

    /// Builds a value with `f` directly into the slot under the tail cursor.
    ///
    /// `f` is not called if `N == 0`.
    #[inline]
    pub fn emplace_tail_with<F>(&mut self, f: F) -> Option<&mut T>
        where F: FnOnce() -> T
    {
        if N == 0 {
            return None;
        }
        self.emplace_tail(f())
    }

    /// Writes `value` under the head cursor and advances the head.
    ///
    /// Does nothing if `N == 0`. No fullness check is made: entering into a
    /// slot that has not been consumed yet overwrites it.
    #[inline]
    pub fn enter(&mut self, value: T) {
        if self.emplace_head(value).is_some() {
            self.step_head();
        }
    }

    /// Moves the value under the tail cursor out, leaves `T::default()` in its
    /// slot and advances the tail.
    ///
    /// Returns `T::default()` without touching storage if `N == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let mut ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
    ///
    /// assert_eq!(ring.consume(), 1);
    /// assert_eq!(ring.consume(), 2);
    /// assert_eq!(ring.consume(), 3);
    /// assert_eq!(ring.as_slice(), &[0, 0, 0]);
    ///
    /// ring.enter(4);
    /// assert_eq!(ring.consume(), 4);
    /// ```
    #[inline]
    pub fn consume(&mut self) -> T
        where T: Default
    {
        if N == 0 {
            return T::default();
        }
        let tail = self.tail;
        let value = slot::take(&mut self.as_mut_slice()[tail]);
        self.step_tail();
        value
    }

    #[inline]
    fn owner(&self) -> usize {
        self as *const Ring<T, N, A> as usize
    }

    /// Returns the position of slot 0.
    #[inline]
    pub fn begin(&self) -> Position<T> {
        Position::new(self.owner(), self.as_slice(), 0)
    }

    /// Returns the position one past the last slot.
    #[inline]
    pub fn end(&self) -> Position<T> {
        Position::new(self.owner(), self.as_slice(), N)
    }

    /// Returns a writable position at slot 0.
    #[inline]
    pub fn begin_mut(&mut self) -> PositionMut<T> {
        PositionMut::new(self.as_mut_slice(), 0)
    }

    /// Returns a writable position one past the last slot.
    #[inline]
    pub fn end_mut(&mut self) -> PositionMut<T> {
        PositionMut::new(self.as_mut_slice(), N)
    }

    /// Returns the reverse position of the last slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
    /// let mut pos = ring.rbegin();
    /// let mut seen = Vec::new();
    /// while pos != ring.rend() {
    ///     seen.push(*pos.get());
    ///     pos.forward();
    /// }
    /// assert_eq!(seen, [3, 2, 1]);
    /// ```
    #[inline]
    pub fn rbegin(&self) -> RevPosition<Position<T>> {
        RevPosition::new(self.end())
    }

    /// Returns the reverse position past slot 0.
    #[inline]
    pub fn rend(&self) -> RevPosition<Position<T>> {
        RevPosition::new(self.begin())
    }

    /// Returns a writable reverse position of the last slot.
    #[inline]
    pub fn rbegin_mut(&mut self) -> RevPosition<PositionMut<T>> {
        RevPosition::new(self.end_mut())
    }

    /// Returns a writable reverse position past slot 0.
    #[inline]
    pub fn rend_mut(&mut self) -> RevPosition<PositionMut<T>> {
        RevPosition::new(self.begin_mut())
    }

    /// Returns an iterator over every slot in storage order.
    ///
    /// The iterator is double-ended, `iter().rev()` walks from the last slot
    /// back to slot 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let ring: Ring<_, 3> = Ring::from_array([5, 3, 4]);
    /// let forward: Vec<_> = ring.iter().collect();
    /// let backward: Vec<_> = ring.iter().rev().collect();
    /// assert_eq!(forward, [&5, &3, &4]);
    /// assert_eq!(backward, [&4, &3, &5]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<T> {
        self.begin().until(self.end())
    }

    /// Returns an iterator over every slot in storage order that returns
    /// mutable references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<T> {
        IterMut { inner: self.as_mut_slice().iter_mut() }
    }

    /// Returns an iterator over the slots in `range`, in storage order.
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end
    /// is greater than `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let ring: Ring<_, 5> = Ring::from_array([0, 1, 2, 3, 4]);
    /// let tail: Vec<_> = ring.range(3..).cloned().collect();
    /// assert_eq!(tail, [3, 4]);
    /// let all: Vec<_> = ring.range(..).cloned().collect();
    /// assert_eq!(all, [0, 1, 2, 3, 4]);
    /// ```
    pub fn range<R>(&self, range: R) -> Iter<T>
        where R: RangeArgument
    {
        let start = range.start().unwrap_or(0);
        let end = range.end().unwrap_or(N);
        assert!(start <= end, "range start {} is past its end {}", start, end);
        assert!(end <= N, "range end {} is past a ring of {} slots", end, N);
        Iter::new(self.as_slice(), start, end)
    }

    /// Rotates the slot contents one place to the left: slot 0 moves to the
    /// last slot and every other value moves down by one.
    ///
    /// The value of slot 0 is carried from `begin` towards `end`.
    ///
    /// The head and tail cursors are not moved.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let mut ring: Ring<_, 4> = Ring::from_array([1, 2, 3, 4]);
    /// ring.rotate_left();
    /// assert_eq!(ring.as_slice(), &[2, 3, 4, 1]);
    /// ring.rotate_right();
    /// assert_eq!(ring.as_slice(), &[1, 2, 3, 4]);
    /// ```
    #[inline]
    pub fn rotate_left(&mut self) {
        let mut pos = self.begin_mut();
        for _ in 1..N {
            pos.carry();
        }
    }

    /// Rotates the slot contents one place to the right: the last slot moves
    /// to slot 0 and every other value moves up by one.
    ///
    /// The value of the last slot is carried from `rbegin` towards `rend`.
    ///
    /// The head and tail cursors are not moved.
    #[inline]
    pub fn rotate_right(&mut self) {
        let mut pos = self.rbegin_mut();
        for _ in 1..N {
            pos.carry();
        }
    }
}
