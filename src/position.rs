//! Bounded positions over the physical slots of a `Ring`.
//!
//! `Position` reads, `PositionMut` reads and writes, and `RevPosition` walks
//! either of them from the last slot back to slot 0.

use core::cmp;
use core::fmt;
use core::iter;

use crate::ring::Iter;
use crate::utils::{wrap_add, wrap_sub};

/// Raw slot-offset access shared by every position type.
///
/// `RevPosition` is written against this trait, so it adapts `Position` and
/// `PositionMut` alike.
pub trait Seek {
    /// Number of slots in the ring behind this position.
    fn slot_count(&self) -> usize;

    /// Current offset, `slot_count()` for the end position.
    fn offset(&self) -> usize;

    /// Moves to `offset`, clamped to `slot_count()`.
    fn seek(&mut self, offset: usize);
}

#[inline]
fn clamped_forward<P: Seek>(pos: &mut P) {
    let at = pos.offset();
    if at != pos.slot_count() {
        pos.seek(at + 1);
    }
}

#[inline]
fn clamped_backward<P: Seek>(pos: &mut P) {
    let at = pos.offset();
    if at != 0 {
        pos.seek(at - 1);
    }
}

#[inline]
fn wrapped_next<P: Seek>(pos: &mut P) {
    let len = pos.slot_count();
    if len == 0 {
        return;
    }
    let at = pos.offset();
    pos.seek(if at >= len { 0 } else { wrap_add(at, 1, len) });
}

#[inline]
fn wrapped_back<P: Seek>(pos: &mut P) {
    let len = pos.slot_count();
    if len == 0 {
        return;
    }
    let at = pos.offset();
    pos.seek(wrap_sub(at, 1, len));
}

/// A bidirectional position over the slots of a `Ring`, in storage order.
///
/// Positions run from `begin()` (slot 0) to `end()` (one past the last
/// slot). Unlike the head and tail cursors, `forward` and `backward` never
/// wrap: they stop at `end` and `begin` respectively. `wrapping_next` and
/// `wrapping_back` walk the storage circularly instead.
///
/// # Examples
///
/// ```
/// use fixring::Ring;
///
/// let ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
/// let mut pos = ring.begin();
/// pos.forward();
/// assert_eq!(*pos.get(), 2);
///
/// pos.forward();
/// pos.forward();
/// assert!(pos == ring.end());
/// pos.forward();
/// assert!(pos == ring.end());
///
/// pos.wrapping_next();
/// assert_eq!(*pos.get(), 1);
/// pos.wrapping_back();
/// assert_eq!(*pos.get(), 3);
/// ```
pub struct Position<'a, T: 'a> {
    owner: usize,
    slots: &'a [T],
    index: usize,
}

impl<'a, T> Position<'a, T> {
    /// `owner` is the address of the ring the slots belong to.
    #[inline]
    pub(crate) fn new(owner: usize, slots: &'a [T], index: usize) -> Position<'a, T> {
        debug_assert!(index <= slots.len());
        Position { owner, slots, index }
    }

    /// Returns the slot index this position refers to.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if this is the one-past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.slots.len()
    }

    /// Returns the element at this position.
    ///
    /// Reading the `end` position is a contract violation and is caught by a
    /// debug assertion.
    #[inline]
    pub fn get(&self) -> &'a T {
        debug_assert!(self.index < self.slots.len(),
                      "position {} is outside a ring of {} slots",
                      self.index,
                      self.slots.len());
        &self.slots[self.index]
    }

    /// Steps one slot towards `end`, stopping there.
    #[inline]
    pub fn forward(&mut self) {
        clamped_forward(self)
    }

    /// Steps one slot towards `begin`, stopping there.
    #[inline]
    pub fn backward(&mut self) {
        clamped_backward(self)
    }

    /// Steps one slot forward, moving from the last slot (or `end`) to
    /// slot 0.
    #[inline]
    pub fn wrapping_next(&mut self) {
        wrapped_next(self)
    }

    /// Steps one slot backward, moving from slot 0 to the last slot.
    #[inline]
    pub fn wrapping_back(&mut self) {
        wrapped_back(self)
    }

    /// Returns an iterator over the slots from this position up to, but not
    /// including, `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixring::Ring;
    ///
    /// let ring: Ring<_, 4> = Ring::from_array(['a', 'b', 'c', 'd']);
    /// let mut first = ring.begin();
    /// first.forward();
    /// let mut last = ring.end();
    /// last.backward();
    ///
    /// let middle: Vec<_> = first.until(last).collect();
    /// assert_eq!(middle, [&'b', &'c']);
    /// ```
    #[inline]
    pub fn until(self, end: Position<'a, T>) -> Iter<'a, T> {
        debug_assert!(self.owner == end.owner, "positions belong to different rings");
        Iter::new(self.slots, self.index, cmp::max(self.index, end.index))
    }
}

impl<'a, T> Seek for Position<'a, T> {
    #[inline]
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn offset(&self) -> usize {
        self.index
    }

    #[inline]
    fn seek(&mut self, offset: usize) {
        self.index = cmp::min(offset, self.slots.len());
    }
}

impl<'a, T> Clone for Position<'a, T> {
    #[inline]
    fn clone(&self) -> Position<'a, T> {
        *self
    }
}

impl<'a, T> Copy for Position<'a, T> {}

/// Two positions are equal when they belong to the same ring and refer to the
/// same slot.
impl<'a, T> PartialEq for Position<'a, T> {
    #[inline]
    fn eq(&self, other: &Position<'a, T>) -> bool {
        self.owner == other.owner && self.index == other.index
    }
}

impl<'a, T> Eq for Position<'a, T> {}

impl<'a, T> fmt::Debug for Position<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Position")
            .field("index", &self.index)
            .field("len", &self.slots.len())
            .finish()
    }
}

/// A bidirectional position that can write the slot it refers to.
///
/// Moves exactly like `Position`. It borrows the ring mutably, so only one
/// exists at a time.
///
/// # Examples
///
/// ```
/// use fixring::Ring;
///
/// let mut ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
/// let mut pos = ring.begin_mut();
/// while !pos.is_end() {
///     *pos.get_mut() *= 10;
///     pos.forward();
/// }
/// assert_eq!(ring.as_slice(), &[10, 20, 30]);
/// ```
pub struct PositionMut<'a, T: 'a> {
    slots: &'a mut [T],
    index: usize,
}

impl<'a, T> PositionMut<'a, T> {
    #[inline]
    pub(crate) fn new(slots: &'a mut [T], index: usize) -> PositionMut<'a, T> {
        debug_assert!(index <= slots.len());
        PositionMut { slots, index }
    }

    /// Returns the slot index this position refers to.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if this is the one-past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.slots.len()
    }

    /// Returns the element at this position.
    #[inline]
    pub fn get(&self) -> &T {
        debug_assert!(self.index < self.slots.len(),
                      "position {} is outside a ring of {} slots",
                      self.index,
                      self.slots.len());
        &self.slots[self.index]
    }

    /// Returns the element at this position mutably.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        debug_assert!(self.index < self.slots.len(),
                      "position {} is outside a ring of {} slots",
                      self.index,
                      self.slots.len());
        &mut self.slots[self.index]
    }

    /// Steps one slot towards `end`, stopping there.
    #[inline]
    pub fn forward(&mut self) {
        clamped_forward(self)
    }

    /// Steps one slot towards `begin`, stopping there.
    #[inline]
    pub fn backward(&mut self) {
        clamped_backward(self)
    }

    /// Steps one slot forward, moving from the last slot (or `end`) to
    /// slot 0.
    #[inline]
    pub fn wrapping_next(&mut self) {
        wrapped_next(self)
    }

    /// Steps one slot backward, moving from slot 0 to the last slot.
    #[inline]
    pub fn wrapping_back(&mut self) {
        wrapped_back(self)
    }

    /// Swaps the element here with the one in the next slot and follows it.
    ///
    /// Does nothing on the last slot or at `end`.
    #[inline]
    pub fn carry(&mut self) {
        let next = self.index + 1;
        if next < self.slots.len() {
            self.slots.swap(self.index, next);
            self.index = next;
        }
    }
}

impl<'a, T> Seek for PositionMut<'a, T> {
    #[inline]
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn offset(&self) -> usize {
        self.index
    }

    #[inline]
    fn seek(&mut self, offset: usize) {
        self.index = cmp::min(offset, self.slots.len());
    }
}

impl<'a, T> fmt::Debug for PositionMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PositionMut")
            .field("index", &self.index)
            .field("len", &self.slots.len())
            .finish()
    }
}

/// A position walking the slots from the last one back to slot 0.
///
/// Wraps a forward position one slot past the element it reads: `rbegin()`
/// wraps `end()` and reads the last slot, `rend()` wraps `begin()` and reads
/// nothing. `forward` moves towards slot 0 and stops at `rend`, `backward`
/// moves towards the last slot and stops at `rbegin`.
///
/// # Examples
///
/// ```
/// use fixring::Ring;
///
/// let ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
/// let mut pos = ring.rbegin();
/// assert_eq!(*pos.get(), 3);
/// pos.forward();
/// assert_eq!(*pos.get(), 2);
///
/// let rest: Vec<_> = pos.until(ring.rend()).collect();
/// assert_eq!(rest, [&2, &1]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevPosition<P> {
    base: P,
}

impl<P> RevPosition<P> {
    #[inline]
    pub(crate) fn new(base: P) -> RevPosition<P> {
        RevPosition { base }
    }

    /// Returns the wrapped forward position, one slot past the element this
    /// position reads.
    #[inline]
    pub fn base(&self) -> &P {
        &self.base
    }

    /// Unwraps the forward position.
    #[inline]
    pub fn into_base(self) -> P {
        self.base
    }
}

impl<P: Seek> RevPosition<P> {
    /// Returns `true` if this is the position past slot 0.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.base.offset() == 0
    }

    /// Steps one slot towards slot 0, stopping at `rend`.
    #[inline]
    pub fn forward(&mut self) {
        clamped_backward(&mut self.base)
    }

    /// Steps one slot towards the last slot, stopping at `rbegin`.
    #[inline]
    pub fn backward(&mut self) {
        clamped_forward(&mut self.base)
    }

    /// Steps one slot towards slot 0, moving from slot 0 (or `rend`) to the
    /// last slot.
    #[inline]
    pub fn wrapping_next(&mut self) {
        let len = self.base.slot_count();
        if len == 0 {
            return;
        }
        let at = self.base.offset();
        self.base.seek(if at <= 1 { len } else { at - 1 });
    }

    /// Steps one slot towards the last slot, moving from the last slot to
    /// slot 0.
    #[inline]
    pub fn wrapping_back(&mut self) {
        let len = self.base.slot_count();
        if len == 0 {
            return;
        }
        let at = self.base.offset();
        self.base.seek(at % len + 1);
    }
}

impl<'a, T> RevPosition<Position<'a, T>> {
    /// Returns the element at this position.
    ///
    /// Reading `rend` is a contract violation and is caught by a debug
    /// assertion.
    #[inline]
    pub fn get(&self) -> &'a T {
        let at = self.base.index;
        debug_assert!(at != 0, "reverse position is past slot 0");
        &self.base.slots[at.wrapping_sub(1)]
    }

    /// Returns an iterator from this position towards slot 0, stopping
    /// before `end`.
    #[inline]
    pub fn until(self, end: RevPosition<Position<'a, T>>) -> iter::Rev<Iter<'a, T>> {
        debug_assert!(self.base.owner == end.base.owner,
                      "positions belong to different rings");
        let stop = self.base.index;
        Iter::new(self.base.slots, cmp::min(end.base.index, stop), stop).rev()
    }
}

impl<'a, T> RevPosition<PositionMut<'a, T>> {
    /// Returns the element at this position.
    #[inline]
    pub fn get(&self) -> &T {
        let at = self.base.index;
        debug_assert!(at != 0, "reverse position is past slot 0");
        &self.base.slots[at.wrapping_sub(1)]
    }

    /// Returns the element at this position mutably.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        let at = self.base.index;
        debug_assert!(at != 0, "reverse position is past slot 0");
        &mut self.base.slots[at.wrapping_sub(1)]
    }

    /// Swaps the element here with the one in the previous slot and follows
    /// it.
    ///
    /// Does nothing on slot 0 or at `rend`.
    #[inline]
    pub fn carry(&mut self) {
        let at = self.base.index;
        if at >= 2 {
            self.base.slots.swap(at - 1, at - 2);
            self.base.index = at - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Ring;

    #[test]
    fn clamps_at_bounds() {
        let ring: Ring<_, 2> = Ring::from_array([1, 2]);
        let mut pos = ring.begin();
        pos.backward();
        assert_eq!(pos, ring.begin());
        assert_eq!(pos.index(), 0);

        pos.forward();
        pos.forward();
        pos.forward();
        assert_eq!(pos, ring.end());
        assert!(pos.is_end());

        pos.backward();
        assert_eq!(*pos.get(), 2);
    }

    #[test]
    fn wraps_both_ways() {
        let ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
        let mut pos = ring.begin();
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(*pos.get());
            pos.wrapping_next();
        }
        assert_eq!(seen, [1, 2, 3, 1, 2, 3]);

        let mut pos = ring.begin();
        seen.clear();
        for _ in 0..4 {
            pos.wrapping_back();
            seen.push(*pos.get());
        }
        assert_eq!(seen, [3, 2, 1, 3]);

        let mut pos = ring.end();
        pos.wrapping_back();
        assert_eq!(*pos.get(), 3);
        let mut pos = ring.end();
        pos.wrapping_next();
        assert_eq!(pos, ring.begin());
    }

    #[test]
    fn identity_is_positional() {
        let a: Ring<_, 2> = Ring::from_array([1, 2]);
        let b = a.clone();
        assert_eq!(a.begin(), a.begin());
        assert!(a.begin() != a.end());
        assert!(a.begin() != b.begin());
    }

    #[test]
    fn identity_with_zero_sized_slots() {
        let a: Ring<(), 3> = Ring::new();
        let b: Ring<(), 3> = Ring::new();
        assert_eq!(a.as_ptr(), b.as_ptr());
        assert_eq!(a.begin(), a.begin());
        assert!(a.begin() != b.begin());
        assert!(a.rend() != b.rend());
    }

    #[test]
    fn empty_ring_positions() {
        let mut ring: Ring<u8, 0> = Ring::new();
        let mut pos = ring.begin();
        assert_eq!(pos, ring.end());
        pos.forward();
        pos.wrapping_next();
        pos.wrapping_back();
        assert!(pos.is_end());
        assert_eq!(pos.until(ring.end()).count(), 0);

        let mut rev = ring.rbegin();
        assert_eq!(rev, ring.rend());
        rev.wrapping_next();
        rev.wrapping_back();
        assert!(rev.is_end());

        let mut pos = ring.rbegin_mut();
        pos.carry();
        assert!(pos.is_end());
    }

    #[test]
    #[should_panic]
    fn reading_end_panics() {
        let ring: Ring<_, 2> = Ring::from_array([1, 2]);
        ring.end().get();
    }

    #[test]
    fn writes_through_mutable_position() {
        let mut ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
        {
            let mut pos = ring.end_mut();
            pos.backward();
            *pos.get_mut() = 30;
            pos.wrapping_next();
            assert_eq!(pos.index(), 0);
            *pos.get_mut() = 10;
            pos.backward();
            assert_eq!(*pos.get(), 10);
        }
        assert_eq!(ring.as_slice(), &[10, 2, 30]);
    }

    #[test]
    fn carry_moves_value_along() {
        let mut ring: Ring<_, 4> = Ring::from_array(['a', 'b', 'c', 'd']);
        {
            let mut pos = ring.begin_mut();
            pos.forward();
            pos.carry();
            assert_eq!(pos.index(), 2);
            assert_eq!(*pos.get(), 'b');
        }
        assert_eq!(ring.as_slice(), &['a', 'c', 'b', 'd']);

        {
            let mut pos = ring.rbegin_mut();
            pos.carry();
            assert_eq!(*pos.get(), 'd');
            assert_eq!(pos.base().index(), 3);
        }
        assert_eq!(ring.as_slice(), &['a', 'c', 'd', 'b']);
    }

    #[test]
    fn reverse_clamps_at_bounds() {
        let ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
        let mut pos = ring.rbegin();
        pos.backward();
        assert_eq!(pos, ring.rbegin());
        assert_eq!(*pos.get(), 3);

        for _ in 0..5 {
            pos.forward();
        }
        assert_eq!(pos, ring.rend());
        assert!(pos.is_end());
        assert_eq!(*pos.base(), ring.begin());

        pos.backward();
        assert_eq!(*pos.get(), 1);
    }

    #[test]
    fn reverse_wraps_both_ways() {
        let ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
        let mut pos = ring.rbegin();
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(*pos.get());
            pos.wrapping_next();
        }
        assert_eq!(seen, [3, 2, 1, 3, 2, 1]);

        let mut pos = ring.rbegin();
        seen.clear();
        for _ in 0..4 {
            pos.wrapping_back();
            seen.push(*pos.get());
        }
        assert_eq!(seen, [1, 2, 3, 1]);

        let mut pos = ring.rend();
        pos.wrapping_next();
        assert_eq!(pos, ring.rbegin());
        let mut pos = ring.rend();
        pos.wrapping_back();
        assert_eq!(*pos.get(), 1);
    }

    #[test]
    fn reverse_mutable_walk() {
        let mut ring: Ring<_, 3> = Ring::from_array([1, 2, 3]);
        let mut order = Vec::new();
        {
            let mut pos = ring.rbegin_mut();
            while !pos.is_end() {
                order.push(*pos.get());
                *pos.get_mut() += 1;
                pos.forward();
            }
            pos.wrapping_next();
            assert_eq!(*pos.get(), 4);
        }
        assert_eq!(order, [3, 2, 1]);
        assert_eq!(ring.as_slice(), &[2, 3, 4]);
        assert_eq!(ring.rend_mut().into_base().index(), 0);
    }

    #[test]
    fn reverse_until_stops_at_end() {
        let ring: Ring<_, 4> = Ring::from_array([1, 2, 3, 4]);
        let all: Vec<_> = ring.rbegin().until(ring.rend()).cloned().collect();
        assert_eq!(all, [4, 3, 2, 1]);

        let mut stop = ring.rend();
        stop.backward();
        let mut start = ring.rbegin();
        start.forward();
        let middle: Vec<_> = start.until(stop).cloned().collect();
        assert_eq!(middle, [3, 2]);
        assert_eq!(stop.until(start).count(), 0);
    }

    #[test]
    #[should_panic]
    fn reading_rend_panics() {
        let ring: Ring<_, 2> = Ring::from_array([1, 2]);
        ring.rend().get();
    }
}
