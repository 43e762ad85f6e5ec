//! The `DynArray` container.

use core::borrow::{Borrow, BorrowMut};
use core::fmt;
use core::iter::repeat;
use core::marker::PhantomData;
use core::mem::{ManuallyDrop, MaybeUninit};
use core::ops::{Bound, Deref, DerefMut, Index, IndexMut, Range, RangeBounds};
use core::ptr;
use core::slice::{self, SliceIndex};

use const_default::ConstDefault;

use crate::capacity::{Grow, GrowDoubling};
use crate::error::{InsertionError, OutOfRange, StorageError};
use crate::storage::RawBuffer;

pub use self::into_iter::IntoIter;

#[macro_use]
mod macros;

mod into_iter;

#[inline]
fn bounds_to_range(
    range: impl RangeBounds<usize>,
    length: usize,
) -> Result<Range<usize>, OutOfRange> {
    let overflow = OutOfRange::RangeOverflow { length };
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(i) => *i,
        Bound::Excluded(i) => i.checked_add(1).ok_or(overflow)?,
    };
    let end = match range.end_bound() {
        Bound::Unbounded => length,
        Bound::Included(i) => i.checked_add(1).ok_or(overflow)?,
        Bound::Excluded(i) => *i,
    };
    Ok(Range { start, end })
}

#[inline]
/// Create a `DynArray<T>` from an array `[T; N]`.
pub fn from_array<T, const N: usize>(data: [T; N]) -> DynArray<T> {
    let mut arr = DynArray::with_capacity(N);
    arr.extend(data);
    arr
}

#[inline]
/// Create a `DynArray<T>` holding `count` clones of `elem`.
pub fn from_elem<T: Clone>(elem: T, count: usize) -> DynArray<T> {
    DynArray::from_iter(repeat(elem).take(count))
}

/// A growable array of `T` stored in a single contiguous allocation.
///
/// Elements keep their insertion order, which is also the indexing and
/// iteration order. The growth policy `G` decides how much capacity is
/// added when an append runs out of room.
pub struct DynArray<T, G: Grow = GrowDoubling> {
    buffer: RawBuffer<T>,
    length: usize,
    _grow: PhantomData<G>,
}

impl<T, G: Grow> DynArray<T, G> {
    /// Constructs a new, empty `DynArray<T, G>`.
    ///
    /// The array will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # #![allow(unused_mut)]
    /// use dyn_array::DynArray;
    ///
    /// let mut arr: DynArray<i32> = DynArray::new();
    /// assert!(arr.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self {
            buffer: RawBuffer::NEW,
            length: 0,
            _grow: PhantomData,
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        Ok(Self {
            buffer: RawBuffer::try_with_capacity(capacity)?,
            length: 0,
            _grow: PhantomData,
        })
    }

    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        let mut arr = Self::with_capacity(data.len());
        arr.extend_from_slice(data);
        arr
    }

    #[inline]
    fn into_raw(self) -> (RawBuffer<T>, usize) {
        let me = ManuallyDrop::new(self);
        (unsafe { ptr::read(&me.buffer) }, me.length)
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.data_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.data_ptr_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buffer.data_ptr(), self.length) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buffer.data_ptr_mut(), self.length) }
    }

    /// The number of elements the array can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The number of elements in the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Get a reference to the element at `index`, or an `OutOfRange`
    /// error if `index` is not below the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::{dyn_array, OutOfRange};
    ///
    /// let arr = dyn_array![20, 100];
    /// assert_eq!(arr.at(1), Ok(&100));
    /// assert_eq!(arr.at(2), Err(OutOfRange::Index { index: 2, length: 2 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let length = self.length;
        self.as_slice()
            .get(index)
            .ok_or(OutOfRange::Index { index, length })
    }

    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let length = self.length;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange::Index { index, length })
    }

    /// Get a reference to the element at `index` without checking the bounds.
    ///
    /// # Safety
    /// `index` must be less than `self.len()`. Reading past the length
    /// accesses uninitialized or unallocated memory.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        &*self.buffer.data_ptr().add(index)
    }

    /// Get a mutable reference to the element at `index` without checking
    /// the bounds.
    ///
    /// # Safety
    /// `index` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        &mut *self.buffer.data_ptr_mut().add(index)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn truncate(&mut self, length: usize) {
        let old_len = self.length;
        if length < old_len {
            self.length = length;
            unsafe {
                let to_drop = ptr::slice_from_raw_parts_mut(
                    self.buffer.data_ptr_mut().add(length),
                    old_len - length,
                );
                ptr::drop_in_place(to_drop);
            }
        }
    }

    #[inline]
    pub fn reserve(&mut self, reserve: usize) {
        match self.try_reserve(reserve) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    #[inline]
    pub fn try_reserve(&mut self, reserve: usize) -> Result<(), StorageError> {
        self._try_reserve(reserve, false)
    }

    #[inline]
    pub fn reserve_exact(&mut self, reserve: usize) {
        match self.try_reserve_exact(reserve) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    #[inline]
    pub fn try_reserve_exact(&mut self, reserve: usize) -> Result<(), StorageError> {
        self._try_reserve(reserve, true)
    }

    fn _try_reserve(&mut self, reserve: usize, exact: bool) -> Result<(), StorageError> {
        let buf_cap = self.buffer.capacity();
        let Some(buf_needed) = self.length.checked_add(reserve) else {
            return Err(StorageError::CapacityLimit);
        };
        if buf_cap >= buf_needed {
            return Ok(());
        }
        let capacity = if exact {
            buf_needed
        } else {
            G::next_capacity::<T>(buf_cap, buf_needed)
        };
        self.buffer.try_resize(capacity)
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        match self.try_shrink_to_fit() {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    #[inline]
    pub fn try_shrink_to_fit(&mut self) -> Result<(), StorageError> {
        self.buffer.try_resize(self.length)
    }

    #[inline]
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        let spare = self.buffer.capacity() - self.length;
        unsafe {
            slice::from_raw_parts_mut(
                self.buffer.data_ptr_mut().add(self.length).cast(),
                spare,
            )
        }
    }

    /// Append an element to the end of the array.
    ///
    /// # Panics
    /// Panics if the backing store cannot be grown.
    pub fn push(&mut self, item: T) {
        match self._try_reserve(1, false) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
        unsafe {
            self.push_unchecked(item);
        }
    }

    pub fn try_push(&mut self, item: T) -> Result<(), InsertionError<T>> {
        if let Err(error) = self._try_reserve(1, false) {
            return Err(InsertionError::new(error, item));
        }
        unsafe {
            self.push_unchecked(item);
        }
        Ok(())
    }

    /// Append an element without checking the capacity.
    ///
    /// # Safety
    /// The capacity must exceed the current length.
    #[inline]
    pub unsafe fn push_unchecked(&mut self, item: T) {
        let length = self.length;
        self.buffer.data_ptr_mut().add(length).write(item);
        self.length = length + 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.length > 0 {
            self.length -= 1;
            Some(unsafe { ptr::read(self.buffer.data_ptr().add(self.length)) })
        } else {
            None
        }
    }

    /// Remove and return the last element. The capacity is not reduced.
    ///
    /// Returns `OutOfRange::Empty` if there are no elements.
    #[inline]
    pub fn remove_last(&mut self) -> Result<T, OutOfRange> {
        self.pop().ok_or(OutOfRange::Empty)
    }

    /// Insert an element at `position`, shifting the following elements
    /// one slot towards the end.
    ///
    /// `position` may equal the length, in which case this is an append.
    ///
    /// # Panics
    /// Panics if the backing store cannot be grown.
    pub fn insert_at(&mut self, position: usize, value: T) -> Result<(), OutOfRange> {
        let length = self.length;
        if position > length {
            return Err(OutOfRange::Position { position, length });
        }
        self.reserve(1);
        unsafe {
            let head = self.buffer.data_ptr_mut().add(position);
            if position < length {
                ptr::copy(head, head.add(1), length - position);
            }
            head.write(value);
        }
        self.length = length + 1;
        Ok(())
    }

    /// Insert an element at `position`, panicking if it is beyond the end.
    #[inline]
    pub fn insert(&mut self, position: usize, value: T) {
        if let Err(err) = self.insert_at(position, value) {
            err.panic();
        }
    }

    /// Remove and return the element at `index`, shifting the following
    /// elements one slot towards the front.
    pub fn erase_at(&mut self, index: usize) -> Result<T, OutOfRange> {
        let length = self.length;
        if index >= length {
            return Err(OutOfRange::Index { index, length });
        }
        unsafe {
            let head = self.buffer.data_ptr_mut().add(index);
            let result = ptr::read(head);
            ptr::copy(head.add(1), head, length - index - 1);
            self.length = length - 1;
            Ok(result)
        }
    }

    /// Remove and return the element at `index`, panicking if it is out of range.
    #[inline]
    pub fn remove(&mut self, index: usize) -> T {
        match self.erase_at(index) {
            Ok(item) => item,
            Err(err) => err.panic(),
        }
    }

    /// Drop the elements in `range` and move the remaining tail down to
    /// close the gap.
    ///
    /// The range must satisfy `start <= end <= len()`. A bound whose
    /// successor overflows `usize` is reported as `OutOfRange::RangeOverflow`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::dyn_array;
    ///
    /// let mut arr = dyn_array![20, 30, 50, 100];
    /// arr.erase_range(1..3).unwrap();
    /// assert_eq!(arr, [20, 100]);
    /// assert!(arr.erase_range(1..3).is_err());
    /// ```
    pub fn erase_range<R>(&mut self, range: R) -> Result<(), OutOfRange>
    where
        R: RangeBounds<usize>,
    {
        let length = self.length;
        let Range { start, end } = bounds_to_range(range, length)?;
        if start > end || end > length {
            return Err(OutOfRange::Range { start, end, length });
        }
        let count = end - start;
        if count == 0 {
            return Ok(());
        }
        // a panicking destructor leaks the tail instead of dropping it twice
        self.length = start;
        unsafe {
            let head = self.buffer.data_ptr_mut().add(start);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(head, count));
            ptr::copy(head.add(count), head, length - end);
        }
        self.length = length - count;
        Ok(())
    }

    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        self.reserve(items.len());
        for item in items {
            // SAFETY: capacity for every item was reserved above
            unsafe { self.push_unchecked(item.clone()) };
        }
    }

    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_reserve(items.len())?;
        for item in items {
            unsafe { self.push_unchecked(item.clone()) };
        }
        Ok(())
    }
}

impl<T, G: Grow> AsRef<[T]> for DynArray<T, G> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, G: Grow> AsMut<[T]> for DynArray<T, G> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, G: Grow> Borrow<[T]> for DynArray<T, G> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, G: Grow> BorrowMut<[T]> for DynArray<T, G> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, G: Grow> Clone for DynArray<T, G> {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend_from_slice(source);
    }
}

impl<T, G: Grow> ConstDefault for DynArray<T, G> {
    const DEFAULT: Self = Self::new();
}

impl<T: fmt::Debug, G: Grow> fmt::Debug for DynArray<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T, G: Grow> Default for DynArray<T, G> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, G: Grow> Deref for DynArray<T, G> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, G: Grow> DerefMut for DynArray<T, G> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, G: Grow> Drop for DynArray<T, G> {
    fn drop(&mut self) {
        self.truncate(0);
    }
}

impl<T, G: Grow> Extend<T> for DynArray<T, G> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Clone + 'a, G: Grow> Extend<&'a T> for DynArray<T, G> {
    #[inline]
    fn extend<A: IntoIterator<Item = &'a T>>(&mut self, iter: A) {
        self.extend(iter.into_iter().cloned())
    }
}

impl<T, G: Grow> FromIterator<T> for DynArray<T, G> {
    #[inline]
    fn from_iter<A: IntoIterator<Item = T>>(iter: A) -> Self {
        let iter = iter.into_iter();
        let mut arr = Self::with_capacity(iter.size_hint().0);
        arr.extend(iter);
        arr
    }
}

impl<T, G: Grow, I: SliceIndex<[T]>> Index<I> for DynArray<T, G> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, G: Grow, I: SliceIndex<[T]>> IndexMut<I> for DynArray<T, G> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

// The buffer is uniquely owned, so thread safety follows the element type.
unsafe impl<T: Send, G: Grow + Send> Send for DynArray<T, G> {}

unsafe impl<T: Sync, G: Grow + Sync> Sync for DynArray<T, G> {}

impl<T: Clone, G: Grow> From<&[T]> for DynArray<T, G> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Clone, G: Grow> From<&mut [T]> for DynArray<T, G> {
    #[inline]
    fn from(data: &mut [T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T, G: Grow, const N: usize> From<[T; N]> for DynArray<T, G> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        Self::from_iter(data)
    }
}

impl<T, G: Grow> From<alloc::vec::Vec<T>> for DynArray<T, G> {
    #[inline]
    fn from(vec: alloc::vec::Vec<T>) -> Self {
        Self::from_iter(vec)
    }
}

impl<T, G: Grow> IntoIterator for DynArray<T, G> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let (buffer, length) = self.into_raw();
        IntoIter::new(buffer, length)
    }
}

impl<'a, T, G: Grow> IntoIterator for &'a DynArray<T, G> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, G: Grow> IntoIterator for &'a mut DynArray<T, G> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T1, G1, T2, G2> PartialEq<DynArray<T2, G2>> for DynArray<T1, G1>
where
    T1: PartialEq<T2>,
    G1: Grow,
    G2: Grow,
{
    #[inline]
    fn eq(&self, other: &DynArray<T2, G2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: Eq, G: Grow> Eq for DynArray<T, G> {}

impl<T1, G1, T2> PartialEq<[T2]> for DynArray<T1, G1>
where
    T1: PartialEq<T2>,
    G1: Grow,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<T1, G1, T2> PartialEq<&[T2]> for DynArray<T1, G1>
where
    T1: PartialEq<T2>,
    G1: Grow,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<T1, G1, T2, const N: usize> PartialEq<[T2; N]> for DynArray<T1, G1>
where
    T1: PartialEq<T2>,
    G1: Grow,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, G1, T2, const N: usize> PartialEq<&[T2; N]> for DynArray<T1, G1>
where
    T1: PartialEq<T2>,
    G1: Grow,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, G1, T2> PartialEq<alloc::vec::Vec<T2>> for DynArray<T1, G1>
where
    T1: PartialEq<T2>,
    G1: Grow,
{
    #[inline]
    fn eq(&self, other: &alloc::vec::Vec<T2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T1, T2, G2> PartialEq<DynArray<T2, G2>> for alloc::vec::Vec<T1>
where
    T1: PartialEq<T2>,
    G2: Grow,
{
    #[inline]
    fn eq(&self, other: &DynArray<T2, G2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

#[cfg(feature = "zeroize")]
impl<T: zeroize::Zeroize, G: Grow> zeroize::Zeroize for DynArray<T, G> {
    fn zeroize(&mut self) {
        self.as_mut_slice().iter_mut().zeroize();
        self.clear();
        self.spare_capacity_mut().zeroize();
    }
}

/// ```compile_fail,E0502
/// use dyn_array::dyn_array;
///
/// let mut arr = dyn_array![1, 2, 3];
/// for x in &arr {
///     arr.push(*x);
/// }
/// ```
#[cfg(doctest)]
fn _iteration_borrow_check() {}

/// ```compile_fail,E0277
/// use std::rc::Rc;
/// use dyn_array::DynArray;
///
/// fn require_send<T: Send>(_: T) {}
///
/// require_send(DynArray::<Rc<u32>>::new());
/// ```
#[cfg(doctest)]
fn _send_check() {}

/// ```compile_fail,E0277
/// use std::cell::Cell;
/// use dyn_array::DynArray;
///
/// fn require_sync<T: Sync>(_: &T) {}
///
/// require_sync(&DynArray::<Cell<u32>>::new());
/// ```
#[cfg(doctest)]
fn _sync_check() {}

/// ```compile_fail,E0277
/// use std::rc::Rc;
/// use dyn_array::DynArray;
///
/// fn require_send<T: Send>(_: T) {}
///
/// require_send(DynArray::<Rc<u32>>::new().into_iter());
/// ```
#[cfg(doctest)]
fn _into_iter_send_check() {}
