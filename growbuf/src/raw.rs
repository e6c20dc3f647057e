use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem::size_of;
use core::ops::Range;
use core::slice;

use crate::error::GrowBufError;
use crate::index::{normalize_index, normalize_insert_index, normalize_range};
use crate::policy::{byte_size, GrowthPolicy};

/// A value that can live in a slot: copied bit-for-bit, zero-filled by `Default`.
pub trait Slot: Copy + Default {}

impl<T: Copy + Default> Slot for T {}

/// Allocates `slots` default-initialized slots, reporting failure instead of aborting.
pub(crate) fn allocate<T: Slot>(slots: usize) -> Result<Box<[T]>, GrowBufError> {
    byte_size(slots, size_of::<T>())?;
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(slots)
        .map_err(|_| GrowBufError::AllocationFailed { requested: slots })?;
    storage.resize(slots, T::default());
    Ok(storage.into_boxed_slice())
}

fn to_logical(absolute: usize) -> isize {
    isize::try_from(absolute).unwrap_or(isize::MAX)
}

/// A growable primary buffer: `capacity` allocated slots, the first `count` valid.
///
/// The buffer never decides on its own to grow. The mutation primitives
/// (`append_*`, `prepend_*`, `insert_*`) fail with
/// `GrowBufError::InsufficientCapacity` when there is no room; callers grow
/// first through [`RawBuffer::ensure_capacity`] or [`RawBuffer::reserve`].
/// Removal only adjusts `count`; memory is returned by an explicit
/// [`RawBuffer::maybe_shrink`] or [`RawBuffer::shrink_to_fit`].
#[derive(Debug, Clone)]
pub struct RawBuffer<T> {
    elements: Box<[T]>,
    count: usize,
}

impl<T: Slot> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Slot> RawBuffer<T> {
    /// Creates an empty buffer without allocating.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Box::default(),
            count: 0,
        }
    }

    /// Creates an empty buffer with room for `capacity` slots.
    ///
    /// A zero capacity is valid and allocates nothing.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::InvalidArgument` for a zero-sized slot type,
    /// `GrowBufError::Overflow` if the byte size overflows and
    /// `GrowBufError::AllocationFailed` if the allocator refuses.
    pub fn with_capacity(capacity: usize) -> Result<Self, GrowBufError> {
        Ok(Self {
            elements: allocate(capacity)?,
            count: 0,
        })
    }

    /// Creates a buffer holding `count` default (zero) slots.
    ///
    /// # Errors
    ///
    /// Same as [`RawBuffer::with_capacity`].
    pub fn zeroed(count: usize) -> Result<Self, GrowBufError> {
        Ok(Self {
            elements: allocate(count)?,
            count,
        })
    }

    /// Creates a buffer holding a copy of `source` plus `extra_capacity` free slots.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::Overflow` if the total slot count overflows,
    /// otherwise same as [`RawBuffer::with_capacity`].
    pub fn from_slice(source: &[T], extra_capacity: usize) -> Result<Self, GrowBufError> {
        let capacity = source
            .len()
            .checked_add(extra_capacity)
            .ok_or(GrowBufError::Overflow {
                count: source.len(),
            })?;
        let mut elements = allocate(capacity)?;
        elements[..source.len()].copy_from_slice(source);
        Ok(Self {
            elements,
            count: source.len(),
        })
    }

    /// Frees the allocation and resets the buffer to empty.
    pub fn release(&mut self) {
        self.elements = Box::default();
        self.count = 0;
    }

    /// Copies the valid slots into `destination`, returning how many were copied.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::InsufficientCapacity` if `destination` is
    /// shorter than [`RawBuffer::len`]; nothing is copied in that case.
    pub fn copy_to(&self, destination: &mut [T]) -> Result<usize, GrowBufError> {
        if destination.len() < self.count {
            return Err(GrowBufError::InsufficientCapacity {
                requested: self.count,
                available: destination.len(),
            });
        }
        destination[..self.count].copy_from_slice(self.as_slice());
        Ok(self.count)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    /// Number of unused slots (`capacity - count`).
    #[must_use]
    pub fn available(&self) -> usize {
        self.elements.len() - self.count
    }

    /// Byte width of one slot.
    #[must_use]
    pub fn element_size(&self) -> usize {
        size_of::<T>()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements[..self.count]
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements[..self.count]
    }

    /// Raw pointer to the first slot.
    ///
    /// The pointer is dangling when the capacity is zero and is invalidated by
    /// any call that may reallocate.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.elements.as_ptr()
    }

    /// Returns the slot at a logical index, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: isize) -> Option<&T> {
        let at = normalize_index(index, self.count).ok()?;
        self.elements.get(at)
    }

    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        let at = normalize_index(index, self.count).ok()?;
        self.elements.get_mut(at)
    }

    /// Overwrites the slot at a logical index and returns the previous value.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::IndexOutOfBounds` for an invalid index.
    pub fn set(&mut self, index: isize, value: T) -> Result<T, GrowBufError> {
        let at = normalize_index(index, self.count)?;
        Ok(core::mem::replace(&mut self.elements[at], value))
    }

    /// Moves the valid slots into a fresh allocation of exactly `capacity` slots.
    fn relocate(&mut self, capacity: usize) -> Result<(), GrowBufError> {
        debug_assert!(capacity >= self.count);
        let mut fresh = allocate(capacity)?;
        fresh[..self.count].copy_from_slice(self.as_slice());
        self.elements = fresh;
        Ok(())
    }

    /// Performs one growth step and returns the new capacity.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::Overflow` or `GrowBufError::AllocationFailed`;
    /// the buffer is unchanged on error.
    pub fn grow(
        &mut self,
        policy: &GrowthPolicy,
        required: Option<usize>,
    ) -> Result<usize, GrowBufError> {
        let capacity = policy.grow(self.capacity(), required)?;
        self.relocate(capacity)?;
        Ok(capacity)
    }

    /// Grows along the policy curve until at least `required` slots fit.
    ///
    /// # Errors
    ///
    /// Same as [`RawBuffer::grow`].
    pub fn ensure_capacity(
        &mut self,
        policy: &GrowthPolicy,
        required: usize,
    ) -> Result<(), GrowBufError> {
        let capacity = policy.ensure_capacity(self.capacity(), required)?;
        if capacity != self.capacity() {
            self.relocate(capacity)?;
        }
        Ok(())
    }

    /// Grows along the policy curve until `additional` more slots fit.
    ///
    /// # Errors
    ///
    /// Same as [`RawBuffer::grow`].
    pub fn ensure_additional(
        &mut self,
        policy: &GrowthPolicy,
        additional: usize,
    ) -> Result<(), GrowBufError> {
        let required = self
            .count
            .checked_add(additional)
            .ok_or(GrowBufError::Overflow { count: self.count })?;
        self.ensure_capacity(policy, required)
    }

    /// Releases memory when occupancy is low. Returns whether a shrink happened.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::AllocationFailed` if the smaller allocation
    /// cannot be made; the buffer keeps its current storage.
    pub fn maybe_shrink(&mut self, policy: &GrowthPolicy) -> Result<bool, GrowBufError> {
        match policy.shrink_target(self.count, self.capacity()) {
            Some(capacity) => {
                self.relocate(capacity)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Sets the capacity to exactly the count, freeing everything when empty.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::AllocationFailed` if the exact-size allocation
    /// cannot be made.
    pub fn shrink_to_fit(&mut self) -> Result<(), GrowBufError> {
        if self.count == 0 {
            self.release();
        } else if self.capacity() != self.count {
            self.relocate(self.count)?;
        }
        Ok(())
    }

    /// Makes the capacity at least `min_capacity`, allocating exactly that amount if needed.
    ///
    /// # Errors
    ///
    /// Same as [`RawBuffer::with_capacity`].
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), GrowBufError> {
        if self.capacity() >= min_capacity {
            return Ok(());
        }
        self.relocate(min_capacity)
    }

    fn check_room(&self, additional: usize) -> Result<(), GrowBufError> {
        if additional > self.available() {
            return Err(GrowBufError::InsufficientCapacity {
                requested: additional,
                available: self.available(),
            });
        }
        Ok(())
    }

    /// Writes `value` after the last valid slot.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::InsufficientCapacity` if the buffer is full.
    pub fn append_element(&mut self, value: T) -> Result<(), GrowBufError> {
        self.append_data(slice::from_ref(&value))
    }

    /// Writes `data` after the last valid slot.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::InsufficientCapacity` if `data` does not fit.
    pub fn append_data(&mut self, data: &[T]) -> Result<(), GrowBufError> {
        self.insert_at(self.count, data)
    }

    /// Writes `value` before the first slot, shifting everything right.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::InsufficientCapacity` if the buffer is full.
    pub fn prepend_element(&mut self, value: T) -> Result<(), GrowBufError> {
        self.prepend_data(slice::from_ref(&value))
    }

    /// Writes `data` before the first slot, shifting everything right.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::InsufficientCapacity` if `data` does not fit.
    pub fn prepend_data(&mut self, data: &[T]) -> Result<(), GrowBufError> {
        self.insert_at(0, data)
    }

    /// Inserts `value` at a logical insertion point.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::IndexOutOfBounds` for an invalid position and
    /// `GrowBufError::InsufficientCapacity` if the buffer is full.
    pub fn insert_element(&mut self, index: isize, value: T) -> Result<(), GrowBufError> {
        self.insert_data(index, slice::from_ref(&value))
    }

    /// Inserts `data` at a logical insertion point, see [`normalize_insert_index`].
    ///
    /// Inserting an empty slice always succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::IndexOutOfBounds` for an invalid position and
    /// `GrowBufError::InsufficientCapacity` if `data` does not fit.
    pub fn insert_data(&mut self, index: isize, data: &[T]) -> Result<(), GrowBufError> {
        if data.is_empty() {
            return Ok(());
        }
        let at = normalize_insert_index(index, self.count)?;
        self.insert_at(at, data)
    }

    /// Inserts `data` at an absolute offset in `[0, len]`.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::IndexOutOfBounds` if `at > len` and
    /// `GrowBufError::InsufficientCapacity` if `data` does not fit.
    pub fn insert_at(&mut self, at: usize, data: &[T]) -> Result<(), GrowBufError> {
        if data.is_empty() {
            return Ok(());
        }
        if at > self.count {
            return Err(GrowBufError::IndexOutOfBounds {
                index: to_logical(at),
                length: self.count,
            });
        }
        self.check_room(data.len())?;
        let end = self.count + data.len();
        self.elements.copy_within(at..self.count, at + data.len());
        self.elements[at..at + data.len()].copy_from_slice(data);
        self.count = end;
        Ok(())
    }

    /// Removes and returns the slot at a logical index, closing the gap.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::IndexOutOfBounds` for an invalid index.
    pub fn remove(&mut self, index: isize) -> Result<T, GrowBufError> {
        let at = normalize_index(index, self.count)?;
        let value = self.elements[at];
        self.close_gap(at..at + 1);
        Ok(value)
    }

    /// Removes the inclusive logical range `[start, end]`, returning how many slots went away.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::IndexOutOfBounds` or `GrowBufError::InvalidRange`
    /// as reported by [`normalize_range`].
    pub fn remove_range(&mut self, start: isize, end: isize) -> Result<usize, GrowBufError> {
        let range = normalize_range(start, end, self.count)?;
        let removed = range.len();
        self.close_gap(range);
        Ok(removed)
    }

    /// Removes an absolute half-open range, returning how many slots went away.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::InvalidRange` if `range.start > range.end` and
    /// `GrowBufError::IndexOutOfBounds` if `range.end > len`.
    pub fn erase(&mut self, range: Range<usize>) -> Result<usize, GrowBufError> {
        if range.start > range.end {
            return Err(GrowBufError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.count {
            return Err(GrowBufError::IndexOutOfBounds {
                index: to_logical(range.end),
                length: self.count,
            });
        }
        let removed = range.len();
        self.close_gap(range);
        Ok(removed)
    }

    fn close_gap(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let removed = range.len();
        self.elements.copy_within(range.end..self.count, range.start);
        self.count -= removed;
    }

    /// Removes and returns the last slot.
    pub fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        self.count -= 1;
        Some(self.elements[self.count])
    }

    /// Shortens the buffer to `len` slots; no effect if it is already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len < self.count {
            self.count = len;
        }
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }
}

impl<'a, T: Slot> IntoIterator for &'a RawBuffer<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
