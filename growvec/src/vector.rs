use core::slice;

use growbuf::{normalize_index, normalize_insert_index, GrowthPolicy, RawBuffer, Slot};
use tracing::{debug, trace};

use crate::error::GrowVecError;

/// A growable vector with Python-style negative indices.
///
/// Every capacity change goes through the [`GrowthPolicy`]; removals never
/// release memory unless [`GrowVec::maybe_shrink`] or
/// [`GrowVec::shrink_to_fit`] is called.
#[derive(Debug, Clone)]
pub struct GrowVec<T> {
    raw: RawBuffer<T>,
    policy: GrowthPolicy,
}

impl<T: Slot> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Slot> GrowVec<T> {
    /// Creates an empty vector with the default policy. Nothing is allocated.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::default())
    }

    #[must_use]
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Self {
            raw: RawBuffer::new(),
            policy,
        }
    }

    /// Creates an empty vector with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if the allocation cannot be made.
    pub fn with_capacity(capacity: usize) -> Result<Self, GrowVecError> {
        Ok(Self {
            raw: RawBuffer::with_capacity(capacity)?,
            policy: GrowthPolicy::default(),
        })
    }

    /// Creates a vector holding a copy of `source`, with exactly that capacity.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if the allocation cannot be made.
    pub fn from_slice(source: &[T]) -> Result<Self, GrowVecError> {
        Ok(Self {
            raw: RawBuffer::from_slice(source, 0)?,
            policy: GrowthPolicy::default(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    #[must_use]
    pub fn available(&self) -> usize {
        self.raw.available()
    }

    #[must_use]
    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    fn make_room(&mut self, additional: usize) -> Result<(), GrowVecError> {
        let before = self.raw.capacity();
        self.raw.ensure_additional(&self.policy, additional)?;
        if self.raw.capacity() != before {
            trace!(
                from = before,
                to = self.raw.capacity(),
                len = self.raw.len(),
                "grew vector storage"
            );
        }
        Ok(())
    }

    /// Appends one element, growing if needed.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if growth fails; the vector is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), GrowVecError> {
        self.extend_from_slice(slice::from_ref(&value))
    }

    /// Appends all of `values`, growing once if needed.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if growth fails; the vector is unchanged.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<(), GrowVecError> {
        if values.is_empty() {
            return Ok(());
        }
        self.make_room(values.len())?;
        self.raw.append_data(values)?;
        Ok(())
    }

    /// Inserts one element at the front.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if growth fails.
    pub fn prepend(&mut self, value: T) -> Result<(), GrowVecError> {
        self.prepend_slice(slice::from_ref(&value))
    }

    /// Inserts `values` at the front, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if growth fails.
    pub fn prepend_slice(&mut self, values: &[T]) -> Result<(), GrowVecError> {
        if values.is_empty() {
            return Ok(());
        }
        self.make_room(values.len())?;
        self.raw.prepend_data(values)?;
        Ok(())
    }

    /// Inserts `value` at a logical position; `len` appends, `-1` goes before the last element.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` for an invalid position or failed growth.
    pub fn insert(&mut self, index: isize, value: T) -> Result<(), GrowVecError> {
        self.insert_slice(index, slice::from_ref(&value))
    }

    /// Inserts `values` at a logical position.
    ///
    /// The position is checked before any growth, so a bad index leaves the
    /// capacity untouched too.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` for an invalid position or failed growth.
    pub fn insert_slice(&mut self, index: isize, values: &[T]) -> Result<(), GrowVecError> {
        if values.is_empty() {
            return Ok(());
        }
        let at = normalize_insert_index(index, self.raw.len())?;
        self.make_room(values.len())?;
        self.raw.insert_at(at, values)?;
        Ok(())
    }

    /// Removes and returns the element at a logical index.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` for an invalid index.
    pub fn remove(&mut self, index: isize) -> Result<T, GrowVecError> {
        Ok(self.raw.remove(index)?)
    }

    /// Removes the inclusive logical range `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` for invalid or inverted endpoints.
    pub fn remove_range(&mut self, start: isize, end: isize) -> Result<usize, GrowVecError> {
        Ok(self.raw.remove_range(start, end)?)
    }

    pub fn pop(&mut self) -> Option<T> {
        self.raw.pop()
    }

    #[must_use]
    pub fn get(&self, index: isize) -> Option<&T> {
        self.raw.get(index)
    }

    /// Returns the element at a logical index.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` with the out-of-bounds details.
    pub fn try_get(&self, index: isize) -> Result<&T, GrowVecError> {
        let at = normalize_index(index, self.raw.len())?;
        Ok(&self.raw.as_slice()[at])
    }

    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        self.raw.get_mut(index)
    }

    /// Replaces the element at a logical index, returning the old value.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` for an invalid index.
    pub fn set(&mut self, index: isize, value: T) -> Result<T, GrowVecError> {
        Ok(self.raw.set(index, value)?)
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.get(0)
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.get(-1)
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Ensures room for at least `min_capacity` elements, allocating exactly that.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if the allocation cannot be made.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), GrowVecError> {
        Ok(self.raw.reserve(min_capacity)?)
    }

    /// Reduces the capacity to the length.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if the smaller allocation cannot be made.
    pub fn shrink_to_fit(&mut self) -> Result<(), GrowVecError> {
        let before = self.raw.capacity();
        self.raw.shrink_to_fit()?;
        debug!(from = before, to = self.raw.capacity(), "shrank vector to fit");
        Ok(())
    }

    /// Releases memory if occupancy dropped under the policy threshold.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if the smaller allocation cannot be made.
    pub fn maybe_shrink(&mut self) -> Result<bool, GrowVecError> {
        let before = self.raw.capacity();
        let shrunk = self.raw.maybe_shrink(&self.policy)?;
        if shrunk {
            debug!(
                from = before,
                to = self.raw.capacity(),
                len = self.raw.len(),
                "shrank vector after low occupancy"
            );
        }
        Ok(shrunk)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.raw.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.raw.as_mut_slice()
    }

    /// Raw pointer to the storage, invalidated by any call that may reallocate.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.raw.as_ptr()
    }

    /// Copies the elements into `destination`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if `destination` is too short.
    pub fn copy_to(&self, destination: &mut [T]) -> Result<usize, GrowVecError> {
        Ok(self.raw.copy_to(destination)?)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.raw.as_slice().iter()
    }
}

impl<T: Slot + Ord> GrowVec<T> {
    pub fn sort(&mut self) {
        self.raw.as_mut_slice().sort_unstable();
    }
}

impl<'a, T: Slot> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
