use core::iter::Rev;
use core::slice;

use growbuf::{GrowBufError, GrowthPolicy, RawBuffer, Slot};
use tracing::trace;

use crate::error::GrowVecError;

/// A LIFO stack over a single primary buffer, optionally bounded.
///
/// A bounded stack never allocates more than `limit` slots.
#[derive(Debug, Clone)]
pub struct SlotStack<T> {
    raw: RawBuffer<T>,
    policy: GrowthPolicy,
    limit: Option<usize>,
}

impl<T: Slot> Default for SlotStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Slot> SlotStack<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            raw: RawBuffer::new(),
            policy: GrowthPolicy::default(),
            limit: None,
        }
    }

    /// Creates a stack that refuses pushes beyond `limit` elements.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if `limit` is 0.
    pub fn bounded(limit: usize) -> Result<Self, GrowVecError> {
        if limit == 0 {
            return Err(GrowBufError::InvalidArgument {
                reason: "stack limit is zero",
            }
            .into());
        }
        Ok(Self {
            limit: Some(limit),
            ..Self::new()
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
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Pushes `value` on top of the stack.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::StackFull` when a bounded stack is at its limit
    /// and `GrowVecError::Buffer` if growth fails.
    pub fn push(&mut self, value: T) -> Result<(), GrowVecError> {
        if let Some(limit) = self.limit {
            if self.raw.len() >= limit {
                return Err(GrowVecError::StackFull { limit });
            }
        }
        if self.raw.available() == 0 {
            let required = self.raw.len() + 1;
            let target = self.policy.ensure_capacity(self.raw.capacity(), required)?;
            let target = self.limit.map_or(target, |limit| target.min(limit));
            self.raw.reserve(target)?;
            trace!(capacity = target, "grew stack storage");
        }
        self.raw.append_element(value)?;
        Ok(())
    }

    /// Removes and returns the top element, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.raw.pop()
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::EmptyContainer` if the stack is empty.
    pub fn try_pop(&mut self) -> Result<T, GrowVecError> {
        self.raw.pop().ok_or(GrowVecError::EmptyContainer)
    }

    /// Returns the top element without removing it.
    #[must_use]
    pub fn top(&self) -> Option<&T> {
        self.raw.get(-1)
    }

    /// Returns the top element without removing it.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::EmptyContainer` if the stack is empty.
    pub fn try_top(&self) -> Result<&T, GrowVecError> {
        self.top().ok_or(GrowVecError::EmptyContainer)
    }

    /// Returns the element `depth` positions below the top (`0` is the top).
    #[must_use]
    pub fn peek_at(&self, depth: usize) -> Option<&T> {
        let at = self.raw.len().checked_sub(depth.checked_add(1)?)?;
        self.raw.as_slice().get(at)
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Elements from bottom to top.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.raw.as_slice()
    }

    /// Elements from top to bottom.
    pub fn iter(&self) -> Rev<slice::Iter<'_, T>> {
        self.raw.as_slice().iter().rev()
    }

    /// Reduces the capacity to the length.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if the smaller allocation cannot be made.
    pub fn shrink_to_fit(&mut self) -> Result<(), GrowVecError> {
        Ok(self.raw.shrink_to_fit()?)
    }
}
