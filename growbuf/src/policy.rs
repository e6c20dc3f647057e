//! Capacity growth and shrink policy.
//!
//! All functions here are pure: they compute a new capacity from the current
//! `(count, capacity)` pair and never touch memory. `RawBuffer` applies the
//! results.

use crate::error::GrowBufError;

/// Multiplier applied to the capacity on every growth step.
pub const GROWTH_FACTOR: usize = 2;
/// Capacity used when growing a buffer that has no allocation yet.
pub const DEFAULT_CAPACITY: usize = 8;
/// Capacity floor below which `maybe_shrink` never goes.
pub const MIN_CAPACITY: usize = 4;
/// Occupancy percentage at or below which `maybe_shrink` releases memory.
pub const SHRINK_THRESHOLD_PERCENT: usize = 25;

/// Tunable growth parameters.
///
/// The defaults reproduce the classic doubling curve: start at 8 slots,
/// double on demand, shrink once occupancy drops to a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    growth_factor: usize,
    default_capacity: usize,
    min_capacity: usize,
    shrink_threshold_percent: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            growth_factor: GROWTH_FACTOR,
            default_capacity: DEFAULT_CAPACITY,
            min_capacity: MIN_CAPACITY,
            shrink_threshold_percent: SHRINK_THRESHOLD_PERCENT,
        }
    }
}

impl GrowthPolicy {
    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::InvalidArgument` if:
    /// - `growth_factor` is below 2
    /// - `default_capacity` is 0
    /// - `min_capacity` is above `default_capacity`
    /// - `shrink_threshold_percent` is 100 or more
    pub fn new(
        growth_factor: usize,
        default_capacity: usize,
        min_capacity: usize,
        shrink_threshold_percent: usize,
    ) -> Result<Self, GrowBufError> {
        if growth_factor < 2 {
            return Err(GrowBufError::InvalidArgument {
                reason: "growth factor must be at least 2",
            });
        }
        if default_capacity == 0 {
            return Err(GrowBufError::InvalidArgument {
                reason: "default capacity must be non-zero",
            });
        }
        if min_capacity > default_capacity {
            return Err(GrowBufError::InvalidArgument {
                reason: "minimum capacity exceeds default capacity",
            });
        }
        if shrink_threshold_percent >= 100 {
            return Err(GrowBufError::InvalidArgument {
                reason: "shrink threshold must be below 100 percent",
            });
        }
        Ok(Self {
            growth_factor,
            default_capacity,
            min_capacity,
            shrink_threshold_percent,
        })
    }

    /// Returns a copy with a different growth factor.
    ///
    /// # Errors
    ///
    /// Same validation as [`GrowthPolicy::new`].
    pub fn with_growth_factor(self, growth_factor: usize) -> Result<Self, GrowBufError> {
        Self::new(
            growth_factor,
            self.default_capacity,
            self.min_capacity,
            self.shrink_threshold_percent,
        )
    }

    /// Returns a copy with a different default capacity.
    ///
    /// # Errors
    ///
    /// Same validation as [`GrowthPolicy::new`].
    pub fn with_default_capacity(self, default_capacity: usize) -> Result<Self, GrowBufError> {
        Self::new(
            self.growth_factor,
            default_capacity,
            self.min_capacity,
            self.shrink_threshold_percent,
        )
    }

    /// Returns a copy with a different shrink floor.
    ///
    /// # Errors
    ///
    /// Same validation as [`GrowthPolicy::new`].
    pub fn with_min_capacity(self, min_capacity: usize) -> Result<Self, GrowBufError> {
        Self::new(
            self.growth_factor,
            self.default_capacity,
            min_capacity,
            self.shrink_threshold_percent,
        )
    }

    /// Returns a copy with a different low-occupancy threshold.
    ///
    /// # Errors
    ///
    /// Same validation as [`GrowthPolicy::new`].
    pub fn with_shrink_threshold_percent(
        self,
        shrink_threshold_percent: usize,
    ) -> Result<Self, GrowBufError> {
        Self::new(
            self.growth_factor,
            self.default_capacity,
            self.min_capacity,
            shrink_threshold_percent,
        )
    }

    #[must_use]
    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    #[must_use]
    pub fn default_capacity(&self) -> usize {
        self.default_capacity
    }

    #[must_use]
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    #[must_use]
    pub fn shrink_threshold_percent(&self) -> usize {
        self.shrink_threshold_percent
    }

    fn step(&self, capacity: usize) -> Result<usize, GrowBufError> {
        capacity
            .checked_mul(self.growth_factor)
            .ok_or(GrowBufError::Overflow { count: capacity })
    }

    /// Computes the capacity after one growth step.
    ///
    /// From zero the result is the default capacity; otherwise the capacity
    /// is multiplied by the growth factor. A `required` minimum raises the
    /// result to at least that value.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::Overflow` if the multiplication overflows.
    pub fn grow(&self, capacity: usize, required: Option<usize>) -> Result<usize, GrowBufError> {
        let next = if capacity == 0 {
            self.default_capacity
        } else {
            self.step(capacity)?
        };
        Ok(required.map_or(next, |required| next.max(required)))
    }

    /// Computes the smallest capacity on the growth curve that holds `required` slots.
    ///
    /// Returns `capacity` unchanged when it already suffices. Growth from zero
    /// starts at `max(default_capacity, required)`; any other growth repeats
    /// the multiplication step until the result reaches `required`.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::Overflow` if a growth step overflows.
    pub fn ensure_capacity(&self, capacity: usize, required: usize) -> Result<usize, GrowBufError> {
        if capacity >= required {
            return Ok(capacity);
        }
        if capacity == 0 {
            return Ok(self.default_capacity.max(required));
        }
        let mut next = capacity;
        while next < required {
            next = self.step(next)?;
        }
        Ok(next)
    }

    /// Computes the capacity `maybe_shrink` should move to, if any.
    ///
    /// Returns `None` when the capacity is already at or below the floor,
    /// when occupancy is above the threshold, or when the target would not
    /// actually release memory. The target is never below `count` nor below
    /// `min_capacity`.
    #[must_use]
    pub fn shrink_target(&self, count: usize, capacity: usize) -> Option<usize> {
        if capacity <= self.min_capacity {
            return None;
        }
        // count / capacity > threshold / 100, without division
        let occupied = count.saturating_mul(100);
        let limit = capacity.saturating_mul(self.shrink_threshold_percent);
        if occupied > limit {
            return None;
        }
        let target = count
            .saturating_mul(self.growth_factor)
            .max(self.min_capacity)
            .max(count);
        (target < capacity).then_some(target)
    }
}

/// Computes the byte size of `slots` slots of `element_size` bytes each.
///
/// # Errors
///
/// Returns `GrowBufError::InvalidArgument` if `element_size` is 0, and
/// `GrowBufError::Overflow` if the product does not fit in `isize`.
pub fn byte_size(slots: usize, element_size: usize) -> Result<usize, GrowBufError> {
    if element_size == 0 {
        return Err(GrowBufError::InvalidArgument {
            reason: "element size is zero",
        });
    }
    slots
        .checked_mul(element_size)
        .filter(|bytes| isize::try_from(*bytes).is_ok())
        .ok_or(GrowBufError::Overflow { count: slots })
}
