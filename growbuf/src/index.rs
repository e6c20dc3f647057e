//! Logical-to-absolute index conversion.
//!
//! Logical indices are signed: `0` is the first slot, `-1` the last. Invalid
//! indices are reported, never clamped.

use core::ops::Range;

use crate::error::GrowBufError;

/// Converts a logical index into an absolute offset in `[0, count)`.
///
/// # Errors
///
/// Returns `GrowBufError::IndexOutOfBounds` if the index does not address an
/// existing slot.
pub fn normalize_index(index: isize, count: usize) -> Result<usize, GrowBufError> {
    let absolute = if index >= 0 {
        index.unsigned_abs()
    } else {
        count
            .checked_sub(index.unsigned_abs())
            .ok_or(GrowBufError::IndexOutOfBounds {
                index,
                length: count,
            })?
    };
    if absolute < count {
        Ok(absolute)
    } else {
        Err(GrowBufError::IndexOutOfBounds {
            index,
            length: count,
        })
    }
}

/// Converts a logical insertion point into an absolute offset in `[0, count]`.
///
/// A non-negative index may equal `count` (append position). A negative index
/// is resolved like [`normalize_index`], so `-1` inserts before the last slot.
///
/// # Errors
///
/// Returns `GrowBufError::IndexOutOfBounds` for positions outside the buffer.
pub fn normalize_insert_index(index: isize, count: usize) -> Result<usize, GrowBufError> {
    if index >= 0 {
        let absolute = index.unsigned_abs();
        if absolute <= count {
            return Ok(absolute);
        }
        return Err(GrowBufError::IndexOutOfBounds {
            index,
            length: count,
        });
    }
    normalize_index(index, count)
}

/// Converts an inclusive logical range `[start, end]` into a half-open absolute range.
///
/// An empty buffer yields the empty range `0..0` for any endpoints, so "no
/// data" reads as a valid empty range.
///
/// # Errors
///
/// Returns `GrowBufError::IndexOutOfBounds` if either endpoint is invalid and
/// `GrowBufError::InvalidRange` if `start` lands after `end`.
pub fn normalize_range(start: isize, end: isize, count: usize) -> Result<Range<usize>, GrowBufError> {
    if count == 0 {
        return Ok(0..0);
    }
    let first = normalize_index(start, count)?;
    let last = normalize_index(end, count)?;
    if first > last {
        return Err(GrowBufError::InvalidRange {
            start: first,
            end: last,
        });
    }
    Ok(first..last + 1)
}
