use thiserror::Error;

/// Error types for `growbuf` operations
///
/// Every failure is reported before any slot is written or any allocation is
/// replaced, so a buffer that returned an error is still in its prior state.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GrowBufError {
    /// A required argument is unusable (zero-sized slot type, zero capacity, bad policy)
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the rejected argument
        reason: &'static str,
    },
    /// Range endpoints are out of order after normalization
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Normalized start index
        start: usize,
        /// Normalized end index
        end: usize,
    },
    /// The allocator could not satisfy the request
    #[error("Allocation failed: could not allocate {requested} slots")]
    AllocationFailed {
        /// Number of slots requested
        requested: usize,
    },
    /// Logical index is outside the valid range for the buffer
    #[error("Index out of bounds: index {index} is beyond length {length}")]
    IndexOutOfBounds {
        /// Logical index as given by the caller
        index: isize,
        /// Current number of valid slots
        length: usize,
    },
    /// A non-growing primitive was asked to write more slots than remain
    #[error("Insufficient capacity: requested {requested} slots, but only {available} slots available")]
    InsufficientCapacity {
        /// Number of slots requested
        requested: usize,
        /// Number of unused slots
        available: usize,
    },
    /// Slot count or byte size does not fit in `usize`
    #[error("Arithmetic overflow: {count} slots exceed the addressable size")]
    Overflow {
        /// Slot count whose size overflowed
        count: usize,
    },
}
