#![no_std]

//! `growbuf`: a growable slot-buffer engine with chunked overflow storage.
//!
//! `growbuf` is the storage core shared by vectors, stacks and text buffers.
//! It owns the decisions those containers would otherwise each re-implement:
//! how capacity grows and shrinks, how Python-style negative indices map to
//! offsets, how slots are shifted on insert and remove, and how append-heavy
//! workloads are absorbed without reallocating.
//!
//! This crate is `no_std` compatible and needs only `alloc`.
//!
//! # Buffer Model
//!
//! A [`RawBuffer<T>`] holds `capacity` allocated slots of which the first
//! `len` are valid. Slots are `Copy + Default` values ([`Slot`]): they are
//! copied verbatim and zero-filled through `Default`.
//!
//! The mutation primitives never allocate. Growing is a separate, explicit
//! step driven by a [`GrowthPolicy`]:
//!
//! ```
//! # use growbuf::{GrowthPolicy, RawBuffer};
//! let policy = GrowthPolicy::default();
//! let mut buffer = RawBuffer::<u32>::new();
//!
//! // No room yet: the primitive refuses instead of growing
//! assert!(buffer.append_data(&[10, 20, 30]).is_err());
//!
//! buffer.ensure_additional(&policy, 3).unwrap();
//! buffer.append_data(&[10, 20, 30]).unwrap();
//! buffer.insert_element(1, 99).unwrap();
//! assert_eq!(buffer.as_slice(), &[10, 99, 20, 30]);
//!
//! buffer.remove(0).unwrap();
//! buffer.shrink_to_fit().unwrap();
//! assert_eq!(buffer.as_slice(), &[99, 20, 30]);
//! assert_eq!(buffer.capacity(), 3);
//! ```
//!
//! # Growth Policy
//!
//! - `grow`: from zero to the default capacity, otherwise multiply by the
//!   growth factor (2 by default)
//! - `ensure_capacity`: repeat the growth step until the requirement fits
//! - `reserve`: jump directly to the requested capacity
//! - `maybe_shrink`: when occupancy is at or below 25%, shrink toward the
//!   count without going under the minimum capacity
//! - `shrink_to_fit`: capacity becomes exactly the count; empty buffers free
//!   their allocation
//!
//! # Negative Indices
//!
//! Logical indices are `isize`. `-1` is the last slot, `-len` the first.
//! Out-of-range indices are errors, never clamped.
//!
//! ```
//! # use growbuf::{normalize_index, normalize_range};
//! assert_eq!(normalize_index(-1, 5), Ok(4));
//! assert!(normalize_index(5, 5).is_err());
//! assert_eq!(normalize_range(1, -1, 5), Ok(1..5));
//! assert_eq!(normalize_range(0, -1, 0), Ok(0..0));
//! ```
//!
//! # Chunked Overflow
//!
//! A [`ChunkList<T>`] takes appends in fixed-size chunks. Reads see the
//! primary buffer followed by the chunks; [`consolidate`] flattens the
//! chunks into the primary buffer when contiguous access is needed.
//!
//! ```
//! # use growbuf::{consolidate, get_element_chunked, ChunkList, RawBuffer};
//! let mut primary = RawBuffer::<u32>::new();
//! let mut chunks = ChunkList::new(4).unwrap();
//!
//! for value in 1..=5 {
//!     chunks.append_element(value).unwrap();
//! }
//! assert_eq!(chunks.chunk_count(), 2);
//! assert_eq!(get_element_chunked(primary.as_slice(), Some(&chunks), 4), Some(&5));
//!
//! consolidate(&mut primary, &mut chunks).unwrap();
//! assert_eq!(primary.as_slice(), &[1, 2, 3, 4, 5]);
//! assert_eq!(chunks.chunk_count(), 0);
//! ```
//!
//! # Errors
//!
//! Every fallible operation returns [`GrowBufError`] and leaves the buffer in
//! its prior state. The core performs no logging.

extern crate alloc;

mod chunk;
mod error;
mod index;
mod iter;
mod policy;
mod raw;

// Re-export public types and functions
pub use chunk::{
    consolidate, get_element_chunked, iter_chunked, total_count, Chunk, ChunkList,
    DEFAULT_CHUNK_CAPACITY,
};
pub use error::GrowBufError;
pub use index::{normalize_index, normalize_insert_index, normalize_range};
pub use iter::ChunkedIter;
pub use policy::{
    byte_size, GrowthPolicy, DEFAULT_CAPACITY, GROWTH_FACTOR, MIN_CAPACITY,
    SHRINK_THRESHOLD_PERCENT,
};
pub use raw::{RawBuffer, Slot};
