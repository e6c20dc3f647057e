//! Append-only overflow storage.
//!
//! A [`ChunkList`] absorbs appends in fixed-capacity chunks so the primary
//! buffer is not reallocated on every growth step. The logical index space
//! of a container is its primary slots followed by the chunk slots in chunk
//! order. [`consolidate`] is the only operation that moves chunk data into
//! the primary buffer.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::GrowBufError;
use crate::index::normalize_index;
use crate::iter::ChunkedIter;
use crate::raw::{allocate, RawBuffer, Slot};

/// Slots per chunk when the caller does not pick a size.
pub const DEFAULT_CHUNK_CAPACITY: usize = 64;

/// One fixed-capacity overflow node.
#[derive(Debug, Clone)]
pub struct Chunk<T> {
    elements: Box<[T]>,
    count: usize,
}

impl<T: Slot> Chunk<T> {
    /// Allocates an empty chunk of `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::InvalidArgument` if `capacity` is 0 or the slot
    /// type is zero-sized, or an allocation error.
    pub fn new(capacity: usize) -> Result<Self, GrowBufError> {
        if capacity == 0 {
            return Err(GrowBufError::InvalidArgument {
                reason: "chunk capacity is zero",
            });
        }
        Ok(Self {
            elements: allocate(capacity)?,
            count: 0,
        })
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

    #[must_use]
    pub fn available(&self) -> usize {
        self.elements.len() - self.count
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == self.elements.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements[..self.count]
    }

    /// Copies as much of `data` as fits and returns the number of slots taken.
    fn fill(&mut self, data: &[T]) -> usize {
        let taken = data.len().min(self.available());
        self.elements[self.count..self.count + taken].copy_from_slice(&data[..taken]);
        self.count += taken;
        taken
    }
}

/// An ordered list of chunks with a running slot total.
///
/// States move forward from empty to one chunk to many chunks as appends
/// arrive, and return to empty only through [`ChunkList::clear`] or
/// [`consolidate`].
#[derive(Debug, Clone)]
pub struct ChunkList<T> {
    chunks: Vec<Chunk<T>>,
    chunk_capacity: usize,
    total_count: usize,
}

impl<T: Slot> ChunkList<T> {
    /// Creates an empty list whose new chunks hold `chunk_capacity` slots each.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::InvalidArgument` if `chunk_capacity` is 0.
    pub fn new(chunk_capacity: usize) -> Result<Self, GrowBufError> {
        if chunk_capacity == 0 {
            return Err(GrowBufError::InvalidArgument {
                reason: "chunk capacity is zero",
            });
        }
        Ok(Self {
            chunks: Vec::new(),
            chunk_capacity,
            total_count: 0,
        })
    }

    /// Creates an empty list with [`DEFAULT_CHUNK_CAPACITY`].
    #[must_use]
    pub fn with_default_chunk_capacity() -> Self {
        Self {
            chunks: Vec::new(),
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            total_count: 0,
        }
    }

    #[must_use]
    pub fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    /// Number of chunk nodes.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Sum of the filled slots of all chunks.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[must_use]
    pub fn chunks(&self) -> &[Chunk<T>] {
        &self.chunks
    }

    /// Appends one slot, opening a new chunk when the last one is full.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if a new chunk is needed and cannot be made.
    pub fn append_element(&mut self, value: T) -> Result<(), GrowBufError> {
        self.append_data(core::slice::from_ref(&value))
    }

    /// Appends `data`, spreading it over as many new chunks as needed.
    ///
    /// All new chunks are allocated before any slot is written, so a failed
    /// append leaves the list unchanged.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if a needed chunk cannot be made.
    pub fn append_data(&mut self, data: &[T]) -> Result<(), GrowBufError> {
        if data.is_empty() {
            return Ok(());
        }
        let room = self.chunks.last().map_or(0, Chunk::available);
        let overflow = data.len().saturating_sub(room);
        let new_chunks = overflow.div_ceil(self.chunk_capacity);

        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(new_chunks)
            .map_err(|_| GrowBufError::AllocationFailed {
                requested: new_chunks,
            })?;
        for _ in 0..new_chunks {
            fresh.push(Chunk::new(self.chunk_capacity)?);
        }
        self.chunks
            .try_reserve(new_chunks)
            .map_err(|_| GrowBufError::AllocationFailed {
                requested: new_chunks,
            })?;

        let mut rest = data;
        if let Some(tail) = self.chunks.last_mut() {
            let taken = tail.fill(rest);
            rest = &rest[taken..];
        }
        for mut chunk in fresh {
            let taken = chunk.fill(rest);
            rest = &rest[taken..];
            self.chunks.push(chunk);
        }
        self.total_count += data.len();
        Ok(())
    }

    /// Returns the slot at an absolute offset into the chunk storage.
    #[must_use]
    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.total_count {
            return None;
        }
        let mut remaining = offset;
        for chunk in &self.chunks {
            if remaining < chunk.len() {
                return chunk.as_slice().get(remaining);
            }
            remaining -= chunk.len();
        }
        None
    }

    /// Drops every chunk and its data.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.total_count = 0;
    }
}

/// Combined logical length of a primary buffer and optional chunk storage.
///
/// A missing chunk list counts as empty.
#[must_use]
pub fn total_count<T: Slot>(primary_count: usize, chunks: Option<&ChunkList<T>>) -> usize {
    primary_count + chunks.map_or(0, ChunkList::total_count)
}

/// Resolves a logical index over `primary` followed by the chunk storage.
///
/// Negative indices count back from the end of the combined sequence.
/// Returns `None` if the index is out of range for both.
#[must_use]
pub fn get_element_chunked<'a, T: Slot>(
    primary: &'a [T],
    chunks: Option<&'a ChunkList<T>>,
    index: isize,
) -> Option<&'a T> {
    let absolute = normalize_index(index, total_count(primary.len(), chunks)).ok()?;
    if absolute < primary.len() {
        return primary.get(absolute);
    }
    chunks?.get(absolute - primary.len())
}

/// Iterates a primary slice followed by the chunk storage, in logical order.
#[must_use]
pub fn iter_chunked<'a, T: Slot>(
    primary: &'a [T],
    chunks: Option<&'a ChunkList<T>>,
) -> ChunkedIter<'a, T> {
    ChunkedIter::new(primary, chunks.map_or(&[][..], ChunkList::chunks))
}

/// Moves all chunk data to the tail of `primary` and empties the list.
///
/// The primary buffer is reserved to exactly the combined length when it is
/// too small. On error both the buffer and the list are unchanged.
///
/// # Errors
///
/// Returns `GrowBufError::Overflow` if the combined length overflows, or an
/// allocation error from the primary buffer.
pub fn consolidate<T: Slot>(
    primary: &mut RawBuffer<T>,
    chunks: &mut ChunkList<T>,
) -> Result<(), GrowBufError> {
    if chunks.is_empty() {
        return Ok(());
    }
    let required = primary
        .len()
        .checked_add(chunks.total_count())
        .ok_or(GrowBufError::Overflow {
            count: primary.len(),
        })?;
    primary.reserve(required)?;
    for chunk in chunks.chunks() {
        primary.append_data(chunk.as_slice())?;
    }
    chunks.clear();
    Ok(())
}
