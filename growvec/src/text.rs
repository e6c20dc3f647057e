//! Streaming text buffer.
//!
//! Appends land in chunk storage and cost no shifting or reallocation of the
//! primary buffer. Edits that need contiguous bytes (insert, remove, trim,
//! pad, `to_str`) consolidate first.

use core::fmt;
use core::ops::Range;

use growbuf::{
    consolidate, get_element_chunked, iter_chunked, normalize_insert_index, normalize_range,
    total_count, ChunkList, ChunkedIter, GrowBufError, GrowthPolicy, RawBuffer,
};
use tracing::{debug, trace};

use crate::error::GrowVecError;

const FILL_BLOCK: usize = 32;

/// A byte buffer for text, tuned for append-heavy use.
///
/// Offsets are byte offsets. Edits refuse offsets that would split a UTF-8
/// sequence of the current content.
#[derive(Debug, Clone)]
pub struct TextBuf {
    primary: RawBuffer<u8>,
    chunks: ChunkList<u8>,
    policy: GrowthPolicy,
}

impl Default for TextBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuf {
    #[must_use]
    pub fn new() -> Self {
        Self {
            primary: RawBuffer::new(),
            chunks: ChunkList::with_default_chunk_capacity(),
            policy: GrowthPolicy::default(),
        }
    }

    /// Creates an empty buffer whose appends go to chunks of `chunk_capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if `chunk_capacity` is 0.
    pub fn with_chunk_capacity(chunk_capacity: usize) -> Result<Self, GrowVecError> {
        Ok(Self {
            chunks: ChunkList::new(chunk_capacity)?,
            ..Self::new()
        })
    }

    /// Creates a contiguous buffer holding a copy of `text`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if the allocation cannot be made.
    pub fn from_text(text: &str) -> Result<Self, GrowVecError> {
        Ok(Self {
            primary: RawBuffer::from_slice(text.as_bytes(), 0)?,
            ..Self::new()
        })
    }

    /// Total length in bytes, across primary and chunk storage.
    #[must_use]
    pub fn len(&self) -> usize {
        total_count(self.primary.len(), Some(&self.chunks))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of pending chunks not yet merged into the primary buffer.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.chunk_count()
    }

    /// Whether all bytes live in the primary buffer.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Appends `text`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if a chunk cannot be allocated.
    pub fn push_str(&mut self, text: &str) -> Result<(), GrowVecError> {
        self.push_bytes(text.as_bytes())
    }

    /// Appends raw bytes. They are validated only when read back with [`TextBuf::to_str`].
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if a chunk cannot be allocated.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), GrowVecError> {
        Ok(self.chunks.append_data(bytes)?)
    }

    /// Appends a single byte.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if a chunk cannot be allocated.
    pub fn push_byte(&mut self, byte: u8) -> Result<(), GrowVecError> {
        Ok(self.chunks.append_element(byte)?)
    }

    /// Returns the byte at a logical index (negative counts from the end).
    #[must_use]
    pub fn byte_at(&self, index: isize) -> Option<u8> {
        get_element_chunked(self.primary.as_slice(), Some(&self.chunks), index).copied()
    }

    /// Iterates every byte in order without consolidating.
    #[must_use]
    pub fn bytes(&self) -> ChunkedIter<'_, u8> {
        iter_chunked(self.primary.as_slice(), Some(&self.chunks))
    }

    /// Merges pending chunks into the primary buffer.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if the primary buffer cannot grow;
    /// the content is unchanged in that case.
    pub fn consolidate(&mut self) -> Result<(), GrowVecError> {
        if self.chunks.is_empty() {
            return Ok(());
        }
        let chunk_count = self.chunks.chunk_count();
        let moved = self.chunks.total_count();
        consolidate(&mut self.primary, &mut self.chunks)?;
        debug!(
            chunk_count,
            moved,
            len = self.primary.len(),
            capacity = self.primary.capacity(),
            "consolidated text chunks"
        );
        Ok(())
    }

    /// The bytes, if no chunks are pending.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.is_contiguous().then(|| self.primary.as_slice())
    }

    /// Consolidates and returns the bytes.
    ///
    /// # Errors
    ///
    /// Same as [`TextBuf::consolidate`].
    pub fn make_contiguous(&mut self) -> Result<&[u8], GrowVecError> {
        self.consolidate()?;
        Ok(self.primary.as_slice())
    }

    /// Consolidates and returns the content as a string.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::InvalidUtf8` if raw bytes pushed earlier do not
    /// form valid UTF-8, or an error from [`TextBuf::consolidate`].
    pub fn to_str(&mut self) -> Result<&str, GrowVecError> {
        let bytes = self.make_contiguous()?;
        core::str::from_utf8(bytes).map_err(|e| GrowVecError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })
    }

    fn check_boundary(&self, at: usize) -> Result<(), GrowVecError> {
        match self.primary.as_slice().get(at) {
            // continuation bytes are 0b10xx_xxxx
            Some(byte) if (byte & 0xC0) == 0x80 => Err(GrowVecError::NotCharBoundary { index: at }),
            _ => Ok(()),
        }
    }

    fn make_room(&mut self, additional: usize) -> Result<(), GrowVecError> {
        let before = self.primary.capacity();
        self.primary.ensure_additional(&self.policy, additional)?;
        if self.primary.capacity() != before {
            trace!(
                from = before,
                to = self.primary.capacity(),
                "grew text storage"
            );
        }
        Ok(())
    }

    /// Inserts `text` at a logical byte position.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::NotCharBoundary` if the position splits a
    /// character, or `GrowVecError::Buffer` for an invalid position or failed
    /// growth.
    pub fn insert_str(&mut self, index: isize, text: &str) -> Result<(), GrowVecError> {
        if text.is_empty() {
            return Ok(());
        }
        self.consolidate()?;
        let at = normalize_insert_index(index, self.primary.len())?;
        self.check_boundary(at)?;
        self.make_room(text.len())?;
        self.primary.insert_at(at, text.as_bytes())?;
        Ok(())
    }

    /// Removes the inclusive logical byte range `[start, end]`, returning the byte count removed.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::NotCharBoundary` if either edge splits a
    /// character, or `GrowVecError::Buffer` for invalid endpoints.
    pub fn remove_range(&mut self, start: isize, end: isize) -> Result<usize, GrowVecError> {
        self.consolidate()?;
        let range = normalize_range(start, end, self.primary.len())?;
        self.erase(range)
    }

    fn erase(&mut self, range: Range<usize>) -> Result<usize, GrowVecError> {
        self.check_boundary(range.start)?;
        self.check_boundary(range.end)?;
        Ok(self.primary.erase(range)?)
    }

    /// Shortens the content to `len` bytes; no effect if it is already shorter.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::NotCharBoundary` if `len` splits a character.
    pub fn truncate(&mut self, len: usize) -> Result<(), GrowVecError> {
        self.consolidate()?;
        if len < self.primary.len() {
            self.check_boundary(len)?;
            self.primary.truncate(len);
        }
        Ok(())
    }

    /// Removes leading ASCII whitespace, returning the byte count removed.
    ///
    /// # Errors
    ///
    /// Same as [`TextBuf::consolidate`].
    pub fn trim_start(&mut self) -> Result<usize, GrowVecError> {
        self.consolidate()?;
        let leading = self
            .primary
            .as_slice()
            .iter()
            .take_while(|byte| byte.is_ascii_whitespace())
            .count();
        self.erase(0..leading)
    }

    /// Removes trailing ASCII whitespace, returning the byte count removed.
    ///
    /// # Errors
    ///
    /// Same as [`TextBuf::consolidate`].
    pub fn trim_end(&mut self) -> Result<usize, GrowVecError> {
        self.consolidate()?;
        let trailing = self
            .primary
            .as_slice()
            .iter()
            .rev()
            .take_while(|byte| byte.is_ascii_whitespace())
            .count();
        let len = self.primary.len();
        self.primary.truncate(len - trailing);
        Ok(trailing)
    }

    fn fill_at(&mut self, at: usize, count: usize, fill: u8) -> Result<(), GrowVecError> {
        if !fill.is_ascii() {
            return Err(GrowBufError::InvalidArgument {
                reason: "fill byte is not ASCII",
            }
            .into());
        }
        self.make_room(count)?;
        let block = [fill; FILL_BLOCK];
        let mut remaining = count;
        while remaining > 0 {
            let step = remaining.min(FILL_BLOCK);
            self.primary.insert_at(at, &block[..step])?;
            remaining -= step;
        }
        Ok(())
    }

    /// Prepends `fill` until the content is `width` bytes long.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if `fill` is not ASCII or growth fails.
    pub fn pad_start(&mut self, width: usize, fill: u8) -> Result<(), GrowVecError> {
        self.consolidate()?;
        let missing = width.saturating_sub(self.primary.len());
        if missing == 0 {
            return Ok(());
        }
        self.fill_at(0, missing, fill)
    }

    /// Appends `fill` until the content is `width` bytes long.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if `fill` is not ASCII or growth fails.
    pub fn pad_end(&mut self, width: usize, fill: u8) -> Result<(), GrowVecError> {
        self.consolidate()?;
        let missing = width.saturating_sub(self.primary.len());
        if missing == 0 {
            return Ok(());
        }
        self.fill_at(self.primary.len(), missing, fill)
    }

    /// Drops all content, keeping the primary allocation.
    pub fn clear(&mut self) {
        self.primary.clear();
        self.chunks.clear();
    }

    /// Consolidates, then reduces the primary capacity to the length.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::Buffer` if an allocation fails.
    pub fn shrink_to_fit(&mut self) -> Result<(), GrowVecError> {
        self.consolidate()?;
        Ok(self.primary.shrink_to_fit()?)
    }
}

impl fmt::Write for TextBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s).map_err(|_| fmt::Error)
    }
}
