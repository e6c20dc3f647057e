use core::slice;

use crate::chunk::Chunk;
use crate::raw::Slot;

/// Iterator over a primary slice followed by chunk storage
///
/// This iterator implements `Clone`.
#[derive(Clone)]
pub struct ChunkedIter<'a, T> {
    current: slice::Iter<'a, T>,
    chunks: slice::Iter<'a, Chunk<T>>,
    remaining: usize,
}

impl<'a, T: Slot> ChunkedIter<'a, T> {
    pub(crate) fn new(primary: &'a [T], chunks: &'a [Chunk<T>]) -> Self {
        let remaining = primary.len() + chunks.iter().map(Chunk::len).sum::<usize>();
        Self {
            current: primary.iter(),
            chunks: chunks.iter(),
            remaining,
        }
    }
}

impl<'a, T: Slot> Iterator for ChunkedIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                self.remaining -= 1;
                return Some(item);
            }
            self.current = self.chunks.next()?.as_slice().iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Slot> ExactSizeIterator for ChunkedIter<'_, T> {}
