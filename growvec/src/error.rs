use growbuf::GrowBufError;
use thiserror::Error;

/// Error types for container operations
///
/// Storage failures from the `growbuf` engine pass through unchanged; the
/// remaining variants describe conditions only a container can judge.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GrowVecError {
    /// The underlying buffer rejected the operation
    #[error(transparent)]
    Buffer(#[from] GrowBufError),
    /// Operation needs at least one element
    #[error("Operation on empty container")]
    EmptyContainer,
    /// A bounded stack already holds `limit` elements
    #[error("Stack full: limit of {limit} elements reached")]
    StackFull {
        /// Maximum number of elements
        limit: usize,
    },
    /// Text content is not valid UTF-8
    #[error("Invalid UTF-8: valid up to byte {valid_up_to}")]
    InvalidUtf8 {
        /// Length of the valid prefix
        valid_up_to: usize,
    },
    /// A text edit would split a UTF-8 sequence
    #[error("Not a char boundary: byte {index} is inside a UTF-8 sequence")]
    NotCharBoundary {
        /// Byte offset of the rejected edit
        index: usize,
    },
}
