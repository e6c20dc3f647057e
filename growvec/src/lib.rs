#![no_std]

//! `growvec`: vector, stack and text buffer containers on the `growbuf` engine.
//!
//! The containers here own no storage logic of their own. Each one embeds a
//! `growbuf::RawBuffer` (and, for text, a `growbuf::ChunkList`) and decides
//! only *when* to grow, consolidate or shrink.
//!
//! This crate is `no_std` compatible and needs only `alloc`. Capacity changes
//! are reported through `tracing` events; install a subscriber to see them.
//!
//! # Vector Interface
//!
//! ```
//! # use growvec::GrowVec;
//! let mut vector = GrowVec::new();
//! vector.extend_from_slice(&[10u32, 20, 30]).unwrap();
//! vector.insert(1, 99).unwrap();
//! assert_eq!(vector.as_slice(), &[10, 99, 20, 30]);
//!
//! // Negative indices count from the end
//! assert_eq!(vector.get(-1), Some(&30));
//! assert_eq!(vector.remove(0).unwrap(), 10);
//!
//! vector.shrink_to_fit().unwrap();
//! assert_eq!(vector.capacity(), 3);
//! ```
//!
//! # Stack Interface
//!
//! ```
//! # use growvec::SlotStack;
//! let mut stack = SlotStack::bounded(2).unwrap();
//! stack.push(1u8).unwrap();
//! stack.push(2).unwrap();
//! assert!(stack.push(3).is_err());
//!
//! assert_eq!(stack.top(), Some(&2));
//! assert_eq!(stack.pop(), Some(2));
//! assert_eq!(stack.pop(), Some(1));
//! assert!(stack.try_pop().is_err());
//! ```
//!
//! # Text Interface
//!
//! Appends are absorbed by chunk storage; edits consolidate on demand.
//!
//! ```
//! # use growvec::TextBuf;
//! let mut text = TextBuf::with_chunk_capacity(4).unwrap();
//! text.push_str("  hello").unwrap();
//! text.push_str(" world  ").unwrap();
//! assert!(!text.is_contiguous());
//! assert_eq!(text.byte_at(-3), Some(b'd'));
//!
//! text.trim_start().unwrap();
//! text.trim_end().unwrap();
//! text.pad_end(13, b'!').unwrap();
//! assert_eq!(text.to_str().unwrap(), "hello world!!");
//! ```

mod error;
mod stack;
mod text;
mod vector;

// Re-export public types
pub use error::GrowVecError;
pub use stack::SlotStack;
pub use text::TextBuf;
pub use vector::GrowVec;
