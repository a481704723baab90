
//! Lossless compression of byte streams with static Huffman codes.
//!
//! The whole input is counted, a Huffman tree is built from the byte frequencies,
//! and every byte is replaced by its code. The shape of the tree is written
//! in front of the codes, so that expanding needs nothing but the compressed stream.
//!
//! ```
//! let original = b"abracadabra";
//!
//! let compressed = huffpack::compress::compress_bytes(original)?;
//! let expanded = huffpack::compress::expand_bytes(&compressed)?;
//!
//! assert_eq!(expanded, original);
//! # Ok::<(), huffpack::error::Error>(())
//! ```

#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused_extern_crates,
    unused,
    missing_debug_implementations,
)]

#![deny(
    unused_must_use,
    trivial_numeric_casts,
    redundant_semicolons
)]

#![forbid(unsafe_code)]


pub mod io;
pub mod error;
pub mod frequency;
pub mod queue;
pub mod tree;
pub mod code;
pub mod trie;
pub mod compress;


/// Number of distinct symbols: every possible byte value.
pub const ALPHABET_SIZE: usize = 256;


/// Export the most important items from `huffpack`.
pub mod prelude {

    // main exports
    pub use crate::compress::{
        compress, compress_bytes, compress_read,
        expand, expand_bytes,
        Summary,
    };

    // secondary data types
    pub use crate::frequency::FrequencyTable;
    pub use crate::tree::{HuffmanTree, Node};
    pub use crate::code::{Code, CodeTable};
    pub use crate::error::{Error, Result};
    pub use crate::ALPHABET_SIZE;
}
