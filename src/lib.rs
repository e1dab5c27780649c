//! Static order-0 range coding over a 16-bit interval.
//!
//! `rc16` compresses arbitrary byte streams with a two-pass scheme: one pass
//! counts symbol frequencies, the second codes every byte against that fixed
//! model. The decoder rebuilds the identical model from the stored histogram
//! and inverts the coding exactly.
//!
//! # Components
//!
//! - [`FrequencyTable`]: histogram and cumulative table, shared by both sides
//! - [`BitSink`] / [`BitSource`]: MSB-first bit packing
//! - [`RangeEncoder`]: narrows the interval per symbol, resolving
//!   undecided ("pending") bits without carry propagation
//! - [`RangeDecoder`]: mirrors the encoder, finding each symbol by binary
//!   search over the cumulative table
//! - [`RangeCompressor`]: the whole-buffer driver, header included
//!
//! # Example
//!
//! ```rust
//! use rc16::{ByteCompressor, RangeCompressor};
//!
//! let compressor = RangeCompressor::new();
//! let input = b"mississippi river".to_vec();
//!
//! let compressed = compressor.compress(&input).unwrap();
//! let decompressed = compressor.decompress(&compressed).unwrap();
//! assert_eq!(input, decompressed);
//! ```
//!
//! # Limits
//!
//! Each symbol may occur at most `u32::MAX` times, the width of its header
//! field. The whole input is held in memory. Decoded output size is bounded
//! only by the symbol count stored in the header.
//!
//! # References
//!
//! - Witten, Neal, Cleary (1987). "Arithmetic coding for data compression"
//! - Martin, G. N. N. (1979). "Range encoding: an algorithm for removing
//!   redundancy from a digitised message"

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bitio;
mod compressor;
mod decoder;
mod encoder;
mod error;
mod header;
mod interval;
mod model;
mod traits;

pub use bitio::{BitSink, BitSource};
pub use compressor::{CodingReport, RangeCompressor};
pub use decoder::RangeDecoder;
pub use encoder::RangeEncoder;
pub use error::{CompressionError, Result};
pub use header::{Header, HEADER_LEN};
pub use interval::{Interval, Renorm, HALF, MAX_RANGE, QUARTER, THREE_QUARTERS};
pub use model::{FrequencyTable, ALPHABET_SIZE, MAX_CODING_TOTAL};
pub use traits::ByteCompressor;
