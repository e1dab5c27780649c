//! Persisted header: symbol count plus the raw histogram.
//!
//! ```text
//! offset  size      field
//! 0       8         total symbol count, u64 little-endian
//! 8       256 * 4   occurrence count of symbol i, u32 little-endian
//! 1032    ...       packed bitstream, MSB-first
//! ```

use crate::error::{CompressionError, Result};
use crate::model::{FrequencyTable, ALPHABET_SIZE};

const COUNT_FIELD_LEN: usize = 8;
const SYMBOL_FIELD_LEN: usize = 4;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = COUNT_FIELD_LEN + ALPHABET_SIZE * SYMBOL_FIELD_LEN;

/// Decoded form of the fixed header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Number of symbols the bitstream encodes.
    pub symbol_count: u64,
    /// Occurrence count per symbol.
    pub counts: [u32; ALPHABET_SIZE],
}

impl Header {
    /// Header describing the input `model` was built from.
    pub fn from_model(model: &FrequencyTable) -> Self {
        Self {
            symbol_count: model.symbol_count(),
            counts: *model.counts(),
        }
    }

    /// Append the serialized header to `buf`.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.reserve(HEADER_LEN);
        buf.extend_from_slice(&self.symbol_count.to_le_bytes());
        for count in &self.counts {
            buf.extend_from_slice(&count.to_le_bytes());
        }
    }

    /// Parse the header at the start of `data`, returning it together with
    /// the bytes that follow.
    ///
    /// Rejects buffers shorter than [`HEADER_LEN`] and headers whose counts
    /// do not add up to the declared symbol count.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < HEADER_LEN {
            return Err(CompressionError::TruncatedHeader {
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }
        let (head, rest) = data.split_at(HEADER_LEN);
        let (count_field, symbol_fields) = head.split_at(COUNT_FIELD_LEN);

        let mut raw = [0u8; COUNT_FIELD_LEN];
        raw.copy_from_slice(count_field);
        let symbol_count = u64::from_le_bytes(raw);

        let mut counts = [0u32; ALPHABET_SIZE];
        for (slot, chunk) in counts
            .iter_mut()
            .zip(symbol_fields.chunks_exact(SYMBOL_FIELD_LEN))
        {
            let mut raw = [0u8; SYMBOL_FIELD_LEN];
            raw.copy_from_slice(chunk);
            *slot = u32::from_le_bytes(raw);
        }

        let sum: u64 = counts.iter().map(|&c| c as u64).sum();
        if sum != symbol_count {
            return Err(CompressionError::CorruptHeader(format!(
                "symbol counts sum to {} but header declares {} symbols",
                sum, symbol_count
            )));
        }

        Ok((
            Self {
                symbol_count,
                counts,
            },
            rest,
        ))
    }

    /// Rebuild the frequency model this header describes.
    pub fn model(&self) -> FrequencyTable {
        FrequencyTable::from_counts(self.counts)
    }
}
