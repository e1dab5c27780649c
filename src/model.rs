//! Static order-0 frequency model.
//!
//! The model is built from one full pass over the input and is immutable
//! afterwards. The decoder never sees the input, so it rebuilds the same
//! table from the per-symbol counts stored in the header
//! ([`FrequencyTable::from_counts`]). Both paths go through the same
//! cumulative construction, which keeps the two tables bit-identical.
//!
//! # Coding precision
//!
//! A 16-bit interval that has just been renormalized is always wider than
//! `QUARTER` (16384). A symbol of frequency `f` is guaranteed a non-empty
//! sub-interval only while `range * f >= total`, so the coding total must not
//! exceed `QUARTER`. Inputs with more symbols than that are coded against
//! counts rescaled into `QUARTER - 256`, with every present symbol kept at
//! frequency 1 or more. The header still stores raw occurrence counts.

use crate::error::{CompressionError, Result};
use crate::interval::QUARTER;

/// Number of distinct symbols (byte values).
pub const ALPHABET_SIZE: usize = 256;

/// Largest coding total the 16-bit interval can resolve.
pub const MAX_CODING_TOTAL: u32 = QUARTER;

// Leaves room for up to 256 symbols rounded up from 0 to 1.
const RESCALE_TARGET: u64 = (QUARTER as u64) - ALPHABET_SIZE as u64;

/// Occurrence counts and the cumulative table derived from them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Raw occurrence count per symbol, as persisted in the header.
    counts: [u32; ALPHABET_SIZE],
    /// Number of symbols in the input (sum of `counts`).
    symbol_count: u64,
    /// Prefix sums of the coding frequencies; `cumulative[256]` is the
    /// coding total.
    cumulative: [u32; ALPHABET_SIZE + 1],
}

impl FrequencyTable {
    /// Count every byte of `input`.
    ///
    /// Fails only if a single symbol occurs more often than the 32-bit
    /// per-symbol header field can record. Empty input yields an empty
    /// table with a total of zero.
    pub fn build(input: &[u8]) -> Result<Self> {
        let mut wide = [0u64; ALPHABET_SIZE];
        for &byte in input {
            wide[byte as usize] += 1;
        }

        let mut counts = [0u32; ALPHABET_SIZE];
        for (symbol, (&n, slot)) in wide.iter().zip(counts.iter_mut()).enumerate() {
            *slot = u32::try_from(n).map_err(|_| {
                CompressionError::InvalidInput(format!(
                    "symbol {:#04x} occurs {} times, more than a 32-bit count can hold",
                    symbol, n
                ))
            })?;
        }

        Ok(Self::from_counts(counts))
    }

    /// Rebuild a table from persisted per-symbol counts.
    pub fn from_counts(counts: [u32; ALPHABET_SIZE]) -> Self {
        let symbol_count: u64 = counts.iter().map(|&c| c as u64).sum();

        let rescale = symbol_count > MAX_CODING_TOTAL as u64;
        tracing::trace!(symbol_count, rescale, "building cumulative table");

        let mut cumulative = [0u32; ALPHABET_SIZE + 1];
        for (i, &count) in counts.iter().enumerate() {
            let freq = if !rescale || count == 0 {
                count
            } else {
                // count <= symbol_count, so the quotient is at most RESCALE_TARGET
                ((count as u64 * RESCALE_TARGET / symbol_count) as u32).max(1)
            };
            cumulative[i + 1] = cumulative[i] + freq;
        }

        Self {
            counts,
            symbol_count,
            cumulative,
        }
    }

    /// Raw per-symbol occurrence counts.
    pub fn counts(&self) -> &[u32; ALPHABET_SIZE] {
        &self.counts
    }

    /// The 257-entry cumulative coding table.
    pub fn cumulative(&self) -> &[u32; ALPHABET_SIZE + 1] {
        &self.cumulative
    }

    /// Number of symbols in the modeled input.
    pub fn symbol_count(&self) -> u64 {
        self.symbol_count
    }

    /// Coding total, `cumulative[256]`.
    #[inline]
    pub fn total(&self) -> u32 {
        self.cumulative[ALPHABET_SIZE]
    }

    /// True when the table models zero-length input.
    pub fn is_empty(&self) -> bool {
        self.symbol_count == 0
    }

    /// True when coding frequencies differ from the raw counts.
    pub fn is_rescaled(&self) -> bool {
        self.symbol_count > MAX_CODING_TOTAL as u64
    }

    /// Number of symbols that occur at least once.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Lower cumulative bound of `symbol`.
    #[inline]
    pub fn cumulative_low(&self, symbol: u8) -> u32 {
        self.cumulative[symbol as usize]
    }

    /// Upper cumulative bound of `symbol`.
    #[inline]
    pub fn cumulative_high(&self, symbol: u8) -> u32 {
        self.cumulative[symbol as usize + 1]
    }

    /// Find the symbol whose cumulative range contains `scaled`.
    ///
    /// `scaled` must lie in `[0, total)`. Binary search over the cumulative
    /// table keeps `cumulative[lo] <= scaled < cumulative[hi]`, which needs
    /// the table to be non-decreasing. Symbols with zero frequency have an
    /// empty range and are never returned.
    #[inline]
    pub fn find_symbol(&self, scaled: u32) -> u8 {
        debug_assert!(scaled < self.total());

        let mut lo = 0usize;
        let mut hi = ALPHABET_SIZE;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.cumulative[mid] <= scaled {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo as u8
    }

    /// Order-0 entropy of the modeled input in bits.
    ///
    /// `sum(count * log2(n / count))` over the raw counts. This is the lower
    /// bound on the size of any static order-0 encoding of the input.
    pub fn entropy_bits(&self) -> f64 {
        if self.symbol_count == 0 {
            return 0.0;
        }
        let n = self.symbol_count as f64;
        self.counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let c = c as f64;
                c * (n / c).log2()
            })
            .sum()
    }
}
