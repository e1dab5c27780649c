//! The whole-buffer compression interface.

use crate::error::Result;
use crate::model::FrequencyTable;

/// A lossless compressor over complete byte buffers.
///
/// Both directions consume the entire input before producing output; there
/// is no incremental or streaming mode.
pub trait ByteCompressor {
    /// Compress `input` into a self-describing encoded artifact.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Reconstruct the original bytes from an artifact produced by
    /// [`compress`](Self::compress).
    fn decompress(&self, encoded: &[u8]) -> Result<Vec<u8>>;

    /// Estimated encoded size in bytes for input with the given histogram.
    fn estimate_size(&self, model: &FrequencyTable) -> usize;

    /// Estimated bits per input symbol, excluding fixed overhead.
    fn bits_per_symbol(&self, model: &FrequencyTable) -> f64 {
        if model.symbol_count() == 0 {
            return 0.0;
        }
        model.entropy_bits() / model.symbol_count() as f64
    }
}
