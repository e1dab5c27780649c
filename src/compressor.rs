//! Two-pass static range compressor.
//!
//! Encoding reads the whole input once to build the model, writes the
//! header, then codes the input a second time. Decoding rebuilds the model
//! from the header and pulls exactly the declared number of symbols.

use std::fs;
use std::path::Path;

use crate::decoder::RangeDecoder;
use crate::encoder::RangeEncoder;
use crate::error::{CompressionError, Result};
use crate::header::{Header, HEADER_LEN};
use crate::model::FrequencyTable;
use crate::traits::ByteCompressor;

// Upper bound on the up-front output allocation when decoding; the header's
// symbol count is not trusted with more than this.
const MAX_PREALLOC: u64 = 1 << 26;

// Bytes a decode may leave unread before it is worth a warning.
const TRAILING_WARN_BYTES: usize = 16;

/// Static order-0 range compressor.
///
/// Artifacts are a [`HEADER_LEN`]-byte header followed by the packed
/// bitstream.
///
/// Decoding trusts the header's symbol count: a consistent header may
/// declare up to `256 * u32::MAX` symbols, and the output grows to that size
/// whatever the bitstream holds.
#[derive(Clone, Debug, Default)]
pub struct RangeCompressor {
    verify: bool,
}

/// Sizes observed by a file-level encode or decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodingReport {
    /// Bytes read from the source.
    pub input_bytes: u64,
    /// Bytes written to the destination.
    pub output_bytes: u64,
}

impl CodingReport {
    /// `output_bytes / input_bytes`, or 1.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 1.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}

impl RangeCompressor {
    /// Create a compressor with default settings.
    pub fn new() -> Self {
        Self { verify: false }
    }

    /// Decode every freshly encoded buffer and compare it with the input
    /// before returning it.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Encode the file at `input` into `output`.
    ///
    /// The source is read in full before `output` is created, so a missing
    /// source leaves no artifact behind.
    pub fn encode_file(&self, input: &Path, output: &Path) -> Result<CodingReport> {
        let data = fs::read(input)?;
        let encoded = self.compress(&data)?;
        fs::write(output, &encoded)?;
        Ok(CodingReport {
            input_bytes: data.len() as u64,
            output_bytes: encoded.len() as u64,
        })
    }

    /// Decode the artifact at `input` into `output`.
    ///
    /// The header is validated before `output` is created.
    pub fn decode_file(&self, input: &Path, output: &Path) -> Result<CodingReport> {
        let data = fs::read(input)?;
        let decoded = self.decompress(&data)?;
        fs::write(output, &decoded)?;
        Ok(CodingReport {
            input_bytes: data.len() as u64,
            output_bytes: decoded.len() as u64,
        })
    }

    fn check_round_trip(&self, input: &[u8], encoded: &[u8]) -> Result<()> {
        let decoded = self.decompress(encoded)?;
        if decoded != input {
            let at = decoded
                .iter()
                .zip(input)
                .position(|(a, b)| a != b)
                .unwrap_or(decoded.len().min(input.len()));
            return Err(CompressionError::DecompressionFailed(format!(
                "verification mismatch at byte {} of {}",
                at,
                input.len()
            )));
        }
        Ok(())
    }
}

impl ByteCompressor for RangeCompressor {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let model = FrequencyTable::build(input)?;
        tracing::debug!(
            input_bytes = input.len(),
            distinct = model.distinct_symbols(),
            rescaled = model.is_rescaled(),
            "encoding"
        );

        let mut out = Vec::with_capacity(self.estimate_size(&model));
        Header::from_model(&model).write_to(&mut out);

        if model.is_empty() {
            return Ok(out);
        }

        let mut encoder = RangeEncoder::new(&model, out);
        encoder.encode_all(input);
        let body_bits = encoder.bits_written();
        let out = encoder.finish();

        tracing::debug!(
            output_bytes = out.len(),
            body_bits,
            tail_bits = (out.len() - HEADER_LEN) as u64 * 8 - body_bits,
            distinct = model.distinct_symbols(),
            "encoded"
        );

        if self.verify {
            self.check_round_trip(input, &out)?;
        }
        Ok(out)
    }

    fn decompress(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        let (header, bitstream) = Header::parse(encoded)?;
        let model = header.model();
        tracing::debug!(
            symbols = header.symbol_count,
            distinct = model.distinct_symbols(),
            bitstream_bytes = bitstream.len(),
            "decoding"
        );

        if header.symbol_count == 0 {
            if !bitstream.is_empty() {
                tracing::warn!(
                    trailing = bitstream.len(),
                    "empty stream carries trailing bytes"
                );
            }
            return Ok(Vec::new());
        }

        let mut out = Vec::with_capacity(header.symbol_count.min(MAX_PREALLOC) as usize);
        let mut decoder = RangeDecoder::new(&model, bitstream);
        decoder.decode_into(header.symbol_count, &mut out);

        let unread = decoder.source().remaining_bytes();
        if unread > TRAILING_WARN_BYTES {
            tracing::warn!(unread, "decode finished with unread bitstream bytes");
        }
        tracing::debug!(
            output_bytes = out.len(),
            distinct = model.distinct_symbols(),
            padding_bits = decoder.source().bits_past_end(),
            "decoded"
        );

        Ok(out)
    }

    fn estimate_size(&self, model: &FrequencyTable) -> usize {
        if model.is_empty() {
            return HEADER_LEN;
        }
        let payload = (model.entropy_bits() / 8.0).ceil() as usize;
        HEADER_LEN + payload + 2
    }
}
