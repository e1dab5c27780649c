//! Range decoder, the mirror image of [`RangeEncoder`](crate::RangeEncoder).

use crate::bitio::BitSource;
use crate::interval::{Interval, Renorm, MAX_RANGE};
use crate::model::FrequencyTable;

/// Number of bits in the `value` register.
const VALUE_BITS: u32 = 16;

/// Decodes symbols against a fixed [`FrequencyTable`].
///
/// The decoder has no notion of end of message: the caller decides how many
/// symbols to pull, and bits past the end of the input read as 0.
#[derive(Debug)]
pub struct RangeDecoder<'m, 'a> {
    model: &'m FrequencyTable,
    interval: Interval,
    /// The 16 code bits currently in view.
    value: u32,
    source: BitSource<'a>,
}

impl<'m, 'a> RangeDecoder<'m, 'a> {
    /// Start a session over `bitstream`, priming `value` with its first
    /// 16 bits.
    ///
    /// `model` must not be empty.
    pub fn new(model: &'m FrequencyTable, bitstream: &'a [u8]) -> Self {
        debug_assert!(!model.is_empty());
        let mut source = BitSource::new(bitstream);
        let value = source.next_bits(VALUE_BITS);
        Self {
            model,
            interval: Interval::new(),
            value,
            source,
        }
    }

    /// Current coding interval.
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// The underlying bit source.
    pub fn source(&self) -> &BitSource<'a> {
        &self.source
    }

    /// Decode the next symbol.
    pub fn decode_symbol(&mut self) -> u8 {
        let symbol = self.model.find_symbol(self.scaled_value());
        self.interval.narrow(self.model, symbol);

        loop {
            let step = self.interval.classify();
            if step == Renorm::Settled {
                break;
            }
            self.interval.rescale(step);

            let bit = self.source.next_bit() as u32;
            self.value = ((self.value.wrapping_sub(step.offset()) << 1) | bit) & MAX_RANGE;
        }

        symbol
    }

    /// Decode exactly `count` symbols into `out`.
    pub fn decode_into(&mut self, count: u64, out: &mut Vec<u8>) {
        for _ in 0..count {
            out.push(self.decode_symbol());
        }
    }

    /// Map `value` onto the model's cumulative scale.
    ///
    /// A well-formed stream keeps `value` inside the interval. Corrupt input
    /// may not, so the result is clamped to `[0, total)` instead of trusting
    /// it.
    #[inline]
    fn scaled_value(&self) -> u32 {
        let total = self.model.total() as u64;
        let low = self.interval.low();
        if self.value < low {
            return 0;
        }
        let offset = (self.value - low) as u64 + 1;
        let scaled = (offset * total - 1) / self.interval.range() as u64;
        scaled.min(total - 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::RangeEncoder;

    fn round_trip(input: &[u8]) -> Vec<u8> {
        let model = FrequencyTable::build(input).unwrap();
        let mut encoder = RangeEncoder::new(&model, Vec::new());
        encoder.encode_all(input);
        let bits = encoder.finish();

        let mut decoder = RangeDecoder::new(&model, &bits);
        let mut out = Vec::new();
        decoder.decode_into(model.symbol_count(), &mut out);
        out
    }

    #[test]
    fn test_round_trip_basic() {
        for input in [
            &b"AAAA"[..],
            &b"AB"[..],
            &b"BA"[..],
            &b"A"[..],
            &b"abracadabra"[..],
            &b"the quick brown fox jumps over the lazy dog"[..],
        ] {
            assert_eq!(round_trip(input), input);
        }
    }

    #[test]
    fn test_short_stream_zero_fills_value() {
        let model = FrequencyTable::build(b"AB").unwrap();
        let decoder = RangeDecoder::new(&model, &[0b0101_0000]);

        assert_eq!(decoder.value, 0x5000);
        assert_eq!(decoder.source().bits_past_end(), 8);
    }

    #[test]
    fn test_all_byte_values() {
        let input: Vec<u8> = (0..=255u8).cycle().take(256 * 5).collect();
        assert_eq!(round_trip(&input), input);
    }

    #[test]
    fn test_rescaled_model_round_trip() {
        let mut input = vec![0u8; 60_000];
        input.push(1);
        input.extend_from_slice(&[2, 3, 2]);
        input.extend(std::iter::repeat(9u8).take(5_000));

        let model = FrequencyTable::build(&input).unwrap();
        assert!(model.is_rescaled());
        assert_eq!(round_trip(&input), input);
    }

    #[test]
    fn test_garbage_bitstream_does_not_panic() {
        let model = FrequencyTable::build(b"hello world").unwrap();
        let garbage = [0xFFu8, 0x00, 0x13, 0x37, 0xAB];
        let mut decoder = RangeDecoder::new(&model, &garbage);
        let mut out = Vec::new();
        decoder.decode_into(64, &mut out);

        assert_eq!(out.len(), 64);
        assert!(out.iter().all(|s| b"helo wrd".contains(s)));
    }

    #[test]
    fn test_interval_stays_valid() {
        let input: Vec<u8> = (0..2000u32).map(|i| (i % 7 * 31 + i % 3) as u8).collect();
        let model = FrequencyTable::build(&input).unwrap();
        let mut encoder = RangeEncoder::new(&model, Vec::new());
        encoder.encode_all(&input);
        let bits = encoder.finish();

        let mut decoder = RangeDecoder::new(&model, &bits);
        for &expected in &input {
            assert_eq!(decoder.decode_symbol(), expected);
            let i = decoder.interval();
            assert!(i.low() <= i.high());
        }
    }
}
