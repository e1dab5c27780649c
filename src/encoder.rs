//! Range encoder with carry-less pending-bit renormalization.

use crate::bitio::BitSink;
use crate::interval::{Interval, Renorm, QUARTER};
use crate::model::FrequencyTable;

/// Encodes symbols against a fixed [`FrequencyTable`].
///
/// Each encoder owns its interval, pending-bit counter and output buffer,
/// so independent sessions never share state.
#[derive(Debug)]
pub struct RangeEncoder<'m> {
    model: &'m FrequencyTable,
    interval: Interval,
    /// Bits whose value waits on the next decided half.
    follow: u64,
    sink: BitSink,
}

impl<'m> RangeEncoder<'m> {
    /// Start a session writing after the bytes already in `out`.
    ///
    /// `model` must not be empty.
    pub fn new(model: &'m FrequencyTable, out: Vec<u8>) -> Self {
        debug_assert!(!model.is_empty());
        Self {
            model,
            interval: Interval::new(),
            follow: 0,
            sink: BitSink::with_buffer(out),
        }
    }

    /// Current coding interval.
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Bits emitted so far, not counting pending bits or the tail.
    pub fn bits_written(&self) -> u64 {
        self.sink.bits_written()
    }

    /// Encode one symbol. The symbol must occur in the model.
    pub fn encode_symbol(&mut self, symbol: u8) {
        self.interval.narrow(self.model, symbol);

        loop {
            let step = self.interval.classify();
            match step {
                Renorm::LowerHalf => self.emit(false),
                Renorm::UpperHalf => self.emit(true),
                Renorm::Middle => self.follow += 1,
                Renorm::Settled => break,
            }
            self.interval.rescale(step);
        }
    }

    /// Encode every byte of `input`.
    pub fn encode_all(&mut self, input: &[u8]) {
        for &symbol in input {
            self.encode_symbol(symbol);
        }
    }

    /// Emit the disambiguating tail and return the padded output.
    pub fn finish(mut self) -> Vec<u8> {
        self.follow += 1;
        let bit = self.interval.low() >= QUARTER;
        self.emit(bit);
        self.sink.flush()
    }

    /// Write a decided bit followed by the pending bits, which take the
    /// opposite value.
    #[inline]
    fn emit(&mut self, bit: bool) {
        self.sink.put_bit(bit);
        self.sink.put_followed(!bit, self.follow);
        self.follow = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(input: &[u8]) -> Vec<u8> {
        let model = FrequencyTable::build(input).unwrap();
        let mut encoder = RangeEncoder::new(&model, Vec::new());
        encoder.encode_all(input);
        encoder.finish()
    }

    #[test]
    fn test_single_symbol_costs_no_bits() {
        let model = FrequencyTable::build(b"AAAA").unwrap();
        let mut encoder = RangeEncoder::new(&model, Vec::new());
        encoder.encode_all(b"AAAA");

        assert_eq!(*encoder.interval(), Interval::new());
        // Only the tail: 0 then one pending 1.
        assert_eq!(encoder.finish(), vec![0b0100_0000]);
    }

    #[test]
    fn test_two_symbol_bitstream() {
        // A -> 0, B -> 1, tail -> 01
        assert_eq!(encode(b"AB"), vec![0b0101_0000]);
        assert_eq!(encode(b"BA"), vec![0b1001_0000]);
    }

    #[test]
    fn test_bits_written_excludes_prefix() {
        let model = FrequencyTable::build(b"ABBA").unwrap();
        let mut encoder = RangeEncoder::new(&model, vec![0xEE; 5]);
        assert_eq!(encoder.bits_written(), 0);

        // Each symbol of a two-way split decides one bit.
        encoder.encode_all(b"ABBA");
        assert_eq!(encoder.bits_written(), 4);
        let out = encoder.finish();
        assert_eq!(out[..5], [0xEE; 5]);
        assert_eq!(out[5..], [0b0110_0100]);
    }

    #[test]
    fn test_output_follows_prefix() {
        let model = FrequencyTable::build(b"AB").unwrap();
        let mut encoder = RangeEncoder::new(&model, vec![1, 2, 3]);
        encoder.encode_all(b"AB");

        assert_eq!(encoder.finish(), vec![1, 2, 3, 0b0101_0000]);
    }

    #[test]
    fn test_skewed_input_is_compact() {
        let mut input = vec![b'x'; 4000];
        input.extend_from_slice(b"yz");
        let out = encode(&input);

        assert!(out.len() < 20, "got {} bytes", out.len());
    }

    #[test]
    fn test_interval_stays_valid() {
        let input: Vec<u8> = (0..3000u32).map(|i| (i * i % 251) as u8).collect();
        let model = FrequencyTable::build(&input).unwrap();
        let mut encoder = RangeEncoder::new(&model, Vec::new());

        for &symbol in &input {
            encoder.encode_symbol(symbol);
            let i = encoder.interval();
            assert!(i.low() <= i.high());
            assert_eq!(i.classify(), Renorm::Settled);
        }
    }
}
