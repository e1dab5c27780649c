//! MSB-first bit packing.

/// Packs bits into bytes, most significant bit first.
#[derive(Debug, Default)]
pub struct BitSink {
    out: Vec<u8>,
    /// Length of the prefix `out` started with.
    start: usize,
    acc: u8,
    filled: u8,
}

impl BitSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bits after the bytes already in `out` (e.g. a header).
    pub fn with_buffer(out: Vec<u8>) -> Self {
        Self {
            start: out.len(),
            out,
            acc: 0,
            filled: 0,
        }
    }

    /// Append one bit.
    #[inline]
    pub fn put_bit(&mut self, bit: bool) {
        self.acc = (self.acc << 1) | bit as u8;
        self.filled += 1;
        if self.filled == 8 {
            self.out.push(self.acc);
            self.acc = 0;
            self.filled = 0;
        }
    }

    /// Append `count` copies of `bit`.
    #[inline]
    pub fn put_followed(&mut self, bit: bool, count: u64) {
        for _ in 0..count {
            self.put_bit(bit);
        }
    }

    /// Number of bits written so far, excluding the prefix buffer.
    pub fn bits_written(&self) -> u64 {
        (self.out.len() - self.start) as u64 * 8 + self.filled as u64
    }

    /// Pad the partial byte with zero bits and return the output.
    ///
    /// Consumes the sink, so the padding byte is emitted exactly once.
    pub fn flush(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.out.push(self.acc << (8 - self.filled));
        }
        self.out
    }
}

/// Reads bits from a byte slice, most significant bit first.
///
/// Past the end of the slice every bit reads as 0, so a decoder can run
/// through the zero padding of the last byte and beyond without a
/// terminator.
#[derive(Debug)]
pub struct BitSource<'a> {
    data: &'a [u8],
    pos: usize,
    current: u8,
    left: u8,
    bits_past_end: u64,
}

impl<'a> BitSource<'a> {
    /// Start reading at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            current: 0,
            left: 0,
            bits_past_end: 0,
        }
    }

    /// Next bit, or `None` once the input is exhausted.
    #[inline]
    pub fn get_bit(&mut self) -> Option<bool> {
        if self.left == 0 {
            let &byte = self.data.get(self.pos)?;
            self.pos += 1;
            self.current = byte;
            self.left = 8;
        }
        self.left -= 1;
        Some((self.current >> self.left) & 1 == 1)
    }

    /// Next bit, reading 0 past the end of the input.
    #[inline]
    pub fn next_bit(&mut self) -> bool {
        match self.get_bit() {
            Some(bit) => bit,
            None => {
                self.bits_past_end += 1;
                false
            }
        }
    }

    /// Read `n` bits (at most 32) as a big-endian integer.
    pub fn next_bits(&mut self, n: u32) -> u32 {
        debug_assert!(n <= 32);
        (0..n).fold(0u32, |v, _| (v << 1) | self.next_bit() as u32)
    }

    /// Whole bytes that have not been touched yet.
    pub fn remaining_bytes(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Zero bits synthesized after the input ran out.
    pub fn bits_past_end(&self) -> u64 {
        self.bits_past_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_packing() {
        let mut sink = BitSink::new();
        for bit in [true, false, true, true, false, false, false, true] {
            sink.put_bit(bit);
        }
        assert_eq!(sink.flush(), vec![0b1011_0001]);
    }

    #[test]
    fn test_flush_pads_with_zeros() {
        let mut sink = BitSink::new();
        sink.put_bit(true);
        sink.put_bit(true);
        sink.put_bit(false);
        assert_eq!(sink.flush(), vec![0b1100_0000]);
    }

    #[test]
    fn test_flush_without_pending_bits() {
        let mut sink = BitSink::new();
        sink.put_followed(true, 8);
        assert_eq!(sink.flush(), vec![0xFF]);

        assert!(BitSink::new().flush().is_empty());
    }

    #[test]
    fn test_put_followed_crosses_bytes() {
        let mut sink = BitSink::new();
        sink.put_bit(false);
        sink.put_followed(true, 10);
        assert_eq!(sink.bits_written(), 11);
        assert_eq!(sink.flush(), vec![0b0111_1111, 0b1110_0000]);
    }

    #[test]
    fn test_with_buffer_keeps_prefix() {
        let mut sink = BitSink::with_buffer(vec![0xAA, 0xBB]);
        sink.put_bit(true);
        assert_eq!(sink.bits_written(), 1);
        assert_eq!(sink.flush(), vec![0xAA, 0xBB, 0x80]);
    }

    #[test]
    fn test_source_reads_msb_first() {
        let data = [0b1010_0000u8, 0xFF];
        let mut source = BitSource::new(&data);

        assert_eq!(source.get_bit(), Some(true));
        assert_eq!(source.get_bit(), Some(false));
        assert_eq!(source.get_bit(), Some(true));
        assert_eq!(source.remaining_bytes(), 1);
        assert_eq!(source.next_bits(5), 0);
        assert_eq!(source.next_bits(8), 0xFF);
        assert_eq!(source.get_bit(), None);
    }

    #[test]
    fn test_source_reads_zero_past_end() {
        let mut source = BitSource::new(&[0x80]);

        assert_eq!(source.next_bits(16), 0x8000);
        assert_eq!(source.bits_past_end(), 8);
        assert!(!source.next_bit());
        assert_eq!(source.bits_past_end(), 9);
    }
}
