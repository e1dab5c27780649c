//! The 16-bit coding interval shared by encoder and decoder.
//!
//! `low` and `high` are held in `u32` registers but always masked back to 16
//! bits; products are formed in `u64`. Both coder halves drive the interval
//! through [`Interval::narrow`] and the same ordered renormalization check,
//! which is what keeps them in lockstep.

use crate::model::FrequencyTable;

/// Largest value of the 16-bit interval.
pub const MAX_RANGE: u32 = 0xFFFF;
/// Midpoint of the interval.
pub const HALF: u32 = (MAX_RANGE + 1) / 2;
/// First quarter point.
pub const QUARTER: u32 = HALF / 2;
/// Third quarter point.
pub const THREE_QUARTERS: u32 = QUARTER * 3;

/// Outcome of one renormalization check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Renorm {
    /// Interval lies entirely below `HALF`: the next bit is 0.
    LowerHalf,
    /// Interval lies entirely at or above `HALF`: the next bit is 1.
    UpperHalf,
    /// Interval straddles `HALF` inside the middle quarters: the next bit
    /// is not decided yet.
    Middle,
    /// None of the above; the interval is wide enough.
    Settled,
}

impl Renorm {
    /// Amount subtracted from the registers before they are doubled.
    #[inline]
    pub fn offset(self) -> u32 {
        match self {
            Renorm::LowerHalf | Renorm::Settled => 0,
            Renorm::UpperHalf => HALF,
            Renorm::Middle => QUARTER,
        }
    }
}

/// Current coding interval `[low, high]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    low: u32,
    high: u32,
}

impl Default for Interval {
    fn default() -> Self {
        Self::new()
    }
}

impl Interval {
    /// The full interval `[0, 0xFFFF]`.
    pub fn new() -> Self {
        Self {
            low: 0,
            high: MAX_RANGE,
        }
    }

    /// Lower bound.
    #[inline]
    pub fn low(&self) -> u32 {
        self.low
    }

    /// Upper bound (inclusive).
    #[inline]
    pub fn high(&self) -> u32 {
        self.high
    }

    /// Width of the interval, `high - low + 1`, at most `0x10000`.
    #[inline]
    pub fn range(&self) -> u32 {
        self.high - self.low + 1
    }

    /// Narrow to the sub-interval `model` assigns to `symbol`.
    ///
    /// The symbol must have a non-zero frequency.
    #[inline]
    pub fn narrow(&mut self, model: &FrequencyTable, symbol: u8) {
        let range = self.range() as u64;
        let total = model.total() as u64;
        let cum_low = model.cumulative_low(symbol) as u64;
        let cum_high = model.cumulative_high(symbol) as u64;
        debug_assert!(cum_high > cum_low, "symbol {symbol} has zero frequency");

        let new_low = self.low + (range * cum_low / total) as u32;
        let new_high = self.low + (range * cum_high / total) as u32 - 1;

        self.low = new_low;
        self.high = new_high;
    }

    /// Decide the next renormalization step.
    ///
    /// The checks run in a fixed order and exactly one outcome is chosen.
    #[inline]
    pub fn classify(&self) -> Renorm {
        if self.high < HALF {
            Renorm::LowerHalf
        } else if self.low >= HALF {
            Renorm::UpperHalf
        } else if self.low >= QUARTER && self.high < THREE_QUARTERS {
            Renorm::Middle
        } else {
            Renorm::Settled
        }
    }

    /// Apply a fired step: subtract its offset, then double the interval.
    #[inline]
    pub fn rescale(&mut self, step: Renorm) {
        debug_assert_ne!(step, Renorm::Settled);

        let offset = step.offset();
        self.low = ((self.low - offset) << 1) & MAX_RANGE;
        self.high = (((self.high - offset) << 1) | 1) & MAX_RANGE;

        debug_assert!(self.low <= self.high);
    }
}
