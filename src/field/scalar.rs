//! Fields whose elements fit in one native integer
//!
//! `SingleWord` backs degrees up to 32 with a `u64`, `DoubleWord` backs
//! degrees 33..=64 with a `u128` (two 64-bit words, low word in the low half).
//! Both leave at least 8 spare bits above the field degree, which the
//! byte-shift table relies on: a reduced element shifted left by a byte still
//! fits before the table entry cancels the overflow.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor};

use super::ops::{byte_shift_entry, FieldOps};

/// Native integer usable as a scalar element layout.
pub trait Word:
    Copy
    + Eq
    + Ord
    + Debug
    + Hash
    + Send
    + Sync
    + 'static
    + BitXor<Output = Self>
    + BitOr<Output = Self>
    + BitAnd<Output = Self>
{
    /// Width in bits.
    const BITS: u32;
    /// All bits clear.
    const ZERO: Self;
    /// Lowest bit set.
    const ONE: Self;
    /// All bits set.
    const ALL: Self;

    /// Left shift; shifting by the full width or more yields zero.
    fn shl(self, s: u32) -> Self;
    /// Right shift; shifting by the full width or more yields zero.
    fn shr(self, s: u32) -> Self;
    /// Number of leading zero bits.
    fn leading_zeros(self) -> u32;
    /// Widen a byte.
    fn from_u8(byte: u8) -> Self;
    /// Truncate to the lowest byte.
    fn low_u8(self) -> u8;
    /// Assemble from 64-bit words, low word first. Extra words are ignored.
    fn from_words(words: &[u64]) -> Self;
    /// Split into 64-bit words, low word first.
    fn to_words(self) -> Vec<u64>;
}

impl Word for u64 {
    const BITS: u32 = u64::BITS;
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const ALL: Self = u64::MAX;

    #[inline]
    fn shl(self, s: u32) -> Self {
        self.checked_shl(s).unwrap_or(0)
    }

    #[inline]
    fn shr(self, s: u32) -> Self {
        self.checked_shr(s).unwrap_or(0)
    }

    #[inline]
    fn leading_zeros(self) -> u32 {
        u64::leading_zeros(self)
    }

    #[inline]
    fn from_u8(byte: u8) -> Self {
        byte as u64
    }

    #[inline]
    fn low_u8(self) -> u8 {
        self as u8
    }

    fn from_words(words: &[u64]) -> Self {
        words.first().copied().unwrap_or(0)
    }

    fn to_words(self) -> Vec<u64> {
        vec![self]
    }
}

impl Word for u128 {
    const BITS: u32 = u128::BITS;
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const ALL: Self = u128::MAX;

    #[inline]
    fn shl(self, s: u32) -> Self {
        self.checked_shl(s).unwrap_or(0)
    }

    #[inline]
    fn shr(self, s: u32) -> Self {
        self.checked_shr(s).unwrap_or(0)
    }

    #[inline]
    fn leading_zeros(self) -> u32 {
        u128::leading_zeros(self)
    }

    #[inline]
    fn from_u8(byte: u8) -> Self {
        byte as u128
    }

    #[inline]
    fn low_u8(self) -> u8 {
        self as u8
    }

    fn from_words(words: &[u64]) -> Self {
        let low = words.first().copied().unwrap_or(0) as u128;
        let high = words.get(1).copied().unwrap_or(0) as u128;
        low | (high << 64)
    }

    fn to_words(self) -> Vec<u64> {
        vec![self as u64, (self >> 64) as u64]
    }
}

/// GF(2^w) over a single native integer.
#[derive(Debug, Clone)]
pub struct ScalarWord<W: Word> {
    degree: u32,
    generator: W,
    high_bit: W,
    max_value: W,
    byte_table: Vec<W>,
}

/// Fields of degree 1..=32.
pub type SingleWord = ScalarWord<u64>;

/// Fields of degree 33..=64.
pub type DoubleWord = ScalarWord<u128>;

impl<W: Word> ScalarWord<W> {
    /// Build the backend and its byte-shift table.
    ///
    /// `degree` must leave 8 spare bits in `W`; the caller picks the layout.
    pub(crate) fn new(degree: u32, generator_words: &[u64]) -> Self {
        debug_assert!(degree >= 1 && degree + 8 < W::BITS);

        let mut ops = Self {
            degree,
            generator: W::from_words(generator_words),
            high_bit: W::ONE.shl(degree - 1),
            max_value: W::ALL.shr(W::BITS - degree),
            byte_table: Vec::new(),
        };
        ops.byte_table = (0..=u8::MAX).map(|byte| byte_shift_entry(&ops, byte)).collect();
        ops
    }

    /// The generator polynomial including its leading bit.
    pub fn generator(&self) -> W {
        self.generator
    }

    /// Mask of bit `degree - 1`.
    pub fn high_bit(&self) -> W {
        self.high_bit
    }

    /// Largest reduced element, 2^degree - 1.
    pub fn max_value(&self) -> W {
        self.max_value
    }

    /// The 256-entry byte-shift table.
    pub fn byte_table(&self) -> &[W] {
        &self.byte_table
    }
}

impl<W: Word> FieldOps for ScalarWord<W> {
    type Elem = W;

    fn field_degree(&self) -> u32 {
        self.degree
    }

    fn zero(&self) -> W {
        W::ZERO
    }

    fn one(&self) -> W {
        W::ONE
    }

    fn is_zero(&self, a: &W) -> bool {
        *a == W::ZERO
    }

    fn from_byte(&self, byte: u8) -> W {
        W::from_u8(byte)
    }

    #[inline]
    fn add(&self, a: &W, b: &W) -> W {
        *a ^ *b
    }

    #[inline]
    fn or(&self, a: &W, b: &W) -> W {
        *a | *b
    }

    #[inline]
    fn degree(&self, a: &W) -> u32 {
        if *a == W::ZERO {
            0
        } else {
            W::BITS - 1 - a.leading_zeros()
        }
    }

    fn reduce(&self, a: &W) -> W {
        let mut a = *a;
        // Cancel the current top bit with an aligned copy of the generator.
        while a > self.max_value {
            let shift = self.degree(&a) - self.degree;
            a = a ^ self.generator.shl(shift);
        }
        a
    }

    fn shift_left(&self, a: &W, s: u32) -> W {
        a.shl(s)
    }

    fn shift_right(&self, a: &W, s: u32) -> W {
        a.shr(s)
    }

    #[inline]
    fn shift_one_bit_reduced(&self, a: &W) -> W {
        let high = *a & self.high_bit;
        let shifted = a.shl(1);
        if high != W::ZERO {
            shifted ^ self.generator
        } else {
            shifted
        }
    }

    fn shift_left_reduced(&self, a: &W, s: u32) -> W {
        let mut a = *a;
        let mut s = s;

        if self.degree >= 8 {
            let offset = self.degree - 8;
            while s >= 8 {
                let high = a.shr(offset).low_u8();
                a = a.shl(8) ^ self.byte_table[high as usize];
                s -= 8;
            }
        }
        while s > 0 {
            a = self.shift_one_bit_reduced(&a);
            s -= 1;
        }
        a
    }

    fn shift_in_byte_reduced(&self, a: &W, carry_in: &W, byte: u8) -> W {
        let shifted = self.shift_left_reduced(&(*a ^ *carry_in), 8);
        let a = shifted ^ W::from_u8(byte);
        if self.degree < 8 {
            // a byte can be wider than the field
            self.reduce(&a)
        } else {
            a
        }
    }

    fn multiply_reduced(&self, a: &W, b: &W) -> W {
        let mut a = *a;
        let mut b = *b;
        let mut result = W::ZERO;

        while a != W::ZERO && b != W::ZERO {
            // b(x) has a constant term: add the current a(x).
            if b & W::ONE != W::ZERO {
                result = result ^ a;
            }
            // b = b / x, a = a * x mod p
            b = b.shr(1);
            a = self.shift_one_bit_reduced(&a);
        }
        result
    }
}
