//! Fields wider than 64 bits
//!
//! Elements are `Vec<u64>` with exactly `nwords = degree / 64 + 1` words, low
//! word first. That is one bit more than a reduced element needs, so the
//! generator itself (bit `degree` set) fits the same layout and a one-bit
//! shift never loses the bit it is about to cancel.
//!
//! The byte-shift table stores only `b * x^degree mod p`; the shifted-out byte
//! is cancelled by masking the top word instead of by a second XOR.

use super::ops::{reduced_byte_product, FieldOps};

const WORD_BITS: u32 = u64::BITS;

/// GF(2^w) over an array of 64-bit words.
#[derive(Debug, Clone)]
pub struct MultiWord {
    degree: u32,
    nwords: usize,
    generator: Vec<u64>,
    /// Word index and mask of bit `degree - 1`.
    high_bit: (usize, u64),
    last_word_mask: u64,
    byte_table: Vec<Vec<u64>>,
}

impl MultiWord {
    pub(crate) fn new(degree: u32, generator_words: &[u64]) -> Self {
        let nwords = words_for_degree(degree);
        let mut generator = generator_words.to_vec();
        generator.resize(nwords, 0);

        let mut ops = Self {
            degree,
            nwords,
            generator,
            high_bit: bit_position(degree - 1),
            last_word_mask: (1u64 << (degree % WORD_BITS)) - 1,
            byte_table: Vec::new(),
        };
        ops.byte_table = (0..=u8::MAX)
            .map(|byte| reduced_byte_product(&ops, byte))
            .collect();
        ops
    }

    /// Words per element.
    pub fn word_count(&self) -> usize {
        self.nwords
    }

    /// Generator words, low first.
    pub fn generator(&self) -> &[u64] {
        &self.generator
    }

    /// Mask applied to the top word to clear bits at or above `degree`.
    pub fn last_word_mask(&self) -> u64 {
        self.last_word_mask
    }

    /// The 256-entry byte-shift table (reduced products only).
    pub fn byte_table(&self) -> &[Vec<u64>] {
        &self.byte_table
    }

    /// Copy `a` into a vector of exactly `nwords` words.
    fn widen(&self, a: &[u64]) -> Vec<u64> {
        let mut out = a.to_vec();
        out.resize(self.nwords, 0);
        out
    }

    fn truncate(&self, mut a: Vec<u64>) -> Vec<u64> {
        a.resize(self.nwords, 0);
        if let Some(top) = a.last_mut() {
            *top &= self.last_word_mask;
        }
        a
    }

    /// Bits `start..start + 8` of `a` as a byte.
    fn byte_at(&self, a: &[u64], start: u32) -> u8 {
        let (word, offset) = ((start / WORD_BITS) as usize, start % WORD_BITS);
        let low = a.get(word).copied().unwrap_or(0) >> offset;
        let high = if offset > WORD_BITS - 8 {
            a.get(word + 1).copied().unwrap_or(0) << (WORD_BITS - offset)
        } else {
            0
        };
        (low | high) as u8
    }
}

impl FieldOps for MultiWord {
    type Elem = Vec<u64>;

    fn field_degree(&self) -> u32 {
        self.degree
    }

    fn zero(&self) -> Vec<u64> {
        vec![0; self.nwords]
    }

    fn one(&self) -> Vec<u64> {
        let mut one = self.zero();
        one[0] = 1;
        one
    }

    fn is_zero(&self, a: &Vec<u64>) -> bool {
        a.iter().all(|&word| word == 0)
    }

    fn from_byte(&self, byte: u8) -> Vec<u64> {
        let mut out = self.zero();
        out[0] = byte as u64;
        out
    }

    fn add(&self, a: &Vec<u64>, b: &Vec<u64>) -> Vec<u64> {
        let mut out = self.widen(a);
        for (word, other) in out.iter_mut().zip(b.iter()) {
            *word ^= other;
        }
        out
    }

    fn or(&self, a: &Vec<u64>, b: &Vec<u64>) -> Vec<u64> {
        let mut out = self.widen(a);
        for (word, other) in out.iter_mut().zip(b.iter()) {
            *word |= other;
        }
        out
    }

    fn degree(&self, a: &Vec<u64>) -> u32 {
        words_degree(a)
    }

    fn reduce(&self, a: &Vec<u64>) -> Vec<u64> {
        let remainder = reduce_words(a, &self.generator, self.degree);
        self.truncate(remainder)
    }

    fn shift_left(&self, a: &Vec<u64>, s: u32) -> Vec<u64> {
        self.truncate(shl_words(a, s, self.nwords))
    }

    fn shift_right(&self, a: &Vec<u64>, s: u32) -> Vec<u64> {
        shr_words(&self.widen(a), s)
    }

    fn shift_one_bit_reduced(&self, a: &Vec<u64>) -> Vec<u64> {
        let (word, mask) = self.high_bit;
        let high = a.get(word).copied().unwrap_or(0) & mask != 0;

        let mut out = shl_words(a, 1, self.nwords);
        if high {
            for (word, generator) in out.iter_mut().zip(self.generator.iter()) {
                *word ^= generator;
            }
        }
        self.truncate(out)
    }

    fn shift_left_reduced(&self, a: &Vec<u64>, s: u32) -> Vec<u64> {
        let mut a = self.widen(a);
        let mut s = s;

        // degree > 64 here, so the top byte is always addressable
        while s >= 8 {
            let high = self.byte_at(&a, self.degree - 8);
            a = self.truncate(shl_words(&a, 8, self.nwords));
            for (word, entry) in a.iter_mut().zip(self.byte_table[high as usize].iter()) {
                *word ^= entry;
            }
            s -= 8;
        }
        while s > 0 {
            a = self.shift_one_bit_reduced(&a);
            s -= 1;
        }
        a
    }

    fn shift_in_byte_reduced(&self, a: &Vec<u64>, carry_in: &Vec<u64>, byte: u8) -> Vec<u64> {
        let mut out = self.shift_left_reduced(&self.add(a, carry_in), 8);
        out[0] ^= byte as u64;
        out
    }

    fn multiply_reduced(&self, a: &Vec<u64>, b: &Vec<u64>) -> Vec<u64> {
        let mut a = self.widen(a);
        let mut b = self.widen(b);
        let mut result = self.zero();

        while !self.is_zero(&a) && !self.is_zero(&b) {
            if b[0] & 1 != 0 {
                for (word, addend) in result.iter_mut().zip(a.iter()) {
                    *word ^= addend;
                }
            }
            b = shr_words(&b, 1);
            a = self.shift_one_bit_reduced(&a);
        }
        result
    }
}

/// Words needed to hold bits `0..=degree`.
pub(crate) fn words_for_degree(degree: u32) -> usize {
    (degree / WORD_BITS) as usize + 1
}

fn bit_position(bit: u32) -> (usize, u64) {
    ((bit / WORD_BITS) as usize, 1u64 << (bit % WORD_BITS))
}

/// Highest set bit across `words`, 0 for an all-zero slice.
pub(crate) fn words_degree(words: &[u64]) -> u32 {
    words
        .iter()
        .rposition(|&word| word != 0)
        .map(|idx| idx as u32 * WORD_BITS + (WORD_BITS - 1 - words[idx].leading_zeros()))
        .unwrap_or(0)
}

/// Shift left by `s` bits into a vector of `len` words, dropping overflow.
pub(crate) fn shl_words(a: &[u64], s: u32, len: usize) -> Vec<u64> {
    let mut out = vec![0u64; len];
    let word_shift = (s / WORD_BITS) as usize;
    let bit_shift = s % WORD_BITS;

    for (idx, &word) in a.iter().enumerate() {
        let target = idx + word_shift;
        if target >= len {
            break;
        }
        out[target] |= word << bit_shift;
        if bit_shift != 0 && target + 1 < len {
            out[target + 1] |= word >> (WORD_BITS - bit_shift);
        }
    }
    out
}

/// Shift right by `s` bits, keeping the input length.
pub(crate) fn shr_words(a: &[u64], s: u32) -> Vec<u64> {
    let mut out = vec![0u64; a.len()];
    let word_shift = (s / WORD_BITS) as usize;
    let bit_shift = s % WORD_BITS;

    for idx in word_shift..a.len() {
        let target = idx - word_shift;
        out[target] |= a[idx] >> bit_shift;
        if bit_shift != 0 && target > 0 {
            out[target - 1] |= a[idx] << (WORD_BITS - bit_shift);
        }
    }
    out
}

/// Long division of an arbitrary-length word string by `generator`.
///
/// Returns the remainder with the input's length (at least the generator's).
pub(crate) fn reduce_words(a: &[u64], generator: &[u64], degree: u32) -> Vec<u64> {
    let len = a.len().max(generator.len());
    let mut remainder = a.to_vec();
    remainder.resize(len, 0);

    loop {
        let top = words_degree(&remainder);
        if top < degree {
            break;
        }
        let aligned = shl_words(generator, top - degree, len);
        for (word, g) in remainder.iter_mut().zip(aligned.iter()) {
            *word ^= g;
        }
    }
    remainder
}
