//! Generator polynomial description
//!
//! Turns an exponent set such as `{8, 4, 3, 2, 0}` into packed words and
//! decides which element layout the field needs.

use bitvec::prelude::*;

use crate::FieldError;

/// Largest supported generator degree.
///
/// Construction fills a 256-entry table with `degree` shift steps per entry,
/// each costing O(degree / 64), so this keeps construction well under a second.
pub const MAX_DEGREE: u32 = 4096;

/// Element layout chosen from the generator degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordClass {
    /// Degree <= 32, one native word.
    Single,
    /// Degree 33..=64, a pair of 64-bit words.
    Pair,
    /// Degree > 64, an array of 64-bit words.
    Multi,
}

impl WordClass {
    /// Layout for a generator of the given degree.
    pub fn for_degree(degree: u32) -> Self {
        match degree {
            0..=32 => WordClass::Single,
            33..=64 => WordClass::Pair,
            _ => WordClass::Multi,
        }
    }
}

/// Generator polynomial as packed bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    degree: u32,
    words: Vec<u64>,
}

impl Generator {
    /// Parse an exponent set. Duplicates are harmless, order is irrelevant.
    pub fn from_exponents<I>(exponents: I) -> Result<Self, FieldError>
    where
        I: IntoIterator<Item = u32>,
    {
        let exponents: Vec<u32> = exponents.into_iter().collect();
        let degree = exponents
            .iter()
            .copied()
            .max()
            .ok_or_else(|| FieldError::Configuration("generator exponent set is empty".into()))?;

        if degree == 0 {
            return Err(FieldError::Configuration(
                "generator degree must be at least 1".into(),
            ));
        }
        if degree > MAX_DEGREE {
            return Err(FieldError::Configuration(format!(
                "generator degree {degree} exceeds the supported maximum {MAX_DEGREE}"
            )));
        }

        let mut bits: BitVec<u64, Lsb0> = bitvec![u64, Lsb0; 0; degree as usize + 1];
        for exponent in exponents {
            bits.set(exponent as usize, true);
        }

        Ok(Self {
            degree,
            words: bits.into_vec(),
        })
    }

    /// Highest exponent.
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Packed coefficients, low word first.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Layout required for this generator.
    pub fn class(&self) -> WordClass {
        WordClass::for_degree(self.degree)
    }

    /// Exponents of the nonzero terms, highest first.
    pub fn exponents(&self) -> Vec<u32> {
        self.words
            .view_bits::<Lsb0>()
            .iter_ones()
            .rev()
            .map(|idx| idx as u32)
            .collect()
    }
}
