//! GF(2^w) fields with width-specialised arithmetic
//!
//! A [`Field`] is built once from its generator exponents. The generator
//! degree selects one of three backends:
//! - [`SingleWord`]: degree <= 32, elements are `u64`
//! - [`DoubleWord`]: degree 33..=64, elements are `u128`
//! - [`MultiWord`]: degree > 64, elements are `Vec<u64>`
//!
//! The choice is fixed at construction; every operation afterwards goes
//! straight to the bound backend. Callers work with [`Element`], whose variant
//! must match the field's [`WordClass`].

mod generator;
mod multi;
mod ops;
mod scalar;

pub use generator::{Generator, WordClass, MAX_DEGREE};
pub use multi::MultiWord;
pub use ops::FieldOps;
pub use scalar::{DoubleWord, ScalarWord, SingleWord, Word};

use std::sync::OnceLock;

use tracing::debug;

use crate::log_table::LogTables;
use crate::primitives::primitive_exponents;
use crate::FieldError;

/// Field element in the layout of its field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    /// Element of a [`WordClass::Single`] field.
    Single(u64),
    /// Element of a [`WordClass::Pair`] field.
    Pair(u128),
    /// Element of a [`WordClass::Multi`] field, low word first.
    Multi(Vec<u64>),
}

impl Element {
    /// Layout of this element.
    pub fn class(&self) -> WordClass {
        match self {
            Element::Single(_) => WordClass::Single,
            Element::Pair(_) => WordClass::Pair,
            Element::Multi(_) => WordClass::Multi,
        }
    }

    /// 64-bit words, low word first.
    pub fn words(&self) -> Vec<u64> {
        match self {
            Element::Single(value) => value.to_words(),
            Element::Pair(value) => value.to_words(),
            Element::Multi(words) => words.clone(),
        }
    }

    /// The value as a `u64` if it fits.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Element::Single(value) => Some(*value),
            Element::Pair(value) => u64::try_from(*value).ok(),
            Element::Multi(words) => match words.split_first() {
                None => Some(0),
                Some((low, rest)) if rest.iter().all(|&w| w == 0) => Some(*low),
                Some(_) => None,
            },
        }
    }

    /// Whether every bit is clear.
    pub fn is_zero(&self) -> bool {
        match self {
            Element::Single(value) => *value == 0,
            Element::Pair(value) => *value == 0,
            Element::Multi(words) => words.iter().all(|&w| w == 0),
        }
    }
}

/// Backend bound at construction.
#[derive(Debug, Clone)]
enum Repr {
    Single(SingleWord),
    Pair(DoubleWord),
    Multi(MultiWord),
}

/// Apply a backend operation to one element and wrap the result.
macro_rules! map_unary {
    ($field:expr, $a:expr, |$ops:ident, $x:ident| $body:expr) => {
        match (&$field.repr, $a) {
            (Repr::Single($ops), Element::Single($x)) => Ok(Element::Single($body)),
            (Repr::Pair($ops), Element::Pair($x)) => Ok(Element::Pair($body)),
            (Repr::Multi($ops), Element::Multi($x)) => {
                $field.check_words($x)?;
                Ok(Element::Multi($body))
            }
            (_, other) => Err($field.mismatch(other)),
        }
    };
}

/// Apply a backend operation to two elements and wrap the result.
macro_rules! map_binary {
    ($field:expr, $a:expr, $b:expr, |$ops:ident, $x:ident, $y:ident| $body:expr) => {
        match (&$field.repr, $a, $b) {
            (Repr::Single($ops), Element::Single($x), Element::Single($y)) => {
                Ok(Element::Single($body))
            }
            (Repr::Pair($ops), Element::Pair($x), Element::Pair($y)) => Ok(Element::Pair($body)),
            (Repr::Multi($ops), Element::Multi($x), Element::Multi($y)) => {
                $field.check_words($x)?;
                $field.check_words($y)?;
                Ok(Element::Multi($body))
            }
            (_, a, b) => Err($field.mismatch(if a.class() == $field.word_class() { b } else { a })),
        }
    };
}

/// GF(2^degree) defined by a generator polynomial.
///
/// Immutable after construction apart from the log/exp tables, which are
/// published at most once. Safe to share across threads.
#[derive(Debug)]
pub struct Field {
    generator: Generator,
    repr: Repr,
    log_tables: OnceLock<LogTables>,
}

impl Field {
    /// Build a field from the exponents of its generator's nonzero terms.
    ///
    /// ```
    /// use gfpoly::{Element, Field};
    ///
    /// let field = Field::new([8, 4, 3, 1, 0]).unwrap();
    /// let product = field
    ///     .multiply_reduced(&Element::Single(0x53), &Element::Single(0xCA))
    ///     .unwrap();
    /// assert_eq!(product, Element::Single(1));
    /// ```
    pub fn new<I>(exponents: I) -> Result<Self, FieldError>
    where
        I: IntoIterator<Item = u32>,
    {
        let generator = Generator::from_exponents(exponents)?;
        let degree = generator.degree();
        let repr = match generator.class() {
            WordClass::Single => Repr::Single(SingleWord::new(degree, generator.words())),
            WordClass::Pair => Repr::Pair(DoubleWord::new(degree, generator.words())),
            WordClass::Multi => Repr::Multi(MultiWord::new(degree, generator.words())),
        };

        debug!(
            degree,
            class = ?generator.class(),
            generator = ?generator.exponents(),
            "field constructed"
        );

        Ok(Self {
            generator,
            repr,
            log_tables: OnceLock::new(),
        })
    }

    /// Field over the catalogued primitive polynomial of `degree`.
    pub fn primitive(degree: u32) -> Result<Self, FieldError> {
        let exponents = primitive_exponents(degree).ok_or_else(|| {
            FieldError::Configuration(format!(
                "no catalogued primitive polynomial of degree {degree}"
            ))
        })?;
        Self::new(exponents.iter().copied())
    }

    /// Degree of the generator; the field has 2^degree elements.
    pub fn field_degree(&self) -> u32 {
        self.generator.degree()
    }

    /// Element layout of this field.
    pub fn word_class(&self) -> WordClass {
        self.generator.class()
    }

    /// The generator polynomial.
    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Typed backend for degree <= 32 fields.
    pub fn as_single(&self) -> Option<&SingleWord> {
        match &self.repr {
            Repr::Single(ops) => Some(ops),
            _ => None,
        }
    }

    /// Typed backend for degree 33..=64 fields.
    pub fn as_pair(&self) -> Option<&DoubleWord> {
        match &self.repr {
            Repr::Pair(ops) => Some(ops),
            _ => None,
        }
    }

    /// Typed backend for degree > 64 fields.
    pub fn as_multi(&self) -> Option<&MultiWord> {
        match &self.repr {
            Repr::Multi(ops) => Some(ops),
            _ => None,
        }
    }

    /// Additive identity.
    pub fn zero(&self) -> Element {
        match &self.repr {
            Repr::Single(ops) => Element::Single(ops.zero()),
            Repr::Pair(ops) => Element::Pair(ops.zero()),
            Repr::Multi(ops) => Element::Multi(ops.zero()),
        }
    }

    /// Multiplicative identity.
    pub fn one(&self) -> Element {
        self.element(1)
    }

    /// 2^degree - 1.
    pub fn max_value(&self) -> Element {
        match &self.repr {
            Repr::Single(ops) => Element::Single(ops.max_value()),
            Repr::Pair(ops) => Element::Pair(ops.max_value()),
            Repr::Multi(ops) => {
                let mut words = vec![u64::MAX; ops.word_count()];
                if let Some(top) = words.last_mut() {
                    *top = ops.last_word_mask();
                }
                Element::Multi(words)
            }
        }
    }

    /// Embed a small value in this field's layout (not reduced).
    pub fn element(&self, value: u64) -> Element {
        self.element_from_words(&[value])
    }

    /// Embed words, low first, in this field's layout (not reduced).
    ///
    /// Single fields keep the low word, Pair fields the low two.
    pub fn element_from_words(&self, words: &[u64]) -> Element {
        match &self.repr {
            Repr::Single(_) => Element::Single(u64::from_words(words)),
            Repr::Pair(_) => Element::Pair(u128::from_words(words)),
            Repr::Multi(ops) => {
                let mut words = words.to_vec();
                words.resize(words.len().max(ops.word_count()), 0);
                Element::Multi(words)
            }
        }
    }

    /// Whether `a` is reduced, i.e. `a <= max_value`.
    pub fn is_reduced(&self, a: &Element) -> Result<bool, FieldError> {
        Ok(a.is_zero() || self.degree(a)? < self.field_degree())
    }

    /// Field addition (XOR).
    pub fn add(&self, a: &Element, b: &Element) -> Result<Element, FieldError> {
        map_binary!(self, a, b, |ops, x, y| ops.add(x, y))
    }

    /// Bitwise OR.
    pub fn or(&self, a: &Element, b: &Element) -> Result<Element, FieldError> {
        map_binary!(self, a, b, |ops, x, y| ops.or(x, y))
    }

    /// Position of the highest set bit; `degree(0) = degree(1) = 0`.
    pub fn degree(&self, a: &Element) -> Result<u32, FieldError> {
        match (&self.repr, a) {
            (Repr::Single(ops), Element::Single(x)) => Ok(ops.degree(x)),
            (Repr::Pair(ops), Element::Pair(x)) => Ok(ops.degree(x)),
            // Multi degree is meaningful for any word count.
            (Repr::Multi(ops), Element::Multi(x)) => Ok(ops.degree(x)),
            (_, other) => Err(self.mismatch(other)),
        }
    }

    /// Remainder of `a` modulo the generator.
    ///
    /// Multi elements may carry more words than the field uses; the result is
    /// always trimmed to the field's word count.
    pub fn reduce(&self, a: &Element) -> Result<Element, FieldError> {
        match (&self.repr, a) {
            (Repr::Single(ops), Element::Single(x)) => Ok(Element::Single(ops.reduce(x))),
            (Repr::Pair(ops), Element::Pair(x)) => Ok(Element::Pair(ops.reduce(x))),
            (Repr::Multi(ops), Element::Multi(x)) => Ok(Element::Multi(ops.reduce(x))),
            (_, other) => Err(self.mismatch(other)),
        }
    }

    /// `a * x mod p`. `a` must be reduced.
    pub fn shift_one_bit_reduced(&self, a: &Element) -> Result<Element, FieldError> {
        self.require_reduced(a)?;
        map_unary!(self, a, |ops, x| ops.shift_one_bit_reduced(x))
    }

    /// `a * x^s mod p`. `a` must be reduced.
    pub fn shift_left_reduced(&self, a: &Element, s: u32) -> Result<Element, FieldError> {
        self.require_reduced(a)?;
        map_unary!(self, a, |ops, x| ops.shift_left_reduced(x, s))
    }

    /// `((a + carry_in) * x^8 + byte) mod p`. Both elements must be reduced.
    pub fn shift_in_byte_reduced(
        &self,
        a: &Element,
        carry_in: &Element,
        byte: u8,
    ) -> Result<Element, FieldError> {
        self.require_reduced(a)?;
        self.require_reduced(carry_in)?;
        map_binary!(self, a, carry_in, |ops, x, c| ops.shift_in_byte_reduced(x, c, byte))
    }

    /// `a * b mod p`. Both operands must be reduced.
    pub fn multiply_reduced(&self, a: &Element, b: &Element) -> Result<Element, FieldError> {
        self.require_reduced(a)?;
        self.require_reduced(b)?;
        map_binary!(self, a, b, |ops, x, y| ops.multiply_reduced(x, y))
    }

    /// Remainder of a byte string read as one big-endian polynomial.
    ///
    /// Computed by direct long division, independent of the byte-shift table.
    pub fn reduce_bytes(&self, bytes: &[u8]) -> Element {
        let mut words = vec![0u64; bytes.len() / 8 + 1];
        for (idx, &byte) in bytes.iter().rev().enumerate() {
            words[idx / 8] |= (byte as u64) << (8 * (idx % 8));
        }
        let remainder = multi::reduce_words(&words, self.generator.words(), self.field_degree());
        let nwords = multi::words_for_degree(self.field_degree());
        self.element_from_words(&remainder[..nwords.min(remainder.len())])
    }

    /// Build and publish the log/exp tables.
    ///
    /// Succeeds immediately if tables are already published. On failure the
    /// field stays usable for every non-log operation.
    pub fn build_log_tables(&self) -> Result<(), FieldError> {
        if self.log_tables.get().is_some() {
            return Ok(());
        }
        let ops = match &self.repr {
            Repr::Single(ops) => ops,
            _ => {
                return Err(FieldError::TableTooLarge {
                    degree: self.field_degree(),
                    max_degree: crate::log_table::MAX_LOG_TABLE_DEGREE,
                })
            }
        };
        let tables = LogTables::build(ops)?;
        // A concurrent builder may have won; its tables are identical.
        let _ = self.log_tables.set(tables);
        Ok(())
    }

    /// Whether log/exp tables are published.
    pub fn has_log_tables(&self) -> bool {
        self.log_tables.get().is_some()
    }

    /// Published tables, if any.
    pub fn log_tables(&self) -> Option<&LogTables> {
        self.log_tables.get()
    }

    /// `a * b` via the log tables.
    pub fn multiply_via_log(&self, a: &Element, b: &Element) -> Result<Element, FieldError> {
        let tables = self.require_tables()?;
        let (a, b) = (self.table_index(a)?, self.table_index(b)?);
        Ok(Element::Single(tables.multiply(a, b) as u64))
    }

    /// `a / b` via the log tables.
    pub fn divide_via_log(&self, a: &Element, b: &Element) -> Result<Element, FieldError> {
        let tables = self.require_tables()?;
        let (a, b) = (self.table_index(a)?, self.table_index(b)?);
        Ok(Element::Single(tables.divide(a, b)? as u64))
    }

    /// Multiplicative inverse via the log tables.
    pub fn invert_via_log(&self, a: &Element) -> Result<Element, FieldError> {
        let tables = self.require_tables()?;
        let a = self.table_index(a)?;
        Ok(Element::Single(tables.invert(a)? as u64))
    }

    /// Discrete log of a nonzero element.
    pub fn log_lookup(&self, a: &Element) -> Result<u32, FieldError> {
        let tables = self.require_tables()?;
        match self.table_index(a)? {
            0 => Err(FieldError::DivisionByZero),
            a => Ok(tables.log(a)),
        }
    }

    /// `x^i`; exponents wrap modulo the group order.
    pub fn exp_lookup(&self, i: u64) -> Result<Element, FieldError> {
        let tables = self.require_tables()?;
        let i = (i % tables.max() as u64) as u32;
        Ok(Element::Single(tables.exp(i) as u64))
    }

    fn require_tables(&self) -> Result<&LogTables, FieldError> {
        self.log_tables.get().ok_or_else(|| {
            FieldError::UnsupportedOperation("log tables have not been built for this field".into())
        })
    }

    /// Index of a reduced Single element into the tables.
    fn table_index(&self, a: &Element) -> Result<u32, FieldError> {
        match a {
            Element::Single(value) => {
                self.require_reduced(a)?;
                Ok(*value as u32)
            }
            other => Err(self.mismatch(other)),
        }
    }

    fn require_reduced(&self, a: &Element) -> Result<(), FieldError> {
        if self.is_reduced(a)? {
            Ok(())
        } else {
            Err(FieldError::UnreducedElement {
                degree: self.degree(a)?,
                field_degree: self.field_degree(),
            })
        }
    }

    /// Multi elements may be shorter than the field's word count but not longer.
    fn check_words(&self, words: &[u64]) -> Result<(), FieldError> {
        match &self.repr {
            Repr::Multi(ops) if words.len() > ops.word_count() => Err(FieldError::WordCount {
                expected: ops.word_count(),
                found: words.len(),
            }),
            _ => Ok(()),
        }
    }

    fn mismatch(&self, found: &Element) -> FieldError {
        FieldError::ElementMismatch {
            expected: self.word_class(),
            found: found.class(),
        }
    }
}
