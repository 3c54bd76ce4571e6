//! # GF(2^w) Polynomial Arithmetic
//!
//! Finite-field primitives for erasure coding and checksums: elements of
//! GF(2^w) are binary polynomials of degree < w, reduced modulo a generator
//! polynomial.
//!
//! ## Core Techniques
//!
//! 1. **Width dispatch**: one backend per element layout (single word, word
//!    pair, word array), chosen once from the generator degree
//! 2. **Byte-shift table**: reduce a left shift by 8 bits with one XOR
//! 3. **Shift-and-add multiply**: carry-less multiplication with on-the-fly
//!    reduction
//! 4. **Discrete-log tables**: O(1) multiply, divide and invert for primitive
//!    generators up to degree 20
//!
//! ## Usage Example
//!
//! ```
//! use gfpoly::{Element, Field};
//!
//! let field = Field::primitive(8)?;
//! field.build_log_tables()?;
//!
//! let a = Element::Single(0x57);
//! let inv = field.invert_via_log(&a)?;
//! assert_eq!(field.multiply_reduced(&a, &inv)?, field.one());
//! # Ok::<(), gfpoly::FieldError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod config;   // Textual field specs and build options
pub mod field;    // Field, elements and width-specialised backends
pub mod format;   // Hex and polynomial rendering
pub mod log_table; // Discrete-log acceleration
pub mod primitives; // Primitive polynomial catalogue
pub mod stream;   // Streaming remainder over byte input

// Re-exports for convenience
pub use config::{FieldOptions, FieldSpec, LogTablePolicy};
pub use field::{Element, Field, FieldOps, Generator, WordClass};
pub use log_table::LogTables;
pub use primitives::{primitive_exponents, PRIMITIVES};
pub use stream::StreamRemainder;

use thiserror::Error;

/// Errors reported by field construction and arithmetic.
///
/// Every error is a deterministic property of the field and its inputs;
/// retrying the same call yields the same result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Bad generator description
    #[error("invalid field configuration: {0}")]
    Configuration(String),

    /// Operation not available on this field in its current state
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Generator is reducible or `x` does not generate the multiplicative group
    #[error("generator {generator} is not a primitive polynomial")]
    NotPrimitivePolynomial {
        /// Generator in hex
        generator: String,
    },

    /// Log tables would be too large
    #[error("log tables for degree {degree} exceed the maximum degree {max_degree}")]
    TableTooLarge {
        /// Field degree
        degree: u32,
        /// Largest degree tables are built for
        max_degree: u32,
    },

    /// Division or inversion of zero
    #[error("division by zero")]
    DivisionByZero,

    /// Element layout does not match the field
    #[error("element of class {found:?} used with a {expected:?} field")]
    ElementMismatch {
        /// The field's layout
        expected: WordClass,
        /// The element's layout
        found: WordClass,
    },

    /// Multi-word element carries more words than the field uses
    #[error("element has {found} words, field uses {expected}")]
    WordCount {
        /// Field word count
        expected: usize,
        /// Element word count
        found: usize,
    },

    /// Operand is not reduced modulo the generator
    #[error("element of degree {degree} is not reduced for a degree-{field_degree} field")]
    UnreducedElement {
        /// Degree of the operand
        degree: u32,
        /// Degree of the field
        field_degree: u32,
    },
}

/// Build a field from generator exponents.
///
/// Equivalent to [`Field::new`].
pub fn new_field<I>(exponents: I) -> Result<Field, FieldError>
where
    I: IntoIterator<Item = u32>,
{
    Field::new(exponents)
}
