//! Discrete-log acceleration
//!
//! For a primitive generator the element `x` has multiplicative order
//! 2^degree - 1, so every nonzero element is a unique power of `x`. Storing
//! that power (`log`) and its inverse mapping (`exp`) turns multiply, divide
//! and invert into table lookups.
//!
//! Tables hold 8 bytes per element, so they are refused above
//! [`MAX_LOG_TABLE_DEGREE`].

use bitvec::prelude::*;
use tracing::{debug, info, warn};

use crate::field::{FieldOps, SingleWord};
use crate::FieldError;

/// Largest degree for which log/exp tables are built (2^20 elements).
pub const MAX_LOG_TABLE_DEGREE: u32 = 20;

/// Log and exp tables of a field with a primitive generator.
#[derive(Debug, Clone)]
pub struct LogTables {
    /// 2^degree - 1, the order of the multiplicative group.
    max: u32,
    /// `log[a]` for nonzero `a`; `log[0]` is unused.
    log: Vec<u32>,
    /// `exp[i] = x^i`; `exp[max] = exp[0] = 1`.
    exp: Vec<u32>,
}

impl LogTables {
    /// Walk the powers of `x` and record them.
    ///
    /// Fails if the walk revisits an element or reaches zero before covering
    /// every nonzero element, i.e. the generator is not primitive.
    pub fn build(ops: &SingleWord) -> Result<Self, FieldError> {
        let degree = ops.field_degree();
        if degree > MAX_LOG_TABLE_DEGREE {
            debug!(degree, max = MAX_LOG_TABLE_DEGREE, "refusing log tables");
            return Err(FieldError::TableTooLarge {
                degree,
                max_degree: MAX_LOG_TABLE_DEGREE,
            });
        }

        let max = ops.max_value() as u32;
        let size = max as usize + 1;
        let mut log = vec![0u32; size];
        let mut exp = vec![0u32; size];
        let mut seen = bitvec![0; size];

        let not_primitive = || {
            let generator = format!("{:#x}", ops.generator());
            warn!(%generator, degree, "generator is not primitive");
            FieldError::NotPrimitivePolynomial { generator }
        };

        let mut a: u64 = 1;
        for i in 0..max {
            let idx = a as usize;
            if a == 0 || seen[idx] {
                return Err(not_primitive());
            }
            seen.set(idx, true);
            log[idx] = i;
            exp[i as usize] = a as u32;
            // a * x mod p
            a = ops.shift_one_bit_reduced(&a);
        }
        if a != 1 {
            return Err(not_primitive());
        }
        exp[max as usize] = 1;

        info!(degree, elements = max, "log tables built");
        Ok(Self { max, log, exp })
    }

    /// Order of the multiplicative group, 2^degree - 1.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Discrete log of a nonzero element.
    pub fn log(&self, a: u32) -> u32 {
        self.log[a as usize]
    }

    /// `x^i` for `i <= max`.
    pub fn exp(&self, i: u32) -> u32 {
        self.exp[i as usize]
    }

    /// `a * b` as `exp(log a + log b)`.
    pub fn multiply(&self, a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }
        let mut l = self.log(a) + self.log(b);
        if l >= self.max {
            l -= self.max;
        }
        self.exp(l)
    }

    /// `a / b` as `exp(log a - log b)`.
    pub fn divide(&self, a: u32, b: u32) -> Result<u32, FieldError> {
        if b == 0 {
            return Err(FieldError::DivisionByZero);
        }
        if a == 0 {
            return Ok(0);
        }
        let l = (self.log(a) + self.max - self.log(b)) % self.max;
        Ok(self.exp(l))
    }

    /// Multiplicative inverse, `exp(max - log a)`.
    pub fn invert(&self, a: u32) -> Result<u32, FieldError> {
        if a == 0 {
            return Err(FieldError::DivisionByZero);
        }
        Ok(self.exp(self.max - self.log(a)))
    }
}
