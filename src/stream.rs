//! Streaming polynomial remainder
//!
//! Feeds a byte stream through a field one byte at a time, the way a
//! checksum or parity encoder consumes data. After `n` bytes the state is the
//! big-endian polynomial of those bytes modulo the generator, plus
//! `seed * x^(8n)` when a seed was supplied.

use crate::field::{Element, Field};
use crate::FieldError;

/// Incremental remainder of a byte stream modulo a field's generator.
#[derive(Debug, Clone)]
pub struct StreamRemainder<'f> {
    field: &'f Field,
    state: Element,
    /// Folded in ahead of the next byte, then cleared.
    pending: Element,
    consumed: u64,
}

impl<'f> StreamRemainder<'f> {
    /// Start from an empty stream.
    pub fn new(field: &'f Field) -> Self {
        Self {
            field,
            state: field.zero(),
            pending: field.zero(),
            consumed: 0,
        }
    }

    /// Start with `seed` folded in before the first byte.
    pub fn with_seed(field: &'f Field, seed: Element) -> Result<Self, FieldError> {
        let mut stream = Self::new(field);
        stream.pending = field.reduce(&seed)?;
        Ok(stream)
    }

    /// Consume more bytes.
    pub fn update(&mut self, bytes: &[u8]) -> Result<(), FieldError> {
        let zero = self.field.zero();
        for &byte in bytes {
            self.state = self.field.shift_in_byte_reduced(&self.state, &self.pending, byte)?;
            if !self.pending.is_zero() {
                self.pending = zero.clone();
            }
        }
        self.consumed += bytes.len() as u64;
        Ok(())
    }

    /// Bytes consumed so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Current remainder. A seed not yet followed by any byte is returned as is.
    pub fn remainder(&self) -> Element {
        if self.consumed == 0 && !self.pending.is_zero() {
            self.pending.clone()
        } else {
            self.state.clone()
        }
    }

    /// Consume the stream and return its remainder.
    pub fn finish(self) -> Element {
        self.remainder()
    }
}
