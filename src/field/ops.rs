//! Operation set shared by every field representation
//!
//! Each backend (single word, word pair, word array) implements the same
//! arithmetic with its own element type. The [`Field`](super::Field) wrapper
//! picks one backend at construction and never branches on width again.

use std::fmt::Debug;

/// Arithmetic over GF(2^w) for one concrete element layout.
///
/// All element arguments are expected to be reduced unless the method says
/// otherwise; results are always reduced.
pub trait FieldOps {
    /// Element layout for this backend.
    type Elem: Clone + PartialEq + Eq + Debug;

    /// Degree of the generator polynomial.
    fn field_degree(&self) -> u32;

    /// Additive identity.
    fn zero(&self) -> Self::Elem;

    /// Multiplicative identity.
    fn one(&self) -> Self::Elem;

    /// Whether `a` is the additive identity.
    fn is_zero(&self, a: &Self::Elem) -> bool;

    /// Embed a byte as an (unreduced) element.
    fn from_byte(&self, byte: u8) -> Self::Elem;

    /// Field addition (XOR).
    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Bitwise OR.
    fn or(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Position of the highest set bit, `degree(0) = degree(1) = 0`.
    fn degree(&self, a: &Self::Elem) -> u32;

    /// Polynomial remainder of `a` modulo the generator. Accepts unreduced input.
    fn reduce(&self, a: &Self::Elem) -> Self::Elem;

    /// Plain left shift without reduction. Bits past the layout's capacity are lost.
    fn shift_left(&self, a: &Self::Elem, s: u32) -> Self::Elem;

    /// Plain right shift.
    fn shift_right(&self, a: &Self::Elem, s: u32) -> Self::Elem;

    /// `a * x mod p` in one step.
    fn shift_one_bit_reduced(&self, a: &Self::Elem) -> Self::Elem;

    /// `a * x^s mod p`, a byte at a time through the byte-shift table.
    fn shift_left_reduced(&self, a: &Self::Elem, s: u32) -> Self::Elem;

    /// `((a + carry_in) * x^8 + byte) mod p`.
    fn shift_in_byte_reduced(&self, a: &Self::Elem, carry_in: &Self::Elem, byte: u8) -> Self::Elem;

    /// `a * b mod p` by shift-and-add.
    fn multiply_reduced(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;
}

/// `byte * x^degree mod p`, computed with one-bit steps only.
///
/// This is the reduced half of a byte-shift table entry. It must not touch the
/// table itself since it is used to fill it.
pub(crate) fn reduced_byte_product<F: FieldOps>(ops: &F, byte: u8) -> F::Elem {
    let mut value = ops.reduce(&ops.from_byte(byte));
    for _ in 0..ops.field_degree() {
        value = ops.shift_one_bit_reduced(&value);
    }
    value
}

/// Full table entry: reduced product OR'ed with the uncancelled copy
/// `byte << degree`, so one XOR both clears the shifted-out bits and adds
/// their remainder.
pub(crate) fn byte_shift_entry<F: FieldOps>(ops: &F, byte: u8) -> F::Elem {
    let reduced = reduced_byte_product(ops, byte);
    let cancel = ops.shift_left(&ops.reduce(&ops.from_byte(byte)), ops.field_degree());
    ops.or(&reduced, &cancel)
}
