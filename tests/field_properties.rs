//! Algebraic laws checked across every element layout

use std::sync::OnceLock;

use gfpoly::{Element, Field, StreamRemainder};
use proptest::prelude::*;

/// One field per layout, plus a field narrower than a byte.
fn fields() -> &'static [Field] {
    static FIELDS: OnceLock<Vec<Field>> = OnceLock::new();
    FIELDS.get_or_init(|| {
        vec![
            Field::new([3, 1, 0]).expect("degree 3"),
            Field::primitive(8).expect("degree 8"),
            Field::primitive(16).expect("degree 16"),
            Field::primitive(32).expect("degree 32"),
            Field::primitive(63).expect("degree 63"),
            Field::new([64, 4, 3, 1, 0]).expect("degree 64"),
            Field::new([127, 1, 0]).expect("degree 127"),
            Field::new([130, 3, 0]).expect("degree 130"),
        ]
    })
}

fn reduced(field: &Field, words: &[u64]) -> Element {
    field
        .reduce(&field.element_from_words(words))
        .expect("layout matches field")
}

fn field_and_elements() -> impl Strategy<Value = (usize, [u64; 3], [u64; 3], [u64; 3])> {
    (
        0..fields().len(),
        any::<[u64; 3]>(),
        any::<[u64; 3]>(),
        any::<[u64; 3]>(),
    )
}

proptest! {
    #[test]
    fn operations_stay_reduced((idx, a, b, _c) in field_and_elements()) {
        let field = &fields()[idx];
        let (a, b) = (reduced(field, &a), reduced(field, &b));
        let degree = field.field_degree();

        let sum = field.add(&a, &b).unwrap();
        let product = field.multiply_reduced(&a, &b).unwrap();
        prop_assert!(field.is_reduced(&sum).unwrap());
        prop_assert!(field.is_reduced(&product).unwrap());
        prop_assert!(field.degree(&a).unwrap() < degree);
    }

    #[test]
    fn addition_identity_and_involution((idx, a, _b, _c) in field_and_elements()) {
        let field = &fields()[idx];
        let a = reduced(field, &a);
        prop_assert_eq!(field.add(&a, &field.zero()).unwrap(), a.clone());
        prop_assert!(field.add(&a, &a).unwrap().is_zero());
    }

    #[test]
    fn reduce_is_idempotent((idx, a, _b, _c) in field_and_elements()) {
        let field = &fields()[idx];
        let raw = field.element_from_words(&a);
        let once = field.reduce(&raw).unwrap();
        prop_assert_eq!(field.reduce(&once).unwrap(), once);
    }

    #[test]
    fn multiplication_laws((idx, a, b, c) in field_and_elements()) {
        let field = &fields()[idx];
        let (a, b, c) = (reduced(field, &a), reduced(field, &b), reduced(field, &c));

        prop_assert_eq!(field.multiply_reduced(&a, &field.one()).unwrap(), a.clone());
        prop_assert_eq!(
            field.multiply_reduced(&a, &b).unwrap(),
            field.multiply_reduced(&b, &a).unwrap()
        );

        let left = field.multiply_reduced(&a, &field.add(&b, &c).unwrap()).unwrap();
        let right = field
            .add(
                &field.multiply_reduced(&a, &b).unwrap(),
                &field.multiply_reduced(&a, &c).unwrap(),
            )
            .unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn byte_shift_matches_shift_in_byte((idx, a, _b, _c) in field_and_elements(), byte: u8) {
        let field = &fields()[idx];
        let a = reduced(field, &a);

        let shifted = field.shift_left_reduced(&a, 8).unwrap();
        let expected = field
            .reduce(&field.add(&shifted, &field.element(byte as u64)).unwrap())
            .unwrap();
        prop_assert_eq!(field.shift_in_byte_reduced(&a, &field.zero(), byte).unwrap(), expected);
    }

    #[test]
    fn shift_left_is_multiplication_by_x_power(
        (idx, a, _b, _c) in field_and_elements(),
        s in 0u32..80,
    ) {
        let field = &fields()[idx];
        let a = reduced(field, &a);

        let mut expected = a.clone();
        for _ in 0..s {
            expected = field.shift_one_bit_reduced(&expected).unwrap();
        }
        prop_assert_eq!(field.shift_left_reduced(&a, s).unwrap(), expected);
    }

    #[test]
    fn streaming_matches_long_division(
        idx in 0..fields().len(),
        bytes in proptest::collection::vec(any::<u8>(), 0..40),
    ) {
        let field = &fields()[idx];
        let mut stream = StreamRemainder::new(field);
        stream.update(&bytes).unwrap();
        prop_assert_eq!(stream.finish(), field.reduce_bytes(&bytes));
    }
}

#[test]
fn rijndael_multiplicative_inverse_pair() {
    let field = Field::new([8, 4, 3, 1, 0]).unwrap();
    let product = field
        .multiply_reduced(&Element::Single(0x53), &Element::Single(0xCA))
        .unwrap();
    assert_eq!(product, Element::Single(0x01));
}

#[test]
fn degree_of_x12_plus_one() {
    let field = Field::primitive(12).unwrap();
    assert_eq!(field.degree(&Element::Single(0x1001)).unwrap(), 12);
    assert!(!field.is_reduced(&Element::Single(0x1001)).unwrap());
}

#[test]
fn degree_of_identities_is_zero() {
    for field in fields() {
        assert_eq!(field.degree(&field.zero()).unwrap(), 0);
        assert_eq!(field.degree(&field.one()).unwrap(), 0);
    }
}
