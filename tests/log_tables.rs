//! Discrete-log acceleration against shift-and-add arithmetic

use std::sync::Arc;
use std::thread;

use gfpoly::{Element, Field, FieldError, PRIMITIVES};
use test_case::test_case;

#[test_case(&[8, 4, 3, 2, 0] ; "reed solomon gf256")]
#[test_case(&[4, 1, 0] ; "gf16")]
#[test_case(&[12, 6, 4, 1, 0] ; "gf4096")]
fn inverse_closes_to_one(exponents: &[u32]) {
    let field = Field::new(exponents.iter().copied()).unwrap();
    field.build_log_tables().unwrap();

    let max = field.max_value().as_u64().unwrap();
    for a in 1..=max {
        let a = Element::Single(a);
        let inv = field.invert_via_log(&a).unwrap();
        assert_eq!(field.multiply_via_log(&a, &inv).unwrap(), field.one());
        assert_eq!(field.multiply_reduced(&a, &inv).unwrap(), field.one());
    }
}

#[test]
fn log_multiply_matches_shift_and_add() {
    let field = Field::primitive(8).unwrap();
    field.build_log_tables().unwrap();

    for a in 0..=255u64 {
        for b in 0..=255u64 {
            let (a, b) = (Element::Single(a), Element::Single(b));
            assert_eq!(
                field.multiply_via_log(&a, &b).unwrap(),
                field.multiply_reduced(&a, &b).unwrap()
            );
        }
    }
}

#[test]
fn divide_inverts_multiply() {
    let field = Field::primitive(10).unwrap();
    field.build_log_tables().unwrap();

    for (a, b) in [(0u64, 1u64), (1, 1), (0x3FF, 0x155), (0x2A, 0x3FF), (7, 2)] {
        let (a, b) = (Element::Single(a), Element::Single(b));
        let product = field.multiply_via_log(&a, &b).unwrap();
        assert_eq!(field.divide_via_log(&product, &b).unwrap(), a);
    }
}

#[test]
fn zero_operands() {
    let field = Field::primitive(8).unwrap();
    field.build_log_tables().unwrap();
    let zero = field.zero();
    let five = Element::Single(5);

    assert_eq!(field.multiply_via_log(&zero, &five).unwrap(), zero);
    assert_eq!(field.divide_via_log(&zero, &five).unwrap(), zero);
    assert_eq!(field.divide_via_log(&five, &zero), Err(FieldError::DivisionByZero));
    assert_eq!(field.invert_via_log(&zero), Err(FieldError::DivisionByZero));
}

#[test_case(&[4, 3, 2, 1, 0] ; "irreducible with order five")]
#[test_case(&[8, 1] ; "no constant term")]
#[test_case(&[6, 3, 0] ; "ninth cyclotomic")]
#[test_case(&[8, 4, 3, 1, 0] ; "rijndael where x has order 51")]
#[test_case(&[8, 0] ; "reducible binomial")]
fn non_primitive_generators_are_rejected(exponents: &[u32]) {
    let field = Field::new(exponents.iter().copied()).unwrap();
    assert!(matches!(
        field.build_log_tables(),
        Err(FieldError::NotPrimitivePolynomial { .. })
    ));
    assert!(!field.has_log_tables());

    // the field keeps working without tables
    let two = field.element(2);
    assert!(field.multiply_reduced(&two, &two).is_ok());
    assert!(matches!(
        field.multiply_via_log(&two, &two),
        Err(FieldError::UnsupportedOperation(_))
    ));
}

#[test]
fn catalogue_generators_up_to_sixteen_are_primitive() {
    for &(degree, exponents) in PRIMITIVES.iter().filter(|(degree, _)| *degree <= 16) {
        let field = Field::new(exponents.iter().copied()).unwrap();
        assert!(field.build_log_tables().is_ok(), "degree {degree}");
    }
}

#[test]
fn large_degrees_refuse_tables() {
    let field = Field::primitive(21).unwrap();
    assert_eq!(
        field.build_log_tables(),
        Err(FieldError::TableTooLarge {
            degree: 21,
            max_degree: 20
        })
    );
}

#[test]
fn concurrent_builds_publish_one_table_set() {
    let field = Arc::new(Field::primitive(12).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let field = Arc::clone(&field);
            thread::spawn(move || {
                field.build_log_tables().unwrap();
                field.invert_via_log(&Element::Single(0x123)).unwrap()
            })
        })
        .collect();

    let inverses: Vec<Element> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(inverses.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(
        field.multiply_reduced(&Element::Single(0x123), &inverses[0]).unwrap(),
        field.one()
    );
}
