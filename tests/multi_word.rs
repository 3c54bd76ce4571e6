//! Pair and multi-word fields checked against schoolbook arithmetic

use gfpoly::{Element, Field, FieldError, WordClass};

/// Carry-less product of two word strings, no reduction.
fn clmul(a: &[u64], b: &[u64]) -> Vec<u64> {
    let mut out = vec![0u64; a.len() + b.len()];
    for (i, &aw) in a.iter().enumerate() {
        for bit in 0..64 {
            if aw >> bit & 1 == 0 {
                continue;
            }
            for (j, &bw) in b.iter().enumerate() {
                out[i + j] ^= bw << bit;
                if bit != 0 {
                    out[i + j + 1] ^= bw >> (64 - bit);
                }
            }
        }
    }
    out
}

fn sample_words(seed: u64, len: usize) -> Vec<u64> {
    // splitmix64
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        })
        .collect()
}

#[test]
fn ghash_field_wraps_x128() {
    let field = Field::new([128, 7, 2, 1, 0]).unwrap();
    assert_eq!(field.word_class(), WordClass::Multi);

    let x128 = field.shift_left_reduced(&field.one(), 128).unwrap();
    assert_eq!(x128, Element::Multi(vec![0x87, 0, 0]));
}

#[test]
fn multi_multiply_matches_schoolbook() {
    for exponents in [vec![127, 1, 0], vec![128, 7, 2, 1, 0], vec![200, 5, 3, 1, 0]] {
        let field = Field::new(exponents).unwrap();
        let nwords = field.zero().words().len();

        for seed in 0..16 {
            let a = field.reduce(&Element::Multi(sample_words(seed, nwords))).unwrap();
            let b = field.reduce(&Element::Multi(sample_words(seed + 100, nwords))).unwrap();

            let wide = Element::Multi(clmul(&a.words(), &b.words()));
            let expected = field.reduce(&wide).unwrap();
            assert_eq!(field.multiply_reduced(&a, &b).unwrap(), expected);
        }
    }
}

#[test]
fn pair_multiply_matches_schoolbook() {
    for degree in [63, 64] {
        let exponents = if degree == 63 { vec![63, 1, 0] } else { vec![64, 4, 3, 1, 0] };
        let field = Field::new(exponents).unwrap();
        assert_eq!(field.word_class(), WordClass::Pair);

        for seed in 0..16 {
            let a = field.reduce(&field.element_from_words(&sample_words(seed, 1))).unwrap();
            let b = field.reduce(&field.element_from_words(&sample_words(seed + 7, 1))).unwrap();

            let wide = clmul(&a.words()[..1], &b.words()[..1]);
            let expected = field.reduce(&field.element_from_words(&wide)).unwrap();
            assert_eq!(field.multiply_reduced(&a, &b).unwrap(), expected);
        }
    }
}

#[test]
fn monomial_multiply_is_shift() {
    let field = Field::new([127, 1, 0]).unwrap();
    let a = field.reduce(&Element::Multi(sample_words(42, 2))).unwrap();

    for k in [1u32, 8, 63, 64, 65, 126] {
        let mut monomial = vec![0u64; 2];
        monomial[(k / 64) as usize] = 1 << (k % 64);
        let x_k = Element::Multi(monomial);
        assert_eq!(
            field.multiply_reduced(&a, &x_k).unwrap(),
            field.shift_left_reduced(&a, k).unwrap()
        );
    }
}

#[test]
fn top_word_stays_masked() {
    let field = Field::new([130, 3, 0]).unwrap();
    let mut a = field.max_value();
    for _ in 0..50 {
        a = field.shift_in_byte_reduced(&a, &field.zero(), 0xFF).unwrap();
        let words = a.words();
        assert_eq!(words.len(), 3);
        assert_eq!(words[2] >> 2, 0, "bits beyond degree 130 must be clear");
    }
}

#[test]
fn short_multi_elements_are_widened() {
    let field = Field::new([127, 1, 0]).unwrap();
    let short = Element::Multi(vec![5]);
    assert_eq!(field.add(&short, &field.zero()).unwrap(), Element::Multi(vec![5, 0]));
}

#[test]
fn pair_elements_are_not_single_elements() {
    let field = Field::primitive(63).unwrap();
    assert_eq!(
        field.shift_one_bit_reduced(&Element::Single(1)),
        Err(FieldError::ElementMismatch {
            expected: WordClass::Pair,
            found: WordClass::Single
        })
    );
}
