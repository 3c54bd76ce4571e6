//! Catalogue of primitive polynomials
//!
//! One generator per degree, preferring trinomials (three nonzero terms)
//! where one exists. Primitive polynomials are irreducible and also admit
//! log/exp tables.
//!
//! Source: J. S. Plank, "Primitive polynomial table", UTK CS-07-593.

/// `(degree, exponents)` pairs, ascending by degree.
pub static PRIMITIVES: &[(u32, &[u32])] = &[
    (2, &[2, 1, 0]),
    (3, &[3, 1, 0]),
    (4, &[4, 1, 0]),
    (5, &[5, 2, 0]),
    (6, &[6, 1, 0]),
    (7, &[7, 1, 0]),
    (8, &[8, 4, 3, 2, 0]),
    (9, &[9, 4, 0]),
    (10, &[10, 3, 0]),
    (11, &[11, 2, 0]),
    (12, &[12, 6, 4, 1, 0]),
    (13, &[13, 4, 3, 1, 0]),
    (14, &[14, 5, 3, 1, 0]),
    (15, &[15, 1, 0]),
    (16, &[16, 5, 3, 2, 0]),
    (17, &[17, 3, 0]),
    (18, &[18, 5, 2, 1, 0]),
    (19, &[19, 5, 2, 1, 0]),
    (20, &[20, 3, 0]),
    (21, &[21, 2, 0]),
    (22, &[22, 1, 0]),
    (23, &[23, 5, 0]),
    (24, &[24, 4, 3, 1, 0]),
    (25, &[25, 3, 0]),
    (26, &[26, 6, 2, 1, 0]),
    (27, &[27, 5, 2, 1, 0]),
    (28, &[28, 3, 0]),
    (29, &[29, 2, 0]),
    (30, &[30, 6, 4, 1, 0]),
    (31, &[31, 3, 0]),
    (32, &[32, 7, 5, 3, 2, 1, 0]),
    (63, &[63, 1, 0]),
];

/// Exponents of the catalogued primitive polynomial of `degree`.
pub fn primitive_exponents(degree: u32) -> Option<&'static [u32]> {
    PRIMITIVES
        .binary_search_by_key(&degree, |&(d, _)| d)
        .ok()
        .map(|idx| PRIMITIVES[idx].1)
}
