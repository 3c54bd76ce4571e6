//! Diagnostic rendering
//!
//! Hex output is most-significant word first. Single elements use 32-bit
//! groups, wider layouts use 64-bit groups.

use std::fmt;

use crate::field::{Element, Field, Generator, Word};

/// Zero-padded hex of `words` (low first), printed high word first.
pub fn hex_words(words: &[u64]) -> String {
    words.iter().rev().map(|word| format!("{word:016x}")).collect()
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Single(value) => write!(f, "{value:08x}"),
            Element::Pair(value) => f.write_str(&hex_words(&value.to_words())),
            Element::Multi(words) => f.write_str(&hex_words(words)),
        }
    }
}

impl fmt::Display for Generator {
    /// Polynomial notation, e.g. `x^8 + x^4 + x^3 + x^2 + 1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .exponents()
            .into_iter()
            .map(|exponent| match exponent {
                0 => "1".to_string(),
                1 => "x".to_string(),
                e => format!("x^{e}"),
            })
            .collect();
        f.write_str(&terms.join(" + "))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let generator = self.element_from_words(self.generator().words());
        write!(f, "Field({}): {}", self.field_degree(), generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_hex() {
        assert_eq!(Element::Single(0x1d).to_string(), "0000001d");
        assert_eq!(
            Element::Pair((1u128 << 64) | 0xff).to_string(),
            "000000000000000100000000000000ff"
        );
        assert_eq!(
            Element::Multi(vec![2, 0, 1]).to_string(),
            "000000000000000100000000000000000000000000000002"
        );
    }

    #[test]
    fn test_field_and_generator() {
        let field = Field::new([8, 4, 3, 2, 0]).unwrap();
        assert_eq!(field.to_string(), "Field(8): 0000011d");
        assert_eq!(field.generator().to_string(), "x^8 + x^4 + x^3 + x^2 + 1");

        let field = Field::new([2, 1, 0]).unwrap();
        assert_eq!(field.generator().to_string(), "x^2 + x + 1");
    }
}
