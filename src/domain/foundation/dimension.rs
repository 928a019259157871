//! Orientation dimension catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six fixed career-orientation axes.
///
/// The declaration order below is the canonical ordering used to break
/// score ties when deriving the three-letter profile code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Realistic,
        Dimension::Investigative,
        Dimension::Artistic,
        Dimension::Social,
        Dimension::Enterprising,
        Dimension::Conventional,
    ];

    /// Number of dimensions in the catalog.
    pub const COUNT: usize = 6;

    /// Single-letter code used in the derived profile code.
    pub fn code(&self) -> char {
        match self {
            Dimension::Realistic => 'R',
            Dimension::Investigative => 'I',
            Dimension::Artistic => 'A',
            Dimension::Social => 'S',
            Dimension::Enterprising => 'E',
            Dimension::Conventional => 'C',
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Realistic => "Realistic",
            Dimension::Investigative => "Investigative",
            Dimension::Artistic => "Artistic",
            Dimension::Social => "Social",
            Dimension::Enterprising => "Enterprising",
            Dimension::Conventional => "Conventional",
        }
    }

    /// Position in the canonical ordering (0-based).
    pub fn canonical_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|d| d == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_six_dimensions() {
        assert_eq!(Dimension::ALL.len(), Dimension::COUNT);
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<char> = Dimension::ALL.iter().map(|d| d.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 6);
    }

    #[test]
    fn canonical_index_matches_declaration_order() {
        assert_eq!(Dimension::Realistic.canonical_index(), 0);
        assert_eq!(Dimension::Conventional.canonical_index(), 5);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(format!("{}", Dimension::Investigative), "Investigative");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&Dimension::Enterprising).unwrap(),
            "\"enterprising\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let d: Dimension = serde_json::from_str("\"artistic\"").unwrap();
        assert_eq!(d, Dimension::Artistic);
    }
}
