//! Die types.
//!
//! The common polyhedral dice get their own variants; any other positive
//! side count is carried by [`Die::Custom`].

use serde::{Deserialize, Serialize};

/// A single die, identified by its number of faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// d4.
    D4,
    /// d6.
    D6,
    /// d8.
    D8,
    /// d10.
    D10,
    /// d12.
    D12,
    /// d20.
    D20,
    /// Percentile die.
    D100,
    /// Any other side count, `d1` and `d3` included.
    Custom(u32),
}

/// Named dice paired with their face counts.
const NAMED: [(Die, u32); 7] = [
    (Die::D4, 4),
    (Die::D6, 6),
    (Die::D8, 8),
    (Die::D10, 10),
    (Die::D12, 12),
    (Die::D20, 20),
    (Die::D100, 100),
];

impl Die {
    /// Number of faces.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// The die with `sides` faces. Zero faces is not a die.
    pub fn from_sides(sides: u32) -> Option<Self> {
        if sides == 0 {
            return None;
        }
        let die = NAMED
            .iter()
            .find(|(_, n)| *n == sides)
            .map_or(Self::Custom(sides), |(die, _)| *die);
        Some(die)
    }

    /// Parse a bare die tag such as `d20` or `D6`.
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let digits = s.strip_prefix('d')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::from_sides(digits.parse().ok()?)
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}
