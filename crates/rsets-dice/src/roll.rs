//! Outcomes of rolling a [`DicePool`](crate::DicePool).

use serde::{Deserialize, Serialize};

use crate::die::Die;

/// One die and the face it landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The die that was rolled.
    pub die: Die,
    /// The face shown, between 1 and the die's side count.
    pub value: u32,
}

/// Every die from one roll of a pool, in pool order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Sum of the faces. Widened so that large pools of large dice fit.
    pub fn total(&self) -> u64 {
        self.dice.iter().map(|d| u64::from(d.value)).sum()
    }

    /// Number of dice rolled.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.dice.iter().map(|d| d.value.to_string()).collect();
        write!(f, "[{}] = {}", faces.join(", "), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces(die: Die, values: &[u32]) -> RollResult {
        RollResult {
            dice: values.iter().map(|&value| DieResult { die, value }).collect(),
        }
    }

    #[test]
    fn sums_faces() {
        let r = faces(Die::D20, &[15, 8, 20]);
        assert_eq!(r.total(), 43);
        assert_eq!(r.count(), 3);
    }

    #[test]
    fn total_does_not_overflow_u32() {
        let r = faces(Die::Custom(u32::MAX), &[u32::MAX, u32::MAX]);
        assert_eq!(r.total(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn no_dice() {
        let r = RollResult::default();
        assert_eq!(r.total(), 0);
        assert_eq!(r.to_string(), "[] = 0");
    }

    #[test]
    fn display_lists_faces() {
        assert_eq!(faces(Die::D6, &[3, 5]).to_string(), "[3, 5] = 8");
    }
}
