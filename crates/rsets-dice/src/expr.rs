//! Dice expressions in `<count>d<sides>[+|-<modifier>]` notation.
//!
//! `2d6+1` rolls two six-sided dice and adds one. The count may be omitted
//! (`d20` is `1d20`), letters are case-insensitive and whitespace is ignored.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::die::Die;
use crate::error::{DiceError, DiceResult};
use crate::pool::DicePool;
use crate::roll::RollResult;

/// Upper bound on the number of dice a single expression may roll.
pub const MAX_DICE: u32 = 1000;

/// A parsed dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpr {
    /// How many dice to roll.
    pub count: u32,
    /// The die to roll.
    pub die: Die,
    /// Flat offset added to the sum of the dice.
    pub modifier: i64,
}

impl DiceExpr {
    /// Create an expression without a modifier.
    pub fn new(count: u32, die: Die) -> Self {
        Self {
            count,
            die,
            modifier: 0,
        }
    }

    /// Set the flat modifier.
    pub fn with_modifier(mut self, modifier: i64) -> Self {
        self.modifier = modifier;
        self
    }

    /// The smallest total this expression can produce.
    pub fn min(&self) -> i64 {
        i64::from(self.count).saturating_add(self.modifier)
    }

    /// The largest total this expression can produce.
    pub fn max(&self) -> i64 {
        (i64::from(self.count) * i64::from(self.die.sides())).saturating_add(self.modifier)
    }

    /// The pool of dice this expression rolls.
    pub fn pool(&self) -> DicePool {
        DicePool::new().add(self.die, self.count)
    }

    /// Roll the expression once.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> DiceRoll {
        DiceRoll {
            expr: *self,
            result: self.pool().roll(rng),
        }
    }
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> DiceResult<Self> {
        let invalid = || DiceError::InvalidExpression(s.to_string());

        let text: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        let (count_part, rest) = text.split_once('d').ok_or_else(invalid)?;

        let count = if count_part.is_empty() {
            1
        } else {
            parse_digits(count_part).ok_or_else(invalid)?
        };
        if count == 0 || count > MAX_DICE {
            return Err(invalid());
        }

        let (sides_part, modifier) = match rest.find(['+', '-']) {
            Some(idx) => {
                let (sides, offset) = rest.split_at(idx);
                (sides, parse_modifier(offset).ok_or_else(invalid)?)
            }
            None => (rest, 0),
        };
        let die = parse_digits(sides_part)
            .and_then(Die::from_sides)
            .ok_or_else(invalid)?;

        Ok(Self {
            count,
            die,
            modifier,
        })
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Parse an unsigned run of ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a `+N` or `-N` suffix.
fn parse_modifier(s: &str) -> Option<i64> {
    let (negative, digits) = match s.split_at_checked(1)? {
        ("+", digits) => (false, digits),
        ("-", digits) => (true, digits),
        _ => return None,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// The outcome of rolling a [`DiceExpr`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// The expression that was rolled.
    pub expr: DiceExpr,
    /// The individual dice.
    pub result: RollResult,
}

impl DiceRoll {
    /// Sum of the dice plus the modifier.
    pub fn total(&self) -> i64 {
        (self.result.total() as i64).saturating_add(self.expr.modifier)
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .result
            .dice
            .iter()
            .map(|d| d.value.to_string())
            .collect();
        write!(f, "{}: [{}]", self.expr, values.join(", "))?;
        match self.expr.modifier {
            0 => {}
            m if m > 0 => write!(f, " + {m}")?,
            m => write!(f, " - {}", m.unsigned_abs())?,
        }
        write!(f, " = {}", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn parse(s: &str) -> DiceExpr {
        s.parse().unwrap()
    }

    #[test]
    fn parses_full_notation() {
        assert_eq!(parse("2d6+1"), DiceExpr::new(2, Die::D6).with_modifier(1));
        assert_eq!(parse("3d8-2"), DiceExpr::new(3, Die::D8).with_modifier(-2));
        assert_eq!(parse("1d20"), DiceExpr::new(1, Die::D20));
    }

    #[test]
    fn count_defaults_to_one() {
        assert_eq!(parse("d20"), DiceExpr::new(1, Die::D20));
        assert_eq!(parse("d4+3"), DiceExpr::new(1, Die::D4).with_modifier(3));
    }

    #[test]
    fn tolerates_case_and_whitespace() {
        assert_eq!(parse(" 2D6 + 1 "), DiceExpr::new(2, Die::D6).with_modifier(1));
    }

    #[test]
    fn custom_sides() {
        assert_eq!(parse("4d3"), DiceExpr::new(4, Die::Custom(3)));
        assert_eq!(parse("1d1"), DiceExpr::new(1, Die::Custom(1)));
    }

    #[test]
    fn rejects_malformed_expressions() {
        for bad in [
            "", "d", "2d", "6", "gold", "0d6", "2d0", "2d6+", "2d6+-1", "2d6*2", "-1d6", "2x6",
            "2d6d6", "1001d6",
        ] {
            assert_eq!(
                bad.parse::<DiceExpr>(),
                Err(DiceError::InvalidExpression(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(parse("d20").to_string(), "1d20");
        assert_eq!(parse("2d6 + 1").to_string(), "2d6+1");
        assert_eq!(parse("3d8-2").to_string(), "3d8-2");
    }

    #[test]
    fn bounds() {
        let expr = parse("2d6+1");
        assert_eq!(expr.min(), 3);
        assert_eq!(expr.max(), 13);
    }

    #[test]
    fn roll_total_includes_modifier() {
        let mut rng = StdRng::seed_from_u64(42);
        let roll = parse("3d1-1").roll(&mut rng);
        assert_eq!(roll.result.count(), 3);
        assert_eq!(roll.total(), 2);
        assert_eq!(roll.to_string(), "3d1-1: [1, 1, 1] - 1 = 2");
    }

    #[test]
    fn roll_deterministic_with_seed() {
        let expr = parse("4d12+2");
        let mut rng1 = StdRng::seed_from_u64(5);
        let mut rng2 = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            assert_eq!(expr.roll(&mut rng1), expr.roll(&mut rng2));
        }
    }

    proptest! {
        #[test]
        fn display_then_parse_is_stable(count in 1u32..=50, sides in 1u32..=200, modifier in -100i64..=100) {
            let expr = DiceExpr::new(count, Die::Custom(sides)).with_modifier(modifier);
            let reparsed: DiceExpr = expr.to_string().parse().unwrap();
            prop_assert_eq!(reparsed.count, count);
            prop_assert_eq!(reparsed.die.sides(), sides);
            prop_assert_eq!(reparsed.modifier, modifier);
        }

        #[test]
        fn rolls_stay_within_bounds(count in 1u32..=20, sides in 1u32..=100, modifier in -50i64..=50, seed in any::<u64>()) {
            let expr = DiceExpr::new(count, Die::Custom(sides)).with_modifier(modifier);
            let mut rng = StdRng::seed_from_u64(seed);
            let total = expr.roll(&mut rng).total();
            prop_assert!(total >= expr.min());
            prop_assert!(total <= expr.max());
        }
    }
}
