//! Integer-or-dice quantities.
//!
//! Weights and counts may be written either as plain integers or as dice
//! notation. Expressions are kept as text and parsed when resolved, so a
//! malformed expression only surfaces when it is first used, and every
//! resolution rolls fresh dice.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DiceResult;
use crate::expr::DiceExpr;

/// A quantity given either literally or as dice notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// A fixed integer.
    Fixed(i64),
    /// Dice notation (or an integer written as text), rolled on every resolution.
    Expr(String),
}

impl Quantity {
    /// Resolve to an integer, rolling dice when this is an expression.
    ///
    /// Fixed quantities never touch the RNG.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> DiceResult<i64> {
        match self {
            Self::Fixed(n) => Ok(*n),
            Self::Expr(text) => resolve(text, rng),
        }
    }

    /// Returns true if resolving this quantity involves rolling dice.
    pub fn is_dice(&self) -> bool {
        match self {
            Self::Fixed(_) => false,
            Self::Expr(text) => text.trim().parse::<i64>().is_err(),
        }
    }

    /// The fixed value, if this quantity does not involve dice.
    pub fn as_fixed(&self) -> Option<i64> {
        match self {
            Self::Fixed(n) => Some(*n),
            Self::Expr(text) => text.trim().parse().ok(),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl From<i64> for Quantity {
    fn from(n: i64) -> Self {
        Self::Fixed(n)
    }
}

impl From<i32> for Quantity {
    fn from(n: i32) -> Self {
        Self::Fixed(i64::from(n))
    }
}

impl From<u32> for Quantity {
    fn from(n: u32) -> Self {
        Self::Fixed(i64::from(n))
    }
}

impl From<&str> for Quantity {
    fn from(text: &str) -> Self {
        Self::Expr(text.to_string())
    }
}

impl From<String> for Quantity {
    fn from(text: String) -> Self {
        Self::Expr(text)
    }
}

impl From<DiceExpr> for Quantity {
    fn from(expr: DiceExpr) -> Self {
        Self::Expr(expr.to_string())
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Expr(text) => write!(f, "{text}"),
        }
    }
}

/// Resolve a plain integer or dice expression to an integer.
///
/// Integers are returned unchanged. Anything else is parsed as dice notation
/// and rolled once; a string that is neither fails with
/// [`DiceError::InvalidExpression`](crate::DiceError::InvalidExpression).
pub fn resolve<R: Rng + ?Sized>(text: &str, rng: &mut R) -> DiceResult<i64> {
    if let Ok(n) = text.trim().parse::<i64>() {
        return Ok(n);
    }
    let expr: DiceExpr = text.parse()?;
    Ok(expr.roll(rng).total())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiceError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fixed_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Quantity::Fixed(7).resolve(&mut rng), Ok(7));
        assert_eq!(Quantity::Fixed(-3).resolve(&mut rng), Ok(-3));
    }

    #[test]
    fn integer_text_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Quantity::from(" 12 ").resolve(&mut rng), Ok(12));
        assert_eq!(resolve("-4", &mut rng), Ok(-4));
        assert!(!Quantity::from("12").is_dice());
        assert_eq!(Quantity::from("12").as_fixed(), Some(12));
    }

    #[test]
    fn expression_rolls_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let q = Quantity::from("2d6+1");
        assert!(q.is_dice());
        assert_eq!(q.as_fixed(), None);
        for _ in 0..200 {
            let n = q.resolve(&mut rng).unwrap();
            assert!((3..=13).contains(&n));
        }
    }

    #[test]
    fn expression_is_not_cached() {
        let mut rng = StdRng::seed_from_u64(11);
        let q = Quantity::from("1d1000");
        let rolls: Vec<i64> = (0..20).map(|_| q.resolve(&mut rng).unwrap()).collect();
        assert!(rolls.iter().any(|r| *r != rolls[0]));
    }

    #[test]
    fn malformed_expression_fails_on_resolve() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Quantity::from("lots").resolve(&mut rng),
            Err(DiceError::InvalidExpression("lots".to_string()))
        );
    }

    #[test]
    fn deserializes_integers_and_strings() {
        let fixed: Quantity = serde_json::from_str("3").unwrap();
        assert_eq!(fixed, Quantity::Fixed(3));
        let expr: Quantity = serde_json::from_str("\"1d20+3\"").unwrap();
        assert_eq!(expr, Quantity::Expr("1d20+3".to_string()));
    }

    #[test]
    fn default_is_one() {
        assert_eq!(Quantity::default(), Quantity::Fixed(1));
    }
}
