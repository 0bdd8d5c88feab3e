//! Dice notation for random-sets.
//!
//! Provides polyhedral dice, dice pools, the `<count>d<sides>[+|-<modifier>]`
//! expression grammar, and [`Quantity`], the integer-or-expression value used
//! wherever a weight or count may be written as dice notation.

pub mod die;
pub mod error;
pub mod expr;
pub mod pool;
pub mod quantity;
pub mod roll;

pub use die::Die;
pub use error::{DiceError, DiceResult};
pub use expr::{DiceExpr, DiceRoll};
pub use pool::DicePool;
pub use quantity::{Quantity, resolve};
pub use roll::{DieResult, RollResult};
