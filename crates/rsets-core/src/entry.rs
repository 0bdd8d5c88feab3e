//! Weighted entries: one candidate outcome of a draw.

use std::sync::Arc;

use rand::Rng;
use rsets_dice::Quantity;

use crate::error::{SetError, SetResult};
use crate::literal::Literal;
use crate::set::WeightedSet;

/// What an entry produces when it is selected.
#[derive(Debug, Clone)]
pub enum EntryValue {
    /// A concrete value.
    Literal(Literal),
    /// Another set, drawn from when this entry is selected.
    Set(Arc<WeightedSet>),
}

impl EntryValue {
    /// The text a frequency profile matches against: the literal itself or
    /// the nested set's name.
    pub fn key(&self) -> String {
        match self {
            Self::Literal(literal) => literal.to_string(),
            Self::Set(set) => set.name().to_string(),
        }
    }
}

impl From<Literal> for EntryValue {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Arc<WeightedSet>> for EntryValue {
    fn from(set: Arc<WeightedSet>) -> Self {
        Self::Set(set)
    }
}

/// A value paired with a weight and a count.
///
/// Weight and count are resolved afresh on every draw, so dice-based weights
/// describe a distribution rather than a fixed number.
#[derive(Debug, Clone)]
pub struct WeightedEntry {
    value: EntryValue,
    weight: Quantity,
    count: Quantity,
    muted: bool,
}

impl WeightedEntry {
    /// Create an entry with weight 1 and count 1.
    pub fn new(value: impl Into<EntryValue>) -> Self {
        Self {
            value: value.into(),
            weight: Quantity::default(),
            count: Quantity::default(),
            muted: false,
        }
    }

    /// Create an entry holding a literal value.
    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::new(EntryValue::Literal(value.into()))
    }

    /// Create an entry that draws from a nested set.
    pub fn nested(set: Arc<WeightedSet>) -> Self {
        Self::new(EntryValue::Set(set))
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: impl Into<Quantity>) -> Self {
        self.weight = weight.into();
        self
    }

    /// Set the count.
    pub fn with_count(mut self, count: impl Into<Quantity>) -> Self {
        self.count = count.into();
        self
    }

    /// Mark the entry as never selectable.
    pub fn muted(mut self) -> Self {
        self.muted = true;
        self
    }

    /// The entry's value.
    pub fn value(&self) -> &EntryValue {
        &self.value
    }

    /// The weight as written.
    pub fn weight(&self) -> &Quantity {
        &self.weight
    }

    /// The count as written.
    pub fn count(&self) -> &Quantity {
        &self.count
    }

    /// Returns true if the entry is excluded from selection.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Resolve the weight, which must be positive.
    pub fn resolved_weight<R: Rng + ?Sized>(&self, rng: &mut R) -> SetResult<u64> {
        let resolved = self.weight.resolve(rng)?;
        if resolved <= 0 {
            return Err(SetError::InvalidWeight {
                expr: self.weight.to_string(),
                resolved,
            });
        }
        Ok(resolved as u64)
    }

    /// Resolve the count, which must not be negative.
    pub fn resolved_count<R: Rng + ?Sized>(&self, rng: &mut R) -> SetResult<usize> {
        let resolved = self.count.resolve(rng)?;
        usize::try_from(resolved).map_err(|_| SetError::InvalidCount {
            expr: self.count.to_string(),
            resolved,
        })
    }

    /// Produce this entry's contribution to a draw.
    ///
    /// A literal is repeated `count` times. A nested set is drawn from `count`
    /// times and its results are returned in order. A literal count too large
    /// to allocate fails with [`SetError::InvalidCount`].
    pub fn resolved_value<R: Rng + ?Sized>(&self, rng: &mut R) -> SetResult<Vec<Literal>> {
        let count = self.resolved_count(rng)?;
        match &self.value {
            EntryValue::Literal(literal) => {
                let mut values = Vec::new();
                values
                    .try_reserve_exact(count)
                    .map_err(|_| SetError::InvalidCount {
                        expr: self.count.to_string(),
                        resolved: i64::try_from(count).unwrap_or(i64::MAX),
                    })?;
                values.extend(std::iter::repeat_n(literal.clone(), count));
                Ok(values)
            }
            EntryValue::Set(set) => set.draw_many(count, rng),
        }
    }
}
