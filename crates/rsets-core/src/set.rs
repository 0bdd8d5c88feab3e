//! The weighted sampling engine.
//!
//! A draw resolves every entry's weight, builds a cumulative sum over the
//! entries in declared order, rolls a uniform integer in `1..=total` and
//! picks the first entry whose cumulative weight reaches the roll. Draws
//! never mutate the set.

use rand::Rng;
use tracing::trace;

use crate::entry::WeightedEntry;
use crate::error::{SetError, SetResult};
use crate::literal::Literal;

/// A named, ordered collection of weighted entries.
#[derive(Debug, Clone, Default)]
pub struct WeightedSet {
    name: String,
    entries: Vec<WeightedEntry>,
}

impl WeightedSet {
    /// Create an empty set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn with_entry(mut self, entry: WeightedEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Create a set from a list of entries.
    pub fn from_entries(name: impl Into<String>, entries: Vec<WeightedEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Create a set where every term carries the same weight.
    ///
    /// With `blank`, an empty-string entry of weight 1 is placed first, so a
    /// draw can come up empty.
    pub fn equal_weights<I, T>(name: impl Into<String>, terms: I, weight: i64, blank: bool) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Literal>,
    {
        let mut entries = Vec::new();
        if blank {
            entries.push(WeightedEntry::literal(""));
        }
        entries.extend(
            terms
                .into_iter()
                .map(|term| WeightedEntry::literal(term).with_weight(weight)),
        );
        Self::from_entries(name, entries)
    }

    /// The set's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entries in declared order.
    pub fn entries(&self) -> &[WeightedEntry] {
        &self.entries
    }

    /// Number of entries, muted ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A new set holding this set's entries followed by `other`'s.
    ///
    /// Nested sets are shared, not copied.
    pub fn merge(&self, other: &WeightedSet) -> WeightedSet {
        let mut entries = self.entries.clone();
        entries.extend(other.entries.iter().cloned());
        Self::from_entries(self.name.clone(), entries)
    }

    /// Perform one weighted selection and return the selected entry's values.
    ///
    /// Weights are resolved afresh, so dice-based weights are re-rolled on
    /// every call.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> SetResult<Vec<Literal>> {
        if self.entries.is_empty() {
            return Err(SetError::EmptySet(self.name.clone()));
        }

        // Each weight fits in 63 bits, so the running sum cannot overflow u128.
        let mut cumulative: Vec<(u128, &WeightedEntry)> = Vec::with_capacity(self.entries.len());
        let mut total: u128 = 0;
        for entry in self.entries.iter().filter(|e| !e.is_muted()) {
            total += u128::from(entry.resolved_weight(rng)?);
            cumulative.push((total, entry));
        }
        if total == 0 {
            return Err(SetError::ZeroWeight(self.name.clone()));
        }

        let roll = rng.random_range(1..=total);
        let index = cumulative.partition_point(|(upper, _)| *upper < roll);
        trace!(set = %self.name, roll, total, index, "weighted draw");

        let (_, entry) = cumulative[index];
        entry.resolved_value(rng)
    }

    /// Draw `n` times with replacement and concatenate the results in order.
    ///
    /// `n == 0` returns an empty list without touching the RNG.
    pub fn draw_many<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> SetResult<Vec<Literal>> {
        let mut drawn = Vec::new();
        for _ in 0..n {
            drawn.extend(self.draw(rng)?);
        }
        Ok(drawn)
    }
}

impl std::ops::Add for WeightedSet {
    type Output = WeightedSet;

    fn add(mut self, other: WeightedSet) -> WeightedSet {
        self.entries.extend(other.entries);
        self
    }
}
