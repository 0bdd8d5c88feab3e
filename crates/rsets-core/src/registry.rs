//! Named weighted sets produced by the factory.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;

use crate::error::{SetError, SetResult};
use crate::literal::Literal;
use crate::set::WeightedSet;

/// An immutable name → set map. Nested sets are shared with their parents.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    sets: BTreeMap<String, Arc<WeightedSet>>,
}

impl Registry {
    pub(crate) fn from_sets(sets: BTreeMap<String, Arc<WeightedSet>>) -> Self {
        Self { sets }
    }

    /// Look up a set by name.
    pub fn get(&self, name: &str) -> Option<&Arc<WeightedSet>> {
        self.sets.get(name)
    }

    /// Look up a set by name, failing if it does not exist.
    pub fn set(&self, name: &str) -> SetResult<&Arc<WeightedSet>> {
        self.get(name).ok_or_else(|| SetError::UnknownSet(name.to_string()))
    }

    /// Returns true if a set with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// Set names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Iterate over `(name, set)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<WeightedSet>)> {
        self.sets.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// Number of sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns true if there are no sets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Draw `n` times from the named set.
    pub fn draw_many<R: Rng + ?Sized>(
        &self,
        name: &str,
        n: usize,
        rng: &mut R,
    ) -> SetResult<Vec<Literal>> {
        self.set(name)?.draw_many(n, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::WeightedEntry;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn registry() -> Registry {
        let mut sets = BTreeMap::new();
        sets.insert(
            "weather".to_string(),
            Arc::new(WeightedSet::new("weather").with_entry(WeightedEntry::literal("rain"))),
        );
        sets.insert("void".to_string(), Arc::new(WeightedSet::new("void")));
        Registry::from_sets(sets)
    }

    #[test]
    fn lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert!(registry.contains("weather"));
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), ["void", "weather"]);
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn draw_from_named_set() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            registry().draw_many("weather", 2, &mut rng).unwrap(),
            vec![Literal::from("rain"); 2]
        );
    }

    #[test]
    fn unknown_set_fails() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            registry().draw_many("missing", 1, &mut rng),
            Err(SetError::UnknownSet("missing".to_string()))
        );
    }

    #[test]
    fn empty_set_only_fails_when_drawn() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(registry().draw_many("void", 0, &mut rng).unwrap().is_empty());
        assert_eq!(
            registry().draw_many("void", 1, &mut rng),
            Err(SetError::EmptySet("void".to_string()))
        );
    }
}
