//! A sampling session over a built registry.
//!
//! `Sampler` owns a [`Registry`] and a seeded RNG, so callers that do not
//! need to manage randomness themselves can draw by set name.

use rand::rngs::StdRng;
use tracing::debug;

use crate::config::SetsConfig;
use crate::definition::Definition;
use crate::error::SetResult;
use crate::factory::build_with_profile;
use crate::literal::Literal;
use crate::registry::Registry;

/// Draws from named sets with its own RNG.
pub struct Sampler {
    registry: Registry,
    rng: StdRng,
}

impl Sampler {
    /// Create a sampler over an existing registry.
    pub fn new(registry: Registry, config: &SetsConfig) -> Self {
        Self {
            registry,
            rng: config.rng(),
        }
    }

    /// Build the definition with the configured profile and wrap it.
    pub fn from_definition(definition: &Definition, config: &SetsConfig) -> SetResult<Self> {
        let registry = build_with_profile(definition, &config.profile)?;
        debug!(seed = config.seed, profile = %config.profile, "starting sampler");
        Ok(Self::new(registry, config))
    }

    /// Get the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Draw once from the named set.
    pub fn draw(&mut self, name: &str) -> SetResult<Vec<Literal>> {
        self.draw_many(name, 1)
    }

    /// Draw `n` times from the named set.
    pub fn draw_many(&mut self, name: &str, n: usize) -> SetResult<Vec<Literal>> {
        self.registry.draw_many(name, n, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetError;
    use serde_json::json;

    fn definition() -> Definition {
        serde_json::from_value(json!({
            "loot": [{ "value": "gold", "weight": 3 }, { "value": "gem", "weight": 1 }],
            "metadata": { "frequencies": { "only_gems": { "loot": { "gold": 0 } } } },
        }))
        .unwrap()
    }

    #[test]
    fn same_seed_same_draws() {
        let config = SetsConfig::default().with_seed(9);
        let mut a = Sampler::from_definition(&definition(), &config).unwrap();
        let mut b = Sampler::from_definition(&definition(), &config).unwrap();
        assert_eq!(a.draw_many("loot", 25).unwrap(), b.draw_many("loot", 25).unwrap());
    }

    #[test]
    fn consecutive_draws_advance_the_rng() {
        let mut sampler = Sampler::from_definition(&definition(), &SetsConfig::default()).unwrap();
        let first = sampler.draw_many("loot", 40).unwrap();
        let second = sampler.draw_many("loot", 40).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn uses_configured_profile() {
        let config = SetsConfig::default().with_profile("only_gems");
        let mut sampler = Sampler::from_definition(&definition(), &config).unwrap();
        for value in sampler.draw_many("loot", 50).unwrap() {
            assert_eq!(value, Literal::from("gem"));
        }
    }

    #[test]
    fn single_draw() {
        let mut sampler = Sampler::from_definition(&definition(), &SetsConfig::default()).unwrap();
        assert_eq!(sampler.draw("loot").unwrap().len(), 1);
        assert_eq!(
            sampler.draw("treasure"),
            Err(SetError::UnknownSet("treasure".to_string()))
        );
    }
}
