//! Builds a [`Registry`] of weighted sets from a [`Definition`].
//!
//! Building happens in three passes: every entry is linked to either a
//! literal or a named set, the reference graph is walked for cycles, and the
//! sets are instantiated children-first so that each nested set is shared
//! between all of its parents.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rsets_dice::Quantity;
use tracing::{debug, warn};

use crate::definition::{Definition, EntrySpec, FrequencyProfile, ValueKind};
use crate::entry::{EntryValue, WeightedEntry};
use crate::error::{SetError, SetResult};
use crate::literal::Literal;
use crate::registry::Registry;
use crate::set::WeightedSet;

/// The profile that applies when none is requested.
///
/// Unless the definition declares it, the default profile leaves every
/// entry's own weight in place.
pub const DEFAULT_PROFILE: &str = "default";

/// Build every set in the definition using the default frequency profile.
pub fn build(definition: &Definition) -> SetResult<Registry> {
    build_with_profile(definition, DEFAULT_PROFILE)
}

/// Build every set in the definition, applying the named frequency profile.
pub fn build_with_profile(definition: &Definition, profile: &str) -> SetResult<Registry> {
    let overrides = select_profile(definition, profile)?;
    let factory = Factory::link(definition, overrides)?;
    factory.check_cycles()?;
    let registry = factory.instantiate();
    debug!(sets = registry.len(), profile, "built weighted set registry");
    Ok(registry)
}

/// Look up the requested profile, checking that it only names known sets.
fn select_profile<'d>(
    definition: &'d Definition,
    profile: &str,
) -> SetResult<Option<&'d FrequencyProfile>> {
    let Some(overrides) = definition.metadata.frequencies.get(profile) else {
        if profile == DEFAULT_PROFILE {
            return Ok(None);
        }
        return Err(SetError::UnknownFrequency(profile.to_string()));
    };

    if let Some(unknown) = overrides
        .keys()
        .find(|name| !definition.sets.contains_key(*name))
    {
        return Err(SetError::UndefinedReference {
            set: format!("metadata.frequencies.{profile}"),
            reference: unknown.clone(),
        });
    }
    Ok(Some(overrides))
}

/// What an entry specification resolved to.
#[derive(Debug, Clone, Copy)]
enum Target<'d> {
    Literal(&'d Literal),
    Set(&'d str),
}

/// An entry specification with its target decided.
#[derive(Debug)]
struct Link<'d> {
    spec: &'d EntrySpec,
    target: Target<'d>,
}

struct Factory<'d> {
    links: BTreeMap<&'d str, Vec<Link<'d>>>,
    overrides: Option<&'d FrequencyProfile>,
}

impl<'d> Factory<'d> {
    /// Decide, for every entry, whether it is a literal or a set reference.
    fn link(definition: &'d Definition, overrides: Option<&'d FrequencyProfile>) -> SetResult<Self> {
        let mut links = BTreeMap::new();
        for (name, specs) in &definition.sets {
            let mut linked = Vec::with_capacity(specs.len());
            for spec in specs {
                linked.push(Link {
                    spec,
                    target: target(definition, name, spec)?,
                });
            }
            links.insert(name.as_str(), linked);
        }
        Ok(Self { links, overrides })
    }

    /// Fail if any set reaches itself through references.
    fn check_cycles(&self) -> SetResult<()> {
        let mut done = BTreeSet::new();
        let mut path = Vec::new();
        for name in self.links.keys().copied() {
            self.visit(name, &mut path, &mut done)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        name: &'d str,
        path: &mut Vec<&'d str>,
        done: &mut BTreeSet<&'d str>,
    ) -> SetResult<()> {
        if done.contains(name) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|seen| *seen == name) {
            let mut chain: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
            chain.push(name.to_string());
            return Err(SetError::CircularReference { chain });
        }

        path.push(name);
        for child in self.children(name) {
            self.visit(child, path, done)?;
        }
        path.pop();
        done.insert(name);
        Ok(())
    }

    /// Names of the sets referenced directly by `name`.
    fn children(&self, name: &str) -> impl Iterator<Item = &'d str> + '_ {
        self.links
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|link| match link.target {
                Target::Set(child) => Some(child),
                Target::Literal(_) => None,
            })
    }

    /// Create every set, children before parents. Requires an acyclic graph.
    fn instantiate(&self) -> Registry {
        let mut built = BTreeMap::new();
        for name in self.links.keys().copied() {
            self.instantiate_set(name, &mut built);
        }
        Registry::from_sets(built)
    }

    fn instantiate_set(
        &self,
        name: &'d str,
        built: &mut BTreeMap<String, Arc<WeightedSet>>,
    ) -> Arc<WeightedSet> {
        if let Some(set) = built.get(name) {
            return Arc::clone(set);
        }

        let overrides = self.overrides.and_then(|profile| profile.get(name));
        let mut matched = BTreeSet::new();
        let mut entries = Vec::new();
        for link in self.links.get(name).into_iter().flatten() {
            let value = match link.target {
                Target::Literal(literal) => EntryValue::Literal(literal.clone()),
                Target::Set(child) => EntryValue::Set(self.instantiate_set(child, built)),
            };
            let entry = WeightedEntry::new(value).with_count(link.spec.count.clone());
            let key = entry.value().key();
            // Only a profile can mute; an entry's own zero weight fails on draw.
            let entry = match overrides.and_then(|o| o.get(&key)) {
                Some(weight) if *weight == Quantity::Fixed(0) => entry.muted(),
                Some(weight) => entry.with_weight(weight.clone()),
                None => entry.with_weight(link.spec.weight.clone()),
            };
            if overrides.is_some_and(|o| o.contains_key(&key)) {
                matched.insert(key);
            }
            entries.push(entry);
        }

        if let Some(overrides) = overrides {
            for key in overrides.keys().filter(|k| !matched.contains(*k)) {
                warn!(set = name, value = %key, "frequency override matches no entry");
            }
        }

        let set = Arc::new(WeightedSet::from_entries(name, entries));
        built.insert(name.to_string(), Arc::clone(&set));
        set
    }
}

/// Decide whether an entry refers to another set.
fn target<'d>(definition: &'d Definition, set: &str, spec: &'d EntrySpec) -> SetResult<Target<'d>> {
    match spec.kind {
        Some(ValueKind::Literal) => Ok(Target::Literal(&spec.value)),
        Some(ValueKind::Reference) => {
            let reference = spec.value.to_string();
            match definition.sets.get_key_value(reference.as_str()) {
                Some((name, _)) => Ok(Target::Set(name)),
                None => Err(SetError::UndefinedReference {
                    set: set.to_string(),
                    reference,
                }),
            }
        }
        None => match spec
            .value
            .as_str()
            .and_then(|name| definition.sets.get_key_value(name))
        {
            Some((name, _)) => Ok(Target::Set(name)),
            None => Ok(Target::Literal(&spec.value)),
        },
    }
}
