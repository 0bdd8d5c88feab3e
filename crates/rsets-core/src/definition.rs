//! Declarative set definitions.
//!
//! A definition maps set names to lists of entry specifications:
//!
//! ```yaml
//! loot:
//!   - { value: gold, weight: 3, count: 2d6 }
//!   - { value: gem }
//!   - { value: trinkets, weight: 1d4 }
//! trinkets:
//!   - ring
//!   - { value: trinkets, type: literal }
//! metadata:
//!   frequencies:
//!     rare:
//!       loot: { gold: 1, gem: 3 }
//! ```
//!
//! An untagged string value that names another set becomes a reference to it;
//! `type: literal` and `type: reference` make the intent explicit. Bare
//! scalars are shorthand for `{ value: <scalar> }`. The top-level `metadata`
//! key is reserved for frequency profiles.

use std::collections::BTreeMap;

use rsets_dice::Quantity;
use serde::{Deserialize, Serialize};

use crate::literal::Literal;

/// Weight overrides keyed by set name, then by entry value.
pub type FrequencyProfile = BTreeMap<String, BTreeMap<String, Quantity>>;

/// A complete set definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Definition-wide settings.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    /// Entry specifications keyed by set name.
    #[serde(flatten)]
    pub sets: BTreeMap<String, Vec<EntrySpec>>,
}

impl Definition {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a set.
    pub fn with_set(mut self, name: impl Into<String>, entries: Vec<EntrySpec>) -> Self {
        self.sets.insert(name.into(), entries);
        self
    }

    /// Add a frequency profile.
    pub fn with_profile(mut self, name: impl Into<String>, profile: FrequencyProfile) -> Self {
        self.metadata.frequencies.insert(name.into(), profile);
        self
    }
}

/// Definition-wide settings stored under the `metadata` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Named weight profiles that can replace entry weights at build time.
    #[serde(default)]
    pub frequencies: BTreeMap<String, FrequencyProfile>,
}

impl Metadata {
    /// Returns true if no metadata is set.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// How an entry's value should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Always a literal, even if it matches a set name.
    Literal,
    /// Must name another set in the same definition.
    Reference,
}

/// The specification of one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntryForm")]
pub struct EntrySpec {
    /// The literal value, or the name of the referenced set.
    pub value: Literal,
    /// Relative selection weight.
    #[serde(default)]
    pub weight: Quantity,
    /// Number of values contributed when selected.
    #[serde(default)]
    pub count: Quantity,
    /// Explicit interpretation of `value`; inferred when absent.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ValueKind>,
}

impl EntrySpec {
    /// Create a specification with weight 1, count 1 and no explicit kind.
    pub fn new(value: impl Into<Literal>) -> Self {
        Self {
            value: value.into(),
            weight: Quantity::default(),
            count: Quantity::default(),
            kind: None,
        }
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

    /// Force the value to be treated as a literal.
    pub fn literal(mut self) -> Self {
        self.kind = Some(ValueKind::Literal);
        self
    }

    /// Force the value to be treated as a set reference.
    pub fn reference(mut self) -> Self {
        self.kind = Some(ValueKind::Reference);
        self
    }
}

/// The accepted shapes of an entry specification.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntryForm {
    Full {
        value: Literal,
        #[serde(default)]
        weight: Quantity,
        #[serde(default)]
        count: Quantity,
        #[serde(default, rename = "type")]
        kind: Option<ValueKind>,
    },
    Bare(Literal),
}

impl From<EntryForm> for EntrySpec {
    fn from(form: EntryForm) -> Self {
        match form {
            EntryForm::Full {
                value,
                weight,
                count,
                kind,
            } => Self {
                value,
                weight,
                count,
                kind,
            },
            EntryForm::Bare(value) => Self::new(value),
        }
    }
}
