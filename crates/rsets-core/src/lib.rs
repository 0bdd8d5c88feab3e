//! Weighted random sets with dice-driven weights, counts, and nesting.
//!
//! A [`WeightedSet`] is an ordered list of [`WeightedEntry`] values, each with
//! a weight and a count that may be written in dice notation. Entries can hold
//! other sets, so draws expand recursively into a flat list of literals.
//! [`build`] turns a declarative [`Definition`] into a [`Registry`] of named
//! sets, resolving references between them and rejecting cycles up front.

pub mod config;
pub mod definition;
pub mod entry;
pub mod error;
pub mod factory;
pub mod literal;
pub mod registry;
pub mod sampler;
pub mod set;

pub use config::SetsConfig;
pub use definition::{Definition, EntrySpec, FrequencyProfile, Metadata, ValueKind};
pub use entry::{EntryValue, WeightedEntry};
pub use error::{SetError, SetResult};
pub use factory::{DEFAULT_PROFILE, build, build_with_profile};
pub use literal::Literal;
pub use registry::Registry;
pub use sampler::Sampler;
pub use set::WeightedSet;

pub use rsets_dice::Quantity;
