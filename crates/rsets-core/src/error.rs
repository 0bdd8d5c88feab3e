//! Error types for building and drawing from weighted sets.

use rsets_dice::DiceError;

/// Result type for weighted set operations.
pub type SetResult<T> = Result<T, SetError>;

/// Errors that can occur while building or drawing from weighted sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetError {
    /// A weight or count is neither an integer nor valid dice notation.
    #[error(transparent)]
    InvalidExpression(#[from] DiceError),

    /// An entry's weight resolved to zero or less.
    #[error("invalid weight: \"{expr}\" resolved to {resolved}")]
    InvalidWeight {
        /// The weight as written.
        expr: String,
        /// The value it resolved to.
        resolved: i64,
    },

    /// An entry's count resolved to a negative number, or to more values
    /// than can be allocated.
    #[error("invalid count: \"{expr}\" resolved to {resolved}")]
    InvalidCount {
        /// The count as written.
        expr: String,
        /// The value it resolved to.
        resolved: i64,
    },

    /// Every entry in the set is muted, leaving no probability mass.
    #[error("set \"{0}\" has no selectable weight")]
    ZeroWeight(String),

    /// The set has no entries to draw from.
    #[error("set \"{0}\" is empty")]
    EmptySet(String),

    /// A reference names a set that is not part of the definition.
    #[error("undefined reference: \"{set}\" refers to unknown set \"{reference}\"")]
    UndefinedReference {
        /// Where the reference appears.
        set: String,
        /// The unresolved set name.
        reference: String,
    },

    /// A set contains itself through nested references.
    #[error("circular reference: {}", .chain.join(" -> "))]
    CircularReference {
        /// The sets along the cycle, starting and ending with the same name.
        chain: Vec<String>,
    },

    /// The registry holds no set with this name.
    #[error("unknown set: \"{0}\"")]
    UnknownSet(String),

    /// The requested frequency profile is not declared in the definition.
    #[error("unknown frequency profile: \"{0}\"")]
    UnknownFrequency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_reference_display() {
        let err = SetError::CircularReference {
            chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(err.to_string(), "circular reference: a -> b -> a");
    }

    #[test]
    fn dice_errors_convert() {
        let err: SetError = DiceError::InvalidExpression("2x6".to_string()).into();
        assert_eq!(err.to_string(), "invalid dice expression: \"2x6\"");
    }
}
