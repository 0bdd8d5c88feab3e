//! Error types for dice parsing.

/// Errors that can occur while parsing or resolving dice notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// The text is neither dice notation nor a plain integer.
    #[error("invalid dice expression: \"{0}\"")]
    InvalidExpression(String),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
