//! Error types for layout-mode text state tracking.
//!
//! Decode fallbacks are recovered locally and never show up here. Operators the
//! interpreter does not model are ignored rather than reported.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while replaying a content stream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Text bytes were decoded before any font was selected
    #[error("Font not set: is the content stream missing a Tf operator?")]
    FontNotSet,

    /// A text snapshot was requested before font and font size were both set
    #[error("Font and font size not set: is the content stream missing a Tf operator?")]
    FontStateIncomplete,

    /// Tf referenced a font resource the caller did not provide
    #[error("Unknown font resource: /{0}")]
    UnknownFont(String),

    /// Operator received an operand list it cannot use
    #[error("Operator '{operator}' expects {expected} operands, got {found}")]
    InvalidOperands {
        /// Operator name
        operator: String,
        /// Accepted operand counts
        expected: &'static str,
        /// Operand count actually supplied
        found: usize,
    },
}
