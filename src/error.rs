//! Error types for the hillcrypt library.

use thiserror::Error;

/// Errors produced by the hillcrypt library and its command-line front end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HillCryptError {
    /// Wrong number of positional arguments supplied to the CLI.
    #[error("Expected {expected} arguments, got {actual}")]
    InvalidArguments {
        /// Number of positionals the CLI requires.
        expected: usize,
        /// Number of positionals actually supplied.
        actual: usize,
    },
    /// Mode selector is not `0` (characters) or `1` (words).
    #[error("Invalid mode '{0}': expected 0 (characters) or 1 (words)")]
    InvalidMode(String),
    /// The key matrix has a zero determinant and cannot be inverted.
    #[error("Key matrix is singular (determinant is zero)")]
    SingularMatrix,
    /// Rows or sequences do not line up with the key dimension.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Length actually found.
        actual: usize,
    },
    /// Exact integer arithmetic exceeded the range of `i128`.
    #[error("Exact arithmetic overflowed")]
    ArithmeticOverflow,
    /// A fraction was built or divided with a zero denominator.
    #[error("Division by zero")]
    DivisionByZero,
    /// A numeric unit is not a valid Unicode scalar value.
    #[error("Value {0} is not a valid character code")]
    InvalidCharCode(i64),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HillCryptError>;
