//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use std::fmt;

use thiserror::Error;

// == Numeric Family ==
/// The arithmetic family an increment/decrement call operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericFamily {
    /// Signed or unsigned integers of any width
    Integer,
    /// `f32` or `f64`
    Float,
}

impl fmt::Display for NumericFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericFamily::Integer => write!(f, "an integer"),
            NumericFamily::Float => write!(f, "a float"),
        }
    }
}

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// Every variant is recoverable: the table is left unchanged by the call that
/// returned it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// `add` on a key that already holds a live entry
    #[error("Item {0} already exists")]
    AlreadyExists(String),

    /// Key absent or expired
    #[error("Item {0} not found")]
    NotFound(String),

    /// Arithmetic requested on a payload of another kind
    #[error("The value for {key} is not {expected}")]
    WrongType {
        key: String,
        expected: NumericFamily,
    },
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
