//! # Error Types for Dendra
//!
//! Unified error handling across the dendra crates.

use thiserror::Error;

/// Main error type for dendra operations
#[derive(Error, Debug)]
pub enum DendraError {
    /// Parent array does not describe a tree
    #[error("Invalid parents: {0}")]
    InvalidParents(String),

    /// Supplied geometry does not match the morphology
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// View or accessor index beyond the number of entities
    #[error("Index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// View selection that cannot be used as a scope
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Per-cell target arrays disagree with the scope size
    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    /// Coordinates are NaN so an absolute shift cannot be computed
    #[error("Unplaced geometry in branch {branch}: run compute_xyz() or assign coordinates first")]
    UnplacedGeometry { branch: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DendraError {
    fn from(e: serde_json::Error) -> Self {
        DendraError::Serialization(e.to_string())
    }
}

/// Result type for dendra operations
pub type DendraResult<T> = Result<T, DendraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = DendraError::IndexOutOfRange { index: 4, len: 3 };
        assert_eq!(e.to_string(), "Index 4 out of range for 3 entries");

        let e = DendraError::ShapeMismatch { expected: 5, actual: 1 };
        assert_eq!(e.to_string(), "Shape mismatch: expected 5, got 1");
    }

    #[test]
    fn test_json_error_converts() {
        let err: DendraError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, DendraError::Serialization(_)));
    }
}
