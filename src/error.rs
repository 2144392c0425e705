//! Error types for Sabor operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Sabor operations.
///
/// Provides detailed context about failures including dimension mismatches,
/// malformed batches, invalid hyperparameters, and mining rows with no
/// usable positive or negative candidates.
///
/// # Examples
///
/// ```
/// use sabor::error::SaborError;
///
/// let err = SaborError::DimensionMismatch {
///     expected: "8x8".to_string(),
///     actual: "8x4".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum SaborError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Embedding batch has an odd number of rows and cannot be split into
    /// paired modality halves.
    OddBatchSize {
        /// Number of rows in the offending batch
        rows: usize,
    },

    /// Embedding batch contains no rows.
    EmptyBatch,

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A mining row has no candidate of the required role.
    EmptyMiningSet {
        /// Row index in the doubled (2N-row) mining problem
        anchor: usize,
        /// Which candidate set was empty ("positive" or "negative")
        role: &'static str,
    },
}

impl fmt::Display for SaborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaborError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            SaborError::OddBatchSize { rows } => {
                write!(
                    f,
                    "batch has {rows} rows; an even count is required to split into modality halves"
                )
            }
            SaborError::EmptyBatch => write!(f, "embedding batch is empty"),
            SaborError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "invalid hyperparameter {param}={value}: must satisfy {constraint}"
                )
            }
            SaborError::EmptyMiningSet { anchor, role } => {
                write!(f, "mining row {anchor} has no {role} candidate")
            }
        }
    }
}

impl std::error::Error for SaborError {}

/// Convenience result type for Sabor operations.
pub type Result<T> = std::result::Result<T, SaborError>;
