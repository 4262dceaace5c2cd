use thiserror::Error;

/// Errors reported by matrix construction, algebra and elimination.
///
/// Singular matrices and systems without a solution are not errors: those
/// operations return `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Invalid dimensions {lines}x{columns}: both must be in 1..=255")]
    DimensionError { lines: usize, columns: usize },
    #[error("Expected {expected} values, got {got}")]
    ValueCountMismatch { expected: usize, got: usize },
    #[error("Dimensions not compatible: {left:?} and {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("Matrix is not square ({lines}x{columns})")]
    NotSquare { lines: usize, columns: usize },
    #[error("Matrix is not augmented")]
    NotAugmented,
    #[error("Index {index} out of range (limit {limit})")]
    IndexOutOfRange { index: usize, limit: usize },
    #[error("Expected at most one coefficient per line ({lines} lines), got {got}")]
    ArgumentCountMismatch { lines: usize, got: usize },
    #[error("Expected {expected} variable names, got {got}")]
    MissingVariableNames { expected: usize, got: usize },
    #[error("System has infinitely many solutions")]
    InfiniteSolutions,
    #[error("Cannot convert {value} to {target}")]
    ConversionFailed { value: String, target: &'static str },
    #[error("Division by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, MatrixError>;
