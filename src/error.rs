use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire layer protocol.
pub type Result<T> = std::result::Result<T, LayerErr>;

/// The layer protocol's error type.
///
/// Every variant is a contract violation on the caller's side. None of them
/// are recoverable runtime conditions: the model definition has to change,
/// so they surface immediately instead of being silently corrected.
#[derive(Debug)]
pub enum LayerErr {
    /// A layer was constructed with a zero dimension.
    InvalidDimension { what: &'static str, got: usize },

    /// A shape invariant was violated (e.g. mismatched trailing dimensions).
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// The initialization distribution could not be built.
    BadDistribution(String),
}

impl Display for LayerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerErr::InvalidDimension { what, got } => {
                write!(f, "invalid dimension for {what}: got {got}, expected at least 1")
            }
            LayerErr::ShapeMismatch {
                what,
                got,
                expected,
            } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            LayerErr::BadDistribution(msg) => write!(f, "bad init distribution: {msg}"),
        }
    }
}

impl Error for LayerErr {}

impl From<UniformError> for LayerErr {
    fn from(value: UniformError) -> Self {
        Self::BadDistribution(value.to_string())
    }
}
