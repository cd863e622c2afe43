use std::{error::Error, fmt::Display};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Errors that could appear in tensor's and variable's methods
pub enum AlgebraError {
    /// Position of a variable is out of range of a tensor's arity
    OutOfRangePosition(usize, usize),

    /// Number of states expected by an operation does not match
    /// the size of a supplied message
    SizeMismatch(usize, usize),

    /// Number of values does not match the product of states
    ShapeMismatch {
        /// Per-variable numbers of states
        states: Vec<usize>,

        /// Number of supplied values
        values_len: usize,
    },

    /// A variable has zero states
    ZeroStates(usize),

    /// The product of states does not fit into `usize`
    ShapeOverflow(Vec<usize>),

    /// Number of indices does not match a tensor's arity
    IndicesLength(usize, usize),

    /// Index is out of range of a dimension
    OutOfRangeIndex(usize, usize),
}

impl Display for AlgebraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgebraError::OutOfRangePosition(pos, arity) => write!(
                f,
                "Position of a variable {} is out of range of [0..{}) positions",
                pos, arity,
            ),
            AlgebraError::SizeMismatch(expected, actual) => write!(
                f,
                "Size mismatch: expected a message of size {}, got a message of size {}",
                expected, actual,
            ),
            AlgebraError::ShapeMismatch { states, values_len } => write!(
                f,
                "Number of values {} does not match the product of states {:?}",
                values_len, states,
            ),
            AlgebraError::ZeroStates(pos) => {
                write!(f, "Variable at position {} has zero states", pos)
            }
            AlgebraError::ShapeOverflow(states) => {
                write!(f, "Product of states {:?} overflows usize", states)
            }
            AlgebraError::IndicesLength(expected, actual) => write!(
                f,
                "Expected {} indices (one per variable), got {}",
                expected, actual,
            ),
            AlgebraError::OutOfRangeIndex(index, size) => write!(
                f,
                "Index {} is out of range of [0..{})",
                index, size,
            ),
        }
    }
}

impl Error for AlgebraError {}

/// Tensor's and variable's methods result type
pub type AlgebraResult<T> = Result<T, AlgebraError>;
