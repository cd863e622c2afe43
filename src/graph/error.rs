use std::{error::Error, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::core::AlgebraError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Errors that could appear while building or querying named factors
pub enum FactorError {
    /// A variable does not participate in a factor
    UnknownVariable(u64),

    /// A variable is listed more than once in a factor
    DuplicateVariable(u64),

    /// Number of variables does not match number of states
    ArityMismatch(usize, usize),

    /// Shape of a belief does not match shape of a potential
    BeliefShape(Vec<usize>, Vec<usize>),

    /// Declared number of nonzero entries does not match the number of supplied entries
    NonZeroCountMismatch(usize, usize),

    /// Flat index of a sparse entry is out of range of a dense potential
    SparseIndexOutOfRange(usize, usize),

    /// Error of the underlying algebra
    Algebra(AlgebraError),
}

impl Display for FactorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactorError::UnknownVariable(id) => {
                write!(f, "Variable {} does not participate in the factor", id)
            }
            FactorError::DuplicateVariable(id) => {
                write!(f, "Variable {} is listed more than once in the factor", id)
            }
            FactorError::ArityMismatch(vars, states) => write!(
                f,
                "Number of variables {} does not match the number of states {}",
                vars, states,
            ),
            FactorError::BeliefShape(potential, belief) => write!(
                f,
                "Belief of shape {:?} does not match the potential of shape {:?}",
                belief, potential,
            ),
            FactorError::NonZeroCountMismatch(expected, actual) => write!(
                f,
                "Declared {} nonzero entries, got {}",
                expected, actual,
            ),
            FactorError::SparseIndexOutOfRange(index, size) => write!(
                f,
                "Flat index {} of a sparse entry is out of range of [0..{})",
                index, size,
            ),
            FactorError::Algebra(err) => write!(f, "{}", err),
        }
    }
}

impl Error for FactorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FactorError::Algebra(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AlgebraError> for FactorError {
    #[inline]
    fn from(err: AlgebraError) -> Self {
        FactorError::Algebra(err)
    }
}

/// Named factor's methods result type
pub type FactorResult<T> = Result<T, FactorError>;
