use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    core::Tensor,
    graph::{
        error::{FactorError, FactorResult},
        named_factor::{NamedFactor, VertexId},
    },
};

/// Policy of checking the declared number of nonzero entries
/// against the number of supplied entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NonZeroCount {
    /// The declared count is informational and never checked
    #[default]
    Trusted,

    /// A mismatch between the declared count and the entries is an error
    Verified,
}

/// Sparse description of a discrete factor: every configuration that is
/// not listed explicitly has zero potential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseFactor {
    /// Identity of the factor
    pub id: VertexId,

    /// Identities of adjoint variables
    pub variables: Vec<VertexId>,

    /// Numbers of states per variable, same order as `variables`
    pub states: Vec<usize>,

    /// Declared number of nonzero entries
    pub non_zero_num: usize,

    /// Pairs of a flat mixed-radix index and a value
    pub entries: Vec<(usize, f64)>,
}

impl SparseFactor {
    /// Expands the description into a named factor
    #[inline]
    pub fn build(&self, policy: NonZeroCount) -> FactorResult<NamedFactor> {
        build_named_factor(
            self.id,
            self.variables.clone(),
            self.states.clone(),
            self.non_zero_num,
            &self.entries,
            policy,
        )
    }
}

/// Builds a named factor from a sparse description
///
/// # Arguments
///
/// * `id` - Identity of the factor
/// * `variables` - Identities of adjoint variables
/// * `states` - Numbers of states per variable
/// * `non_zero_num` - Declared number of nonzero entries
/// * `entries` - Pairs of a flat index and a value, a later pair
///     with the same index overwrites an earlier one
/// * `policy` - Whether `non_zero_num` is checked against `entries`
///
/// # Example
///
/// ```
/// use dfactor::graph::{build_named_factor, NonZeroCount};
///
/// let factor = build_named_factor(
///     0,
///     vec![1, 2],
///     vec![2, 3],
///     2,
///     &[(0, 1.), (5, 2.)],
///     NonZeroCount::Verified,
/// )
/// .unwrap();
/// assert_eq!(factor.potential().values(), &[1., 0., 0., 0., 0., 2.]);
/// ```
pub fn build_named_factor(
    id: VertexId,
    variables: Vec<VertexId>,
    states: Vec<usize>,
    non_zero_num: usize,
    entries: &[(usize, f64)],
    policy: NonZeroCount,
) -> FactorResult<NamedFactor> {
    if policy == NonZeroCount::Verified && non_zero_num != entries.len() {
        return Err(FactorError::NonZeroCountMismatch(
            non_zero_num,
            entries.len(),
        ));
    }
    if variables.len() != states.len() {
        return Err(FactorError::ArityMismatch(variables.len(), states.len()));
    }
    let len = Tensor::shape_len(&states)?;
    let mut values = vec![0f64; len];
    let mut written = HashSet::with_capacity(entries.len());
    for (index, value) in entries {
        let slot = values
            .get_mut(*index)
            .ok_or(FactorError::SparseIndexOutOfRange(*index, len))?;
        if !written.insert(*index) {
            trace!(id, index, "sparse entry overwritten");
        }
        *slot = *value;
    }
    debug!(
        id,
        arity = states.len(),
        len,
        entries = entries.len(),
        "sparse factor expanded"
    );
    let potential = Tensor::new(states, values)?;
    NamedFactor::new(id, variables, potential)
}
