use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    core::{Tensor, Variable},
    graph::error::{FactorError, FactorResult},
};

/// Identity of a factor graph's vertex
pub type VertexId = u64;

/// A factor vertex of a factor graph: a potential over a list of
/// variables together with the current belief of the same shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNamedFactor")]
pub struct NamedFactor {
    id: VertexId,
    variables: Vec<VertexId>,
    potential: Tensor,
    belief: Tensor,
}

#[derive(Deserialize)]
struct RawNamedFactor {
    id: VertexId,
    variables: Vec<VertexId>,
    potential: Tensor,
    belief: Tensor,
}

impl TryFrom<RawNamedFactor> for NamedFactor {
    type Error = FactorError;

    fn try_from(raw: RawNamedFactor) -> FactorResult<Self> {
        NamedFactor::new(raw.id, raw.variables, raw.potential)?.with_belief(raw.belief)
    }
}

impl NamedFactor {
    /// Creates a new named factor, its belief starts equal to the potential
    ///
    /// # Arguments
    ///
    /// * `id` - Identity of the factor
    /// * `variables` - Identities of adjoint variables, `variables[i]`
    ///     corresponds to the `i`-th dimension of the potential
    /// * `potential` - Definition of the factor
    ///
    /// # Notes
    ///
    /// If the number of variables does not match the arity of the potential
    /// or some variable is listed twice, the method returns an error
    ///
    /// # Example
    ///
    /// ```
    /// use dfactor::core::Tensor;
    /// use dfactor::graph::NamedFactor;
    ///
    /// let potential = Tensor::new(vec![2, 2], vec![1., 2., 3., 4.]).unwrap();
    /// let factor = NamedFactor::new(7, vec![10, 20], potential).unwrap();
    /// assert_eq!(factor.position_of(20), Some(1));
    /// assert_eq!(factor.position_of(30), None);
    /// ```
    pub fn new(id: VertexId, variables: Vec<VertexId>, potential: Tensor) -> FactorResult<Self> {
        if variables.len() != potential.arity() {
            return Err(FactorError::ArityMismatch(
                variables.len(),
                potential.arity(),
            ));
        }
        for (i, var) in variables.iter().enumerate() {
            if variables[..i].contains(var) {
                return Err(FactorError::DuplicateVariable(*var));
            }
        }
        debug!(
            id,
            arity = potential.arity(),
            len = potential.len(),
            "named factor created"
        );
        let belief = potential.clone();
        Ok(NamedFactor {
            id,
            variables,
            potential,
            belief,
        })
    }

    /// Returns identity of the factor
    #[inline(always)]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Returns identities of adjoint variables in potential's order
    #[inline(always)]
    pub fn variables(&self) -> &[VertexId] {
        &self.variables
    }

    /// Returns the fixed definition of the factor
    #[inline(always)]
    pub fn potential(&self) -> &Tensor {
        &self.potential
    }

    /// Returns the current working potential
    #[inline(always)]
    pub fn belief(&self) -> &Tensor {
        &self.belief
    }

    /// Returns a position of a variable within the potential,
    /// or `None` if the variable does not participate in the factor
    #[inline]
    pub fn position_of(&self, var: VertexId) -> Option<usize> {
        self.variables.iter().position(|v| *v == var)
    }

    /// Returns a number of states of a variable,
    /// or `None` if the variable does not participate in the factor
    #[inline]
    pub fn var_len(&self, var: VertexId) -> Option<usize> {
        self.position_of(var)
            .and_then(|pos| self.potential.states().get(pos).copied())
    }

    /// Marginalizes the belief onto a variable
    ///
    /// # Notes
    ///
    /// Unlike [`NamedFactor::position_of`], an absent variable is an error here
    pub fn marginalize(&self, var: VertexId) -> FactorResult<Variable> {
        let pos = self
            .position_of(var)
            .ok_or(FactorError::UnknownVariable(var))?;
        Ok(self.belief.marginalize(pos)?)
    }

    /// Returns a copy of the factor with the belief replaced
    ///
    /// # Notes
    ///
    /// If shapes of the belief and the potential differ, the method returns an error
    pub fn with_belief(mut self, belief: Tensor) -> FactorResult<Self> {
        self.set_belief(belief)?;
        Ok(self)
    }

    /// Replaces the belief
    pub fn set_belief(&mut self, belief: Tensor) -> FactorResult<()> {
        if belief.states() != self.potential.states() {
            return Err(FactorError::BeliefShape(
                self.potential.states().to_vec(),
                belief.states().to_vec(),
            ));
        }
        self.belief = belief;
        Ok(())
    }

    /// Returns a copy of the factor whose belief is the potential again
    #[inline]
    pub fn reset_belief(&self) -> Self {
        NamedFactor {
            id: self.id,
            variables: self.variables.clone(),
            potential: self.potential.clone(),
            belief: self.potential.clone(),
        }
    }
}
