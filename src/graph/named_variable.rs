use serde::{Deserialize, Serialize};

use crate::{core::Variable, graph::named_factor::VertexId};

/// A variable vertex of a factor graph holding the current marginal estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedVariable {
    id: VertexId,
    belief: Variable,
}

impl NamedVariable {
    /// Creates a new named variable with an initial belief
    #[inline]
    pub fn new(id: VertexId, belief: Variable) -> Self {
        NamedVariable { id, belief }
    }

    /// Returns identity of the variable
    #[inline(always)]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Returns the current marginal estimate
    #[inline(always)]
    pub fn belief(&self) -> &Variable {
        &self.belief
    }

    /// Returns a copy of the variable with the belief replaced
    #[inline]
    pub fn with_belief(self, belief: Variable) -> Self {
        NamedVariable {
            id: self.id,
            belief,
        }
    }

    /// Replaces the belief
    #[inline]
    pub fn set_belief(&mut self, belief: Variable) {
        self.belief = belief;
    }
}
