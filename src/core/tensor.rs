use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use rayon::prelude::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::core::{
    error::{AlgebraError, AlgebraResult},
    operation::{Division, Operation, Product},
    variable::Variable,
};

// ------------------------------------------------------------------------------------------

/// Projection of a flat index onto the state of a single variable.
///
/// Values are laid out in the mixed-radix order where the first variable
/// varies fastest, hence the state of a variable at position `p` for a flat
/// index `i` is `(i / stride) % states[p]` with `stride = states[0] * ... * states[p - 1]`.
#[derive(Debug, Clone, Copy)]
struct Projection {
    stride: usize,
    states: usize,
}

impl Projection {
    #[inline(always)]
    fn key(&self, flat_index: usize) -> usize {
        (flat_index / self.stride) % self.states
    }
}

// ------------------------------------------------------------------------------------------

/// A dense discrete potential over several variables stored as a flat array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTensor")]
pub struct Tensor {
    states: Vec<usize>,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawTensor {
    states: Vec<usize>,
    values: Vec<f64>,
}

impl TryFrom<RawTensor> for Tensor {
    type Error = AlgebraError;

    #[inline]
    fn try_from(raw: RawTensor) -> AlgebraResult<Self> {
        Tensor::new(raw.states, raw.values)
    }
}

impl Tensor {
    /// Creates a new tensor
    ///
    /// # Arguments
    ///
    /// * `states` - Numbers of states per variable
    /// * `values` - Flat values, the first variable's index varies fastest
    ///
    /// # Notes
    ///
    /// If some variable has zero states, the product of states overflows
    /// `usize` or the number of values does not match the product of states,
    /// the method returns an error
    ///
    /// # Example
    ///
    /// ```
    /// use dfactor::core::Tensor;
    ///
    /// let t = Tensor::new(vec![2, 3], vec![1., 2., 3., 4., 5., 6.]).unwrap();
    /// assert_eq!(t.value_at(&[1, 2]).unwrap(), 6.);
    /// assert_eq!(t.value_at(&[0, 1]).unwrap(), 3.);
    /// ```
    pub fn new(states: Vec<usize>, values: Vec<f64>) -> AlgebraResult<Self> {
        let len = Tensor::shape_len(&states)?;
        if len != values.len() {
            return Err(AlgebraError::ShapeMismatch {
                states,
                values_len: values.len(),
            });
        }
        Ok(Tensor { states, values })
    }

    /// Creates a tensor with all values equal to `value`
    #[inline]
    pub fn filled(states: Vec<usize>, value: f64) -> AlgebraResult<Self> {
        let len = Tensor::shape_len(&states)?;
        Tensor::new(states, vec![value; len])
    }

    /// Returns the flat size of a tensor with given states
    ///
    /// # Notes
    ///
    /// If some variable has zero states or the product of states
    /// overflows `usize`, the method returns an error
    pub fn shape_len(states: &[usize]) -> AlgebraResult<usize> {
        if let Some(pos) = states.iter().position(|s| *s == 0) {
            return Err(AlgebraError::ZeroStates(pos));
        }
        states
            .iter()
            .try_fold(1usize, |acc, s| acc.checked_mul(*s))
            .ok_or_else(|| AlgebraError::ShapeOverflow(states.to_vec()))
    }

    /// Returns a number of variables
    #[inline(always)]
    pub fn arity(&self) -> usize {
        self.states.len()
    }

    /// Returns numbers of states per variable
    #[inline(always)]
    pub fn states(&self) -> &[usize] {
        &self.states
    }

    /// Returns a read-only view of flat values
    #[inline(always)]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns a detached copy of flat values
    #[inline]
    pub fn snapshot_values(&self) -> Vec<f64> {
        self.values.clone()
    }

    /// Returns the total flat size
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false, a tensor holds at least one value
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a number of states of a variable at position `pos`
    #[inline]
    pub fn var_len(&self, pos: usize) -> AlgebraResult<usize> {
        self.states
            .get(pos)
            .copied()
            .ok_or(AlgebraError::OutOfRangePosition(pos, self.arity()))
    }

    /// Encodes per-variable state indices into a flat offset
    ///
    /// # Notes
    ///
    /// The last variable is the slowest digit, the first one is the fastest
    pub fn flat_index(&self, indices: &[usize]) -> AlgebraResult<usize> {
        if indices.len() != self.arity() {
            return Err(AlgebraError::IndicesLength(self.arity(), indices.len()));
        }
        for (index, states) in indices.iter().zip(&self.states) {
            if index >= states {
                return Err(AlgebraError::OutOfRangeIndex(*index, *states));
            }
        }
        let offset = indices
            .iter()
            .zip(&self.states)
            .rev()
            .fold(0, |offset, (index, states)| index + states * offset);
        Ok(offset)
    }

    /// Decodes a flat offset into per-variable state indices
    pub fn multi_index(&self, flat_index: usize) -> AlgebraResult<Vec<usize>> {
        if flat_index >= self.len() {
            return Err(AlgebraError::OutOfRangeIndex(flat_index, self.len()));
        }
        let mut rest = flat_index;
        let indices = self
            .states
            .iter()
            .map(|states| {
                let index = rest % states;
                rest /= states;
                index
            })
            .collect();
        Ok(indices)
    }

    /// Returns a value corresponding to per-variable state indices
    #[inline]
    pub fn value_at(&self, indices: &[usize]) -> AlgebraResult<f64> {
        let offset = self.flat_index(indices)?;
        Ok(self.values[offset])
    }

    /// Sums values over all variables apart from the one at position `pos`
    ///
    /// # Example
    ///
    /// ```
    /// use dfactor::core::Tensor;
    ///
    /// let t = Tensor::new(vec![2, 3], vec![1., 0., 0., 0., 0., 2.]).unwrap();
    /// assert_eq!(t.marginalize(0).unwrap().values(), &[1., 2.]);
    /// assert_eq!(t.marginalize(1).unwrap().values(), &[1., 0., 2.]);
    /// ```
    pub fn marginalize(&self, pos: usize) -> AlgebraResult<Variable> {
        let projection = self.projection(pos)?;
        Ok(self.marginalize_along(projection))
    }

    /// Returns marginals for all positions, evaluated in parallel
    pub fn marginals(&self) -> Vec<Variable> {
        (0..self.arity())
            .into_par_iter()
            .map(|pos| self.marginalize_along(self.projection_unchecked(pos)))
            .collect()
    }

    /// Combines each value with the message entry corresponding to the
    /// state of the variable at position `pos`
    ///
    /// # Arguments
    ///
    /// * `message` - A message over the variable at position `pos`
    /// * `pos` - A position of a variable
    ///
    /// # Notes
    ///
    /// If `pos` is out of range or the size of the message differs from
    /// the number of states of the variable, the method returns an error
    pub fn combine<O: Operation>(&self, message: &Variable, pos: usize) -> AlgebraResult<Tensor> {
        let projection = self.checked_projection(message, pos)?;
        let msg = message.values();
        let values = self
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| O::apply(*value, msg[projection.key(i)]))
            .collect();
        Ok(Tensor {
            states: self.states.clone(),
            values,
        })
    }

    /// Product with a message over the variable at position `pos`
    #[inline]
    pub fn product(&self, message: &Variable, pos: usize) -> AlgebraResult<Tensor> {
        self.combine::<Product>(message, pos)
    }

    /// Division by a message over the variable at position `pos`
    #[inline]
    pub fn division(&self, message: &Variable, pos: usize) -> AlgebraResult<Tensor> {
        self.combine::<Division>(message, pos)
    }

    /// Fused [`Tensor::combine`] followed by [`Tensor::marginalize`]
    /// along the same position, without materializing the combined tensor
    pub fn combine_and_marginalize<O: Operation>(
        &self,
        message: &Variable,
        pos: usize,
    ) -> AlgebraResult<Variable> {
        let projection = self.checked_projection(message, pos)?;
        let msg = message.values();
        let mut result = vec![0f64; projection.states];
        for (i, value) in self.values.iter().enumerate() {
            let key = projection.key(i);
            result[key] += O::apply(*value, msg[key]);
        }
        Ok(Variable::new(result))
    }

    /// Marginal of the product with a message
    #[inline]
    pub fn marginal_of_product(&self, message: &Variable, pos: usize) -> AlgebraResult<Variable> {
        self.combine_and_marginalize::<Product>(message, pos)
    }

    /// Marginal of the division by a message
    #[inline]
    pub fn marginal_of_division(&self, message: &Variable, pos: usize) -> AlgebraResult<Variable> {
        self.combine_and_marginalize::<Division>(message, pos)
    }

    /// Returns a copy of values as an n-dimensional array of shape `states`
    pub fn to_ndarray(&self) -> AlgebraResult<ArrayD<f64>> {
        ArrayD::from_shape_vec(IxDyn(&self.states).f(), self.values.clone()).map_err(|_| {
            AlgebraError::ShapeMismatch {
                states: self.states.clone(),
                values_len: self.values.len(),
            }
        })
    }
}

// private methods --------------------------------------------------------------------------

impl Tensor {
    #[inline(always)]
    fn projection_unchecked(&self, pos: usize) -> Projection {
        Projection {
            stride: self.states[..pos].iter().product(),
            states: self.states[pos],
        }
    }

    #[inline]
    fn projection(&self, pos: usize) -> AlgebraResult<Projection> {
        if pos >= self.arity() {
            return Err(AlgebraError::OutOfRangePosition(pos, self.arity()));
        }
        Ok(self.projection_unchecked(pos))
    }

    #[inline]
    fn checked_projection(&self, message: &Variable, pos: usize) -> AlgebraResult<Projection> {
        let projection = self.projection(pos)?;
        if projection.states != message.size() {
            return Err(AlgebraError::SizeMismatch(projection.states, message.size()));
        }
        Ok(projection)
    }

    #[inline]
    fn marginalize_along(&self, projection: Projection) -> Variable {
        let mut result = vec![0f64; projection.states];
        for (i, value) in self.values.iter().enumerate() {
            result[projection.key(i)] += value;
        }
        Variable::new(result)
    }
}
