use std::fmt::Display;

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::core::{
    error::{AlgebraError, AlgebraResult},
    operation::{Division, Operation, Product},
};

/// A message (or a belief) over states of a single variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    values: Vec<f64>,
}

impl Variable {
    /// Creates a new message from values, one value per state
    #[inline]
    pub fn new(values: Vec<f64>) -> Self {
        Variable { values }
    }

    /// Creates a message of a given size where every entry
    /// is produced by a generator
    ///
    /// # Arguments
    ///
    /// * `size` - A number of states
    /// * `generator` - An object producing entries, called once per state
    ///
    /// # Example
    ///
    /// ```
    /// use dfactor::core::Variable;
    ///
    /// let msg = Variable::from_fn(3, || 1f64);
    /// assert_eq!(msg.values(), &[1f64, 1f64, 1f64]);
    /// ```
    #[inline]
    pub fn from_fn(size: usize, generator: impl FnMut() -> f64) -> Self {
        let values = std::iter::repeat_with(generator).take(size).collect();
        Variable { values }
    }

    /// Creates a normalized uniform message
    #[inline]
    pub fn uniform(size: usize) -> Self {
        let value = 1f64 / size as f64;
        Variable::from_fn(size, || value)
    }

    /// Returns a number of states
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Returns an entry corresponding to the `i`-th state
    #[inline]
    pub fn state(&self, i: usize) -> AlgebraResult<f64> {
        self.values
            .get(i)
            .copied()
            .ok_or(AlgebraError::OutOfRangeIndex(i, self.size()))
    }

    /// Returns a read-only view of entries
    #[inline(always)]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns a detached copy of entries
    #[inline]
    pub fn snapshot_values(&self) -> Vec<f64> {
        self.values.clone()
    }

    /// Combines two messages elementwise
    ///
    /// # Arguments
    ///
    /// * `other` - A second message, must have the same size
    ///
    /// # Notes
    ///
    /// If sizes differ, the method returns an error
    #[inline]
    pub fn combine<O: Operation>(&self, other: &Variable) -> AlgebraResult<Variable> {
        if self.size() != other.size() {
            return Err(AlgebraError::SizeMismatch(self.size(), other.size()));
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(lhs, rhs)| O::apply(*lhs, *rhs))
            .collect();
        Ok(Variable { values })
    }

    /// Elementwise product of two messages
    #[inline]
    pub fn product(&self, other: &Variable) -> AlgebraResult<Variable> {
        self.combine::<Product>(other)
    }

    /// Elementwise division of two messages
    #[inline]
    pub fn divide(&self, other: &Variable) -> AlgebraResult<Variable> {
        self.combine::<Division>(other)
    }

    /// Sum of all entries
    #[inline]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Returns a copy scaled to unit sum. A message summing to zero
    /// is returned unchanged.
    #[inline]
    pub fn normalize(&self) -> Variable {
        let sum = self.sum();
        if sum == 0f64 {
            return self.clone();
        }
        let values = self.values.iter().map(|x| x / sum).collect();
        Variable { values }
    }

    /// Evaluates the maximal absolute difference between entries of two messages
    ///
    /// # Notes
    ///
    /// It is the discrepancy a message passing engine compares with a threshold
    /// in order to decide whether messages have converged
    #[inline]
    pub fn max_diff(&self, other: &Variable) -> AlgebraResult<f64> {
        if self.size() != other.size() {
            return Err(AlgebraError::SizeMismatch(self.size(), other.size()));
        }
        let diff = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(lhs, rhs)| (lhs - rhs).abs())
            .fold(0f64, f64::max);
        Ok(diff)
    }

    /// Joins entries into a string
    #[inline]
    pub fn render(&self, separator: &str) -> String {
        self.values
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(" "))
    }
}

impl From<Vec<f64>> for Variable {
    #[inline]
    fn from(values: Vec<f64>) -> Self {
        Variable::new(values)
    }
}

// ------------------------------------------------------------------------------------------

/// Creates a new random message entries generator.
/// A created generator samples entries at random from
/// a uniform distribution over [0, 1).
///
/// # Arguments
///
/// * `rng` - A generator of random numbers
///
/// # Example
///
/// ```
/// use dfactor::core::{random_message_initializer, Variable};
/// use rand::thread_rng;
///
/// let msg = Variable::from_fn(4, random_message_initializer(thread_rng()));
/// assert_eq!(msg.size(), 4);
/// ```
pub fn random_message_initializer(mut rng: impl Rng) -> impl FnMut() -> f64 {
    let distr = Uniform::new(0f64, 1f64);
    move || distr.sample(&mut rng)
}
