use std::fmt::Debug;

/// A binary operation combining a value of a potential (or a message)
/// with an entry of a message.
///
/// Implementors are zero-sized markers, so that a call like
/// `tensor.combine::<Product>(..)` is monomorphised and the operation
/// is inlined into the indexing loop.
pub trait Operation: Debug + Clone + Copy + Send + Sync {
    /// Applies the operation to a pair of values
    fn apply(lhs: f64, rhs: f64) -> f64;
}

// ------------------------------------------------------------------------------------------

/// Elementwise multiplication
#[derive(Debug, Clone, Copy)]
pub struct Product;

impl Operation for Product {
    #[inline(always)]
    fn apply(lhs: f64, rhs: f64) -> f64 {
        lhs * rhs
    }
}

/// Elementwise division. Zero denominators follow IEEE semantics
/// (infinity or NaN), nothing is checked.
#[derive(Debug, Clone, Copy)]
pub struct Division;

impl Operation for Division {
    #[inline(always)]
    fn apply(lhs: f64, rhs: f64) -> f64 {
        lhs / rhs
    }
}
