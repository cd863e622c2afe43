/// A module containing the discrete factor algebra: tensors, messages and operations combining them
pub mod core;
/// A module containing vertex and edge payloads of a factor graph built on top of the algebra
pub mod graph;

#[cfg(test)]
mod tests;
