mod error;
mod messages;
mod named_factor;
mod named_variable;
mod sparse_factor;

pub use error::{FactorError, FactorResult};
pub use messages::Messages;
pub use named_factor::{NamedFactor, VertexId};
pub use named_variable::NamedVariable;
pub use sparse_factor::{build_named_factor, NonZeroCount, SparseFactor};
