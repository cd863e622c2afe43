mod error;
mod operation;
mod tensor;
mod variable;

pub use error::{AlgebraError, AlgebraResult};
pub use operation::{Division, Operation, Product};
pub use tensor::Tensor;
pub use variable::{random_message_initializer, Variable};
