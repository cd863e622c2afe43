use serde::{Deserialize, Serialize};

use crate::core::Variable;

/// Pair of messages carried by an edge of a factor graph
/// during one iteration, one message per direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    /// Message flowing from the source vertex to the destination vertex
    pub to_destination: Variable,

    /// Message flowing from the destination vertex back to the source vertex
    pub to_source: Variable,
}

impl Messages {
    /// Creates a pair of messages
    #[inline]
    pub fn new(to_destination: Variable, to_source: Variable) -> Self {
        Messages {
            to_destination,
            to_source,
        }
    }

    /// Creates a pair of messages over a variable with `size` states,
    /// entries of both messages are produced by `generator`
    ///
    /// # Example
    ///
    /// ```
    /// use dfactor::core::random_message_initializer;
    /// use dfactor::graph::Messages;
    /// use rand::thread_rng;
    ///
    /// let mut initializer = random_message_initializer(thread_rng());
    /// let messages = Messages::initial(3, &mut initializer);
    /// assert_eq!(messages.to_source.size(), 3);
    /// ```
    #[inline]
    pub fn initial(size: usize, generator: &mut impl FnMut() -> f64) -> Self {
        let to_destination = Variable::from_fn(size, &mut *generator);
        let to_source = Variable::from_fn(size, &mut *generator);
        Messages::new(to_destination, to_source)
    }

    /// Swaps directions of messages
    #[inline]
    pub fn reversed(self) -> Self {
        Messages {
            to_destination: self.to_source,
            to_source: self.to_destination,
        }
    }
}
