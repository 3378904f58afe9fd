pub mod escape;
pub mod writer;

pub use writer::{GexfSerializer, GraphSerializer, SerializeError};
