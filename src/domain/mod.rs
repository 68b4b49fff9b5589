// Domain module: the generic instance schema

pub mod function;
pub mod models;
pub mod value_objects;

pub use function::*;
pub use models::*;
pub use value_objects::*;
