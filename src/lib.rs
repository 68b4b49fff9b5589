// Domain layer: the generic instance schema
pub mod domain;

// Solver model: the native model consumed by the solving service
pub mod amplify;

// Application layer: Instance <-> Model translation
pub mod application;

// Solver backends: Concrete implementations of amplify::Client
#[cfg(feature = "highs")]
pub mod solver;

pub mod error;

// Re-export commonly used types
pub use domain::{
    Bound, Constraint, DecisionVariable, Equality, Function, Instance, Linear, Polynomial,
    Quadratic, Sense, Solution, State, VariableKind,
};

pub use application::{model_to_instance, AmplifyAdapter, ClientConfig, InstanceBuilder};
pub use error::{AdapterError, Result};

#[cfg(feature = "highs")]
pub use solver::HighsClient;
