// Solver model: variables, polynomials, constraints and the model accumulator
// consumed by the solving service

pub mod client;
pub mod constraint;
pub mod model;
pub mod poly;
pub mod variable;

pub use client::{Client, ClientError, SolveResult, SolverSolution};
pub use constraint::{
    clamp, equal_to, greater_equal, less_equal, penalty, Condition, Constraint,
};
pub use model::Model;
pub use poly::{Poly, Values};
pub use variable::{Bounds, EvaluationError, Variable, VariableGenerator, VariableType};
