// Solving service interface
//
// The service receives a finished model and returns sampled assignments. How
// it reaches a solution is outside this crate; implementations only have to
// honor the timeout and report failures as `ClientError`.

use super::model::Model;
use super::poly::Values;
use std::time::Duration;

/// Errors reported by a solving service
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Solver did not finish within {0:?}")]
    Timeout(Duration),

    #[error("Solver returned no solution")]
    NoSolution,

    #[error("Model not supported by this solver: {0}")]
    Unsupported(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

/// One sampled assignment
#[derive(Debug, Clone, PartialEq)]
pub struct SolverSolution {
    pub objective: f64,
    pub values: Values,
    pub feasible: bool,
}

/// Everything a solve call produced, best sample first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveResult {
    solutions: Vec<SolverSolution>,
}

impl SolveResult {
    /// Samples are reordered: feasible before infeasible, then by objective.
    pub fn new(mut solutions: Vec<SolverSolution>) -> Self {
        solutions.sort_by(|a, b| {
            b.feasible
                .cmp(&a.feasible)
                .then(a.objective.total_cmp(&b.objective))
        });
        Self { solutions }
    }

    pub fn best(&self) -> Option<&SolverSolution> {
        self.solutions.first()
    }

    pub fn solutions(&self) -> &[SolverSolution] {
        &self.solutions
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

/// A solving service for solver models
pub trait Client {
    /// Get the name of this solver backend
    fn name(&self) -> &str;

    /// Solve `model`, giving up after `timeout`.
    fn solve(
        &self,
        model: &Model,
        token: &str,
        timeout: Duration,
    ) -> Result<SolveResult, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(objective: f64, feasible: bool) -> SolverSolution {
        SolverSolution {
            objective,
            values: Values::new(),
            feasible,
        }
    }

    #[test]
    fn best_prefers_feasible_then_lowest_objective() {
        let result = SolveResult::new(vec![
            sample(-10.0, false),
            sample(3.0, true),
            sample(1.0, true),
        ]);
        let best = result.best().unwrap();
        assert!(best.feasible);
        assert_eq!(best.objective, 1.0);
    }

    #[test]
    fn empty_result_has_no_best() {
        assert!(SolveResult::default().best().is_none());
    }
}
