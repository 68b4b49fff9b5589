// HiGHS client
// Implements the amplify::Client interface on a local HiGHS instance
// Only models whose objective and constraints are at most linear can be passed

use crate::amplify::{
    Client, ClientError, Condition, Model, Poly, SolveResult, SolverSolution, Values, Variable,
    VariableType,
};
use highs::{HighsModelStatus, RowProblem, Sense};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

pub struct HighsClient;

impl HighsClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a polynomial into `(variable, coefficient)` pairs and its constant.
fn linear_parts(poly: &Poly, what: &str) -> Result<(Vec<(Variable, f64)>, f64), ClientError> {
    if poly.degree() > 1 {
        return Err(ClientError::Unsupported(format!(
            "{} has degree {}, HiGHS only accepts linear terms",
            what,
            poly.degree()
        )));
    }
    let terms = poly
        .terms()
        .filter(|(monomial, _)| monomial.len() == 1)
        .map(|(monomial, coefficient)| (monomial[0].clone(), coefficient))
        .collect();
    Ok((terms, poly.constant_term()))
}

impl Client for HighsClient {
    fn name(&self) -> &str {
        "HiGHS"
    }

    fn solve(
        &self,
        model: &Model,
        _token: &str,
        timeout: Duration,
    ) -> Result<SolveResult, ClientError> {
        let start_time = Instant::now();
        let (objective_terms, _) = linear_parts(model.objective(), "objective")?;
        let costs: HashMap<Variable, f64> = objective_terms.into_iter().collect();
        let variables = model.variables();

        // Add variables
        let mut pb = RowProblem::default();
        let mut cols = HashMap::new();
        for var in &variables {
            let cost = costs.get(var).copied().unwrap_or(0.0);
            let bounds = var.bounds();
            let lower = bounds.lower.unwrap_or(f64::NEG_INFINITY);
            let upper = bounds.upper.unwrap_or(f64::INFINITY);
            let col = match var.var_type() {
                VariableType::Binary => pb.add_integer_column(cost, 0.0..=1.0),
                VariableType::Integer => pb.add_integer_column(cost, lower..=upper),
                VariableType::Real => pb.add_column(cost, lower..=upper),
                VariableType::Ising => {
                    return Err(ClientError::Unsupported(format!(
                        "Ising variable {}",
                        var
                    )))
                }
            };
            cols.insert(var.clone(), col);
        }

        // Add constraints
        for constraint in model.constraints() {
            let (terms, constant) = linear_parts(constraint.lhs(), constraint.label())?;
            let row: Vec<_> = terms
                .iter()
                .filter_map(|(var, coefficient)| cols.get(var).map(|col| (*col, *coefficient)))
                .collect();

            let (lower, upper) = match constraint.condition() {
                Condition::EqualTo(rhs) => (rhs - constant, rhs - constant),
                Condition::LessEqual(rhs) => (f64::NEG_INFINITY, rhs - constant),
                Condition::GreaterEqual(rhs) => (rhs - constant, f64::INFINITY),
                Condition::Clamp(lo, hi) => (lo - constant, hi - constant),
                Condition::Penalty => {
                    return Err(ClientError::Unsupported(format!(
                        "penalty constraint {}",
                        constraint
                    )))
                }
            };
            pb.add_row(lower..=upper, &row);
        }

        let mut highs_model = pb.optimise(Sense::Minimise);
        highs_model.set_option("output_flag", false);
        highs_model.set_option("time_limit", timeout.as_secs_f64());
        let solved = highs_model.solve();

        debug!(
            component = "highs",
            operation = "solve",
            status = ?solved.status(),
            elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
            columns = variables.len(),
            rows = model.constraints().len(),
            "HiGHS finished"
        );

        match solved.status() {
            HighsModelStatus::Optimal => {
                let solution = solved.get_solution();
                let values: Values = variables
                    .iter()
                    .cloned()
                    .zip(solution.columns().iter().copied())
                    .collect();
                let objective = model
                    .objective()
                    .evaluate(&values)
                    .map_err(|e| ClientError::ExecutionFailed(e.to_string()))?;
                Ok(SolveResult::new(vec![SolverSolution {
                    objective,
                    values,
                    feasible: true,
                }]))
            }
            HighsModelStatus::Infeasible => Err(ClientError::NoSolution),
            HighsModelStatus::ReachedTimeLimit => Err(ClientError::Timeout(timeout)),
            status => Err(ClientError::ExecutionFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }
}
