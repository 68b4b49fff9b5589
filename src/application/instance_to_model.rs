// Instance -> Model: builds a solver model from a generic instance and decodes
// solver results back into generic solutions

use super::config::ClientConfig;
use super::translate::{ToPoly, VariableMap};
use crate::amplify::{
    self, Bounds, Client, Model, Poly, SolveResult, VariableGenerator, VariableType,
};
use crate::domain::{
    Constraint, DecisionVariable, Equality, Instance, Sense, Solution, State, VariableKind,
};
use crate::error::{AdapterError, Result};
use tracing::{debug, info, warn};

/// Solver model built from a generic instance
///
/// Construction is all-or-nothing: any unsupported input aborts it and no
/// model is exposed.
#[derive(Debug, Clone)]
pub struct AmplifyAdapter {
    instance: Instance,
    model: Model,
    variable_map: VariableMap,
}

impl AmplifyAdapter {
    pub fn new(instance: Instance) -> Result<Self> {
        let variable_map = build_variable_map(&instance)?;
        let mut model = Model::new();
        model += objective_poly(&instance, &variable_map)?;
        for constraint in &instance.constraints {
            model += constraint_to_amplify(constraint, &variable_map)?;
        }

        debug!(
            component = "adapter",
            operation = "instance_to_model",
            status = "success",
            variables = variable_map.len(),
            constraints = model.constraints().len(),
            "Built solver model"
        );

        Ok(Self {
            instance,
            model,
            variable_map,
        })
    }

    /// Build the model for `instance`, solve it with `client` and evaluate
    /// the best sample against the instance.
    ///
    /// The token is checked before anything is built or sent.
    pub fn solve(
        instance: Instance,
        client: &dyn Client,
        config: &ClientConfig,
    ) -> Result<Solution> {
        let token = config.token()?;
        let adapter = Self::new(instance)?;

        info!(
            solver = client.name(),
            timeout_ms = config.timeout.as_millis() as u64,
            "Sending model to solver"
        );
        let result = client.solve(&adapter.model, token, config.timeout)?;
        info!(
            solver = client.name(),
            samples = result.solutions().len(),
            "Solver returned"
        );

        adapter.decode(&result)
    }

    /// The built model (read-only)
    pub fn solver_input(&self) -> &Model {
        &self.model
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn variable_map(&self) -> &VariableMap {
        &self.variable_map
    }

    pub fn decode(&self, result: &SolveResult) -> Result<Solution> {
        let state = self.decode_to_state(result)?;
        self.instance.evaluate(&state)
    }

    /// Value of every mapped variable in the best sample, keyed by generic id.
    pub fn decode_to_state(&self, result: &SolveResult) -> Result<State> {
        let best = result.best().ok_or_else(|| {
            AdapterError::StateConstructionError("result contains no solution".to_string())
        })?;

        self.variable_map
            .iter()
            .map(|(id, var)| {
                var.evaluate(&best.values)
                    .map(|value| (id, value))
                    .map_err(|e| AdapterError::StateConstructionError(e.to_string()))
            })
            .collect()
    }
}

fn build_variable_map(instance: &Instance) -> Result<VariableMap> {
    let mut gen = VariableGenerator::new();
    let mut variable_map = VariableMap::new();
    for var in &instance.decision_variables {
        let var_type = variable_type(var)?;
        let bounds = match var_type {
            VariableType::Binary => Bounds::unbounded(),
            _ => {
                let bound = var.bound_or_unbounded();
                Bounds::new(bound.lower, bound.upper)
            }
        };
        let amplify_var = gen.scalar(var_type, bounds, Some(var.label()));
        variable_map.insert(var.id, amplify_var)?;
    }
    Ok(variable_map)
}

fn variable_type(var: &DecisionVariable) -> Result<VariableType> {
    match VariableKind::try_from(var.kind) {
        Ok(VariableKind::Binary) => Ok(VariableType::Binary),
        Ok(VariableKind::Integer) => Ok(VariableType::Integer),
        Ok(VariableKind::Continuous) => Ok(VariableType::Real),
        Ok(kind) => {
            warn!(id = var.id, kind = %kind, "Rejected decision variable");
            Err(AdapterError::UnsupportedVariableKind(kind.to_string()))
        }
        Err(_) => {
            warn!(id = var.id, kind = var.kind, "Rejected decision variable");
            Err(AdapterError::UnsupportedVariableKind(var.kind.to_string()))
        }
    }
}

/// The service only minimizes, so a maximized objective is negated.
fn objective_poly(instance: &Instance, variable_map: &VariableMap) -> Result<Poly> {
    let objective = match &instance.objective {
        Some(function) => function.to_poly(variable_map)?,
        None => Poly::new(),
    };
    match Sense::try_from(instance.sense) {
        Ok(Sense::Minimize) => Ok(objective),
        Ok(Sense::Maximize) => Ok(-objective),
        _ => Err(AdapterError::UnknownSense(instance.sense)),
    }
}

fn constraint_to_amplify(
    constraint: &Constraint,
    variable_map: &VariableMap,
) -> Result<amplify::Constraint> {
    let function = constraint.function.as_ref().ok_or_else(|| {
        AdapterError::MalformedFunction(format!(
            "constraint {} has no function",
            constraint.label()
        ))
    })?;
    let poly = function.to_poly(variable_map)?;
    let amplify_constraint = match Equality::try_from(constraint.equality) {
        Ok(Equality::EqualToZero) => amplify::equal_to(poly, 0.0),
        Ok(Equality::LessThanOrEqualToZero) => amplify::less_equal(poly, 0.0),
        _ => return Err(AdapterError::UnknownEqualityKind(constraint.equality)),
    };
    Ok(amplify_constraint.with_label(constraint.label()))
}
