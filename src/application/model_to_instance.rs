// Model -> Instance: reconstructs a generic instance from a solver model
//
// The model carries no generic ids. Variables are numbered in the order they
// are first met (objective, then constraints), constraints in insertion order.

use super::translate::poly_to_polynomial;
use crate::amplify::{Condition, Model, Poly, Variable, VariableType};
use crate::domain::{
    Constraint, DecisionVariable, Equality, Function, Instance, Sense, VariableKind,
};
use crate::error::{AdapterError, Result};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub struct InstanceBuilder<'a> {
    model: &'a Model,
    variables: Vec<Variable>,
    ids: BTreeMap<Variable, u64>,
}

impl<'a> InstanceBuilder<'a> {
    pub fn new(model: &'a Model) -> Self {
        let variables = model.variables();
        let ids = variables
            .iter()
            .enumerate()
            .map(|(id, var)| (var.clone(), id as u64))
            .collect();
        Self {
            model,
            variables,
            ids,
        }
    }

    /// Fails when the model holds variables from more than one generator.
    pub fn decision_variables(&self) -> Result<Vec<DecisionVariable>> {
        if let Some(first) = self.variables.first() {
            if let Some(other) = self
                .variables
                .iter()
                .find(|var| var.generator() != first.generator())
            {
                warn!(
                    first = %first,
                    other = %other,
                    "Rejected model mixing variable generators"
                );
                return Err(AdapterError::MixedVariableGenerators(
                    first.generator(),
                    other.generator(),
                ));
            }
        }
        self.variables
            .iter()
            .enumerate()
            .map(|(id, var)| decision_variable(id as u64, var))
            .collect()
    }

    pub fn objective(&self) -> Result<Function> {
        self.polynomial(self.model.objective())
    }

    pub fn constraints(&self) -> Result<Vec<Constraint>> {
        let mut constraints = Vec::new();
        for constraint in self.model.constraints() {
            let lhs = constraint.lhs().clone();
            let normalized = match constraint.condition() {
                Condition::EqualTo(rhs) => vec![(Equality::EqualToZero, lhs - rhs)],
                Condition::LessEqual(rhs) => {
                    vec![(Equality::LessThanOrEqualToZero, lhs - rhs)]
                }
                Condition::GreaterEqual(rhs) => {
                    vec![(Equality::LessThanOrEqualToZero, -(lhs - rhs))]
                }
                Condition::Clamp(lower, upper) => vec![
                    (Equality::LessThanOrEqualToZero, lower - lhs.clone()),
                    (Equality::LessThanOrEqualToZero, lhs - upper),
                ],
                condition @ Condition::Penalty => {
                    warn!(label = constraint.label(), "Rejected constraint");
                    return Err(AdapterError::UnsupportedConstraintKind(
                        condition.to_string(),
                    ));
                }
            };

            for (equality, poly) in normalized {
                let id = constraints.len() as u64;
                let mut generic = Constraint::new(id, equality, self.polynomial(&poly)?);
                if !constraint.label().is_empty() {
                    generic = generic.with_name(constraint.label());
                }
                constraints.push(generic);
            }
        }
        Ok(constraints)
    }

    /// The service only minimizes, so the instance sense is always `Minimize`.
    pub fn build(&self) -> Result<Instance> {
        let instance = Instance::new(
            self.decision_variables()?,
            self.objective()?,
            self.constraints()?,
            Sense::Minimize,
        );
        debug!(
            component = "adapter",
            operation = "model_to_instance",
            status = "success",
            variables = instance.decision_variables.len(),
            constraints = instance.constraints.len(),
            "Built generic instance"
        );
        Ok(instance)
    }

    fn polynomial(&self, poly: &Poly) -> Result<Function> {
        Ok(poly_to_polynomial(poly, &self.ids)?.into())
    }
}

pub fn model_to_instance(model: &Model) -> Result<Instance> {
    InstanceBuilder::new(model).build()
}

fn decision_variable(id: u64, var: &Variable) -> Result<DecisionVariable> {
    let bounds = var.bounds();
    let lower = bounds.lower.unwrap_or(f64::NEG_INFINITY);
    let upper = bounds.upper.unwrap_or(f64::INFINITY);
    let mut decision_variable = match var.var_type() {
        VariableType::Binary => DecisionVariable::binary(id),
        VariableType::Integer => {
            DecisionVariable::of_kind(id, VariableKind::Integer, lower, upper)
        }
        VariableType::Real => {
            DecisionVariable::of_kind(id, VariableKind::Continuous, lower, upper)
        }
        other => {
            warn!(variable = %var, var_type = %other, "Rejected solver variable");
            return Err(AdapterError::UnsupportedVariableKind(other.to_string()));
        }
    };
    if let Some(name) = var.name() {
        decision_variable = decision_variable.with_name(name);
    }
    Ok(decision_variable)
}
