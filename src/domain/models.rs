// Generic instance schema: variables, constraints, instance and solution

use super::function::Function;
use super::value_objects::{Equality, Sense, VariableKind};
use crate::error::{AdapterError, Result};
use prost::Message;
use std::collections::BTreeMap;

/// Violations up to this magnitude still count as satisfied
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Lower and upper bound of a decision variable
#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Bound {
    #[prost(double, tag = "1")]
    pub lower: f64,
    #[prost(double, tag = "2")]
    pub upper: f64,
}

impl Bound {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }
}

/// Decision variable of a generic instance
#[derive(Clone, PartialEq, prost::Message)]
pub struct DecisionVariable {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(enumeration = "VariableKind", tag = "2")]
    pub kind: i32,
    #[prost(message, optional, tag = "3")]
    pub bound: Option<Bound>,
    #[prost(string, optional, tag = "4")]
    pub name: Option<String>,
    #[prost(int64, repeated, tag = "5")]
    pub subscripts: Vec<i64>,
}

impl DecisionVariable {
    pub fn of_kind(id: u64, kind: VariableKind, lower: f64, upper: f64) -> Self {
        Self {
            id,
            kind: kind as i32,
            bound: Some(Bound::new(lower, upper)),
            name: None,
            subscripts: Vec::new(),
        }
    }

    pub fn binary(id: u64) -> Self {
        Self::of_kind(id, VariableKind::Binary, 0.0, 1.0)
    }

    pub fn integer(id: u64, lower: f64, upper: f64) -> Self {
        Self::of_kind(id, VariableKind::Integer, lower, upper)
    }

    pub fn continuous(id: u64, lower: f64, upper: f64) -> Self {
        Self::of_kind(id, VariableKind::Continuous, lower, upper)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_subscripts(mut self, subscripts: Vec<i64>) -> Self {
        self.subscripts = subscripts;
        self
    }

    /// Bound of the variable; an absent bound means unbounded.
    pub fn bound_or_unbounded(&self) -> Bound {
        self.bound.unwrap_or_else(Bound::unbounded)
    }

    /// Display name: `name` alone, or `name_{s0, s1, ...}` when subscripted.
    pub fn label(&self) -> String {
        if self.subscripts.is_empty() {
            return self.name().to_string();
        }
        let subscripts = self
            .subscripts
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}_{{{}}}", self.name(), subscripts)
    }
}

/// Constraint `function == 0` or `function <= 0`
#[derive(Clone, PartialEq, prost::Message)]
pub struct Constraint {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(enumeration = "Equality", tag = "2")]
    pub equality: i32,
    #[prost(message, optional, tag = "3")]
    pub function: Option<Function>,
    #[prost(string, optional, tag = "4")]
    pub name: Option<String>,
}

impl Constraint {
    pub fn new(id: u64, equality: Equality, function: impl Into<Function>) -> Self {
        Self {
            id,
            equality: equality as i32,
            function: Some(function.into()),
            name: None,
        }
    }

    pub fn equal_to_zero(id: u64, function: impl Into<Function>) -> Self {
        Self::new(id, Equality::EqualToZero, function)
    }

    pub fn less_than_or_equal_to_zero(id: u64, function: impl Into<Function>) -> Self {
        Self::new(id, Equality::LessThanOrEqualToZero, function)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// `"{name} [id: {id}]"`
    pub fn label(&self) -> String {
        format!("{} [id: {}]", self.name(), self.id)
    }
}

/// Complete generic optimization instance
#[derive(Clone, PartialEq, prost::Message)]
pub struct Instance {
    #[prost(message, repeated, tag = "1")]
    pub decision_variables: Vec<DecisionVariable>,
    #[prost(message, optional, tag = "2")]
    pub objective: Option<Function>,
    #[prost(message, repeated, tag = "3")]
    pub constraints: Vec<Constraint>,
    #[prost(enumeration = "Sense", tag = "4")]
    pub sense: i32,
}

impl Instance {
    pub fn new(
        decision_variables: Vec<DecisionVariable>,
        objective: impl Into<Function>,
        constraints: Vec<Constraint>,
        sense: Sense,
    ) -> Self {
        Self {
            decision_variables,
            objective: Some(objective.into()),
            constraints,
            sense: sense as i32,
        }
    }

    pub fn decision_variable(&self, id: u64) -> Option<&DecisionVariable> {
        self.decision_variables.iter().find(|v| v.id == id)
    }

    pub fn constraint(&self, id: u64) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.id == id)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::decode(bytes)?)
    }

    /// Evaluate the objective and every constraint at `state`.
    pub fn evaluate(&self, state: &State) -> Result<Solution> {
        let objective = match &self.objective {
            Some(function) => function.evaluate(state)?,
            None => 0.0,
        };

        let mut evaluated_constraints = Vec::with_capacity(self.constraints.len());
        for constraint in &self.constraints {
            let function = constraint.function.as_ref().ok_or_else(|| {
                AdapterError::MalformedFunction(format!(
                    "constraint {} has no function",
                    constraint.label()
                ))
            })?;
            let value = function.evaluate(state)?;
            let feasible = match Equality::try_from(constraint.equality) {
                Ok(Equality::EqualToZero) => value.abs() <= FEASIBILITY_TOLERANCE,
                Ok(Equality::LessThanOrEqualToZero) => value <= FEASIBILITY_TOLERANCE,
                _ => return Err(AdapterError::UnknownEqualityKind(constraint.equality)),
            };
            evaluated_constraints.push(EvaluatedConstraint {
                id: constraint.id,
                equality: constraint.equality,
                evaluated_value: value,
                name: constraint.name.clone(),
                feasible,
            });
        }

        let feasible = evaluated_constraints.iter().all(|c| c.feasible);
        Ok(Solution {
            state: Some(state.clone()),
            objective,
            evaluated_constraints,
            feasible,
        })
    }
}

/// Assignment of values to decision variable ids
#[derive(Clone, PartialEq, prost::Message)]
pub struct State {
    #[prost(btree_map = "uint64, double", tag = "1")]
    pub entries: BTreeMap<u64, f64>,
}

impl FromIterator<(u64, f64)> for State {
    fn from_iter<T: IntoIterator<Item = (u64, f64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Constraint function value at a state
#[derive(Clone, PartialEq, prost::Message)]
pub struct EvaluatedConstraint {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(enumeration = "Equality", tag = "2")]
    pub equality: i32,
    #[prost(double, tag = "3")]
    pub evaluated_value: f64,
    #[prost(string, optional, tag = "4")]
    pub name: Option<String>,
    #[prost(bool, tag = "5")]
    pub feasible: bool,
}

/// Instance evaluated at a state
#[derive(Clone, PartialEq, prost::Message)]
pub struct Solution {
    #[prost(message, optional, tag = "1")]
    pub state: Option<State>,
    #[prost(double, tag = "2")]
    pub objective: f64,
    #[prost(message, repeated, tag = "3")]
    pub evaluated_constraints: Vec<EvaluatedConstraint>,
    #[prost(bool, tag = "4")]
    pub feasible: bool,
}

impl Solution {
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }
}
