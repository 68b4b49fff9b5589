// Solver model: an objective accumulated from polynomial contributions plus
// an ordered list of labeled constraints

use super::constraint::Constraint;
use super::poly::Poly;
use super::variable::Variable;
use std::ops::AddAssign;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    objective: Poly,
    constraints: Vec<Constraint>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objective(&self) -> &Poly {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn add_objective(&mut self, poly: impl Into<Poly>) {
        self.objective += poly;
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Distinct variables in first-encounter order, objective first.
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = self.objective.variables();
        for constraint in &self.constraints {
            for var in constraint.variables() {
                if !seen.contains(&var) {
                    seen.push(var);
                }
            }
        }
        seen
    }
}

impl From<Poly> for Model {
    fn from(objective: Poly) -> Self {
        Self {
            objective,
            constraints: Vec::new(),
        }
    }
}

impl From<Variable> for Model {
    fn from(var: Variable) -> Self {
        Self::from(Poly::from(var))
    }
}

impl AddAssign<Poly> for Model {
    fn add_assign(&mut self, rhs: Poly) {
        self.add_objective(rhs);
    }
}

impl AddAssign<Constraint> for Model {
    fn add_assign(&mut self, rhs: Constraint) {
        self.add_constraint(rhs);
    }
}

impl AddAssign<Vec<Constraint>> for Model {
    fn add_assign(&mut self, rhs: Vec<Constraint>) {
        self.constraints.extend(rhs);
    }
}
