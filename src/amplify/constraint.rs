// Solver-side constraints: a polynomial left-hand side and a condition on it

use super::poly::Poly;
use super::variable::Variable;
use std::fmt;

/// Condition imposed on the left-hand side of a constraint
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// lhs == rhs
    EqualTo(f64),
    /// lhs <= rhs
    LessEqual(f64),
    /// lhs >= rhs
    GreaterEqual(f64),
    /// lower <= lhs <= upper
    Clamp(f64, f64),
    /// lhs is itself the penalty to minimize, no comparison attached
    Penalty,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::EqualTo(rhs) => write!(f, "== {}", rhs),
            Condition::LessEqual(rhs) => write!(f, "<= {}", rhs),
            Condition::GreaterEqual(rhs) => write!(f, ">= {}", rhs),
            Condition::Clamp(lower, upper) => write!(f, "in [{}, {}]", lower, upper),
            Condition::Penalty => write!(f, "penalty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    lhs: Poly,
    condition: Condition,
    label: String,
}

impl Constraint {
    pub fn new(lhs: impl Into<Poly>, condition: Condition) -> Self {
        Self {
            lhs: lhs.into(),
            condition,
            label: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn lhs(&self) -> &Poly {
        &self.lhs
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.lhs.variables()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.label.is_empty() {
            write!(f, "{}: ", self.label)?;
        }
        write!(f, "{} {}", self.lhs, self.condition)
    }
}

pub fn equal_to(lhs: impl Into<Poly>, rhs: f64) -> Constraint {
    Constraint::new(lhs, Condition::EqualTo(rhs))
}

pub fn less_equal(lhs: impl Into<Poly>, rhs: f64) -> Constraint {
    Constraint::new(lhs, Condition::LessEqual(rhs))
}

pub fn greater_equal(lhs: impl Into<Poly>, rhs: f64) -> Constraint {
    Constraint::new(lhs, Condition::GreaterEqual(rhs))
}

pub fn clamp(lhs: impl Into<Poly>, (lower, upper): (f64, f64)) -> Constraint {
    Constraint::new(lhs, Condition::Clamp(lower, upper))
}

pub fn penalty(lhs: impl Into<Poly>) -> Constraint {
    Constraint::new(lhs, Condition::Penalty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amplify::variable::{Bounds, VariableGenerator};

    #[test]
    fn builders_set_condition_and_label() {
        let mut gen = VariableGenerator::new();
        let w = gen.real("w", Bounds::unbounded());
        let c = clamp(&w, (16.0, 17.0)).with_label("range");
        assert_eq!(c.condition(), Condition::Clamp(16.0, 17.0));
        assert_eq!(c.label(), "range");
        assert_eq!(c.variables(), vec![w]);
    }

    #[test]
    fn display_shows_label_and_relation() {
        let mut gen = VariableGenerator::new();
        let x = gen.binary("x");
        let c = less_equal(2.0 * &x, 1.0).with_label("cap");
        assert_eq!(c.to_string(), "cap: 2 x <= 1");
    }
}
