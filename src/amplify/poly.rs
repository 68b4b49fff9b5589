// Solver-side polynomial expressions
//
// Terms are keyed by their monomial, the sorted list of variables in the
// product, so the same expression is stored identically no matter in which
// order its factors were multiplied. The empty monomial is the constant term.

use super::variable::{EvaluationError, Variable};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Poly {
    terms: BTreeMap<Vec<Variable>, f64>,
}

impl Poly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: f64) -> Self {
        let mut poly = Self::new();
        poly.add_term(Vec::new(), value);
        poly
    }

    /// Add `coefficient * Π monomial`, merging with an existing equal term.
    pub fn add_term(&mut self, mut monomial: Vec<Variable>, coefficient: f64) {
        if coefficient == 0.0 {
            return;
        }
        monomial.sort();
        match self.terms.entry(monomial) {
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += coefficient;
                if *entry.get() == 0.0 {
                    entry.remove();
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(coefficient);
            }
        }
    }

    pub fn terms(&self) -> impl Iterator<Item = (&[Variable], f64)> {
        self.terms.iter().map(|(m, c)| (m.as_slice(), *c))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn constant_term(&self) -> f64 {
        self.terms.get(&Vec::new()).copied().unwrap_or(0.0)
    }

    /// Largest monomial length (0 for a constant).
    pub fn degree(&self) -> usize {
        self.terms.keys().map(Vec::len).max().unwrap_or(0)
    }

    /// Distinct variables in first-encounter order over the stored terms.
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = Vec::new();
        for monomial in self.terms.keys() {
            for var in monomial {
                if !seen.contains(var) {
                    seen.push(var.clone());
                }
            }
        }
        seen
    }

    pub fn evaluate(&self, values: &Values) -> Result<f64, EvaluationError> {
        let mut total = 0.0;
        for (monomial, coefficient) in &self.terms {
            let mut term = *coefficient;
            for var in monomial {
                term *= var.evaluate(values)?;
            }
            total += term;
        }
        Ok(total)
    }

    fn multiply(&self, other: &Poly) -> Poly {
        let mut product = Poly::new();
        for (lhs, a) in &self.terms {
            for (rhs, b) in &other.terms {
                let mut monomial = Vec::with_capacity(lhs.len() + rhs.len());
                monomial.extend_from_slice(lhs);
                monomial.extend_from_slice(rhs);
                product.add_term(monomial, a * b);
            }
        }
        product
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (monomial, coefficient)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", if *coefficient < 0.0 { "-" } else { "+" })?;
            } else if *coefficient < 0.0 {
                write!(f, "-")?;
            }
            let magnitude = coefficient.abs();
            if monomial.is_empty() || magnitude != 1.0 {
                write!(f, "{}", magnitude)?;
            }
            for (j, var) in monomial.iter().enumerate() {
                if j > 0 || magnitude != 1.0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", var)?;
            }
        }
        Ok(())
    }
}

impl From<f64> for Poly {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl From<Variable> for Poly {
    fn from(var: Variable) -> Self {
        let mut poly = Self::new();
        poly.add_term(vec![var], 1.0);
        poly
    }
}

impl From<&Variable> for Poly {
    fn from(var: &Variable) -> Self {
        Self::from(var.clone())
    }
}

impl From<&Poly> for Poly {
    fn from(poly: &Poly) -> Self {
        poly.clone()
    }
}

// ── Operator overloads ──────────────────────────────────────

impl<T: Into<Poly>> AddAssign<T> for Poly {
    fn add_assign(&mut self, rhs: T) {
        for (monomial, coefficient) in rhs.into().terms {
            self.add_term(monomial, coefficient);
        }
    }
}

impl<T: Into<Poly>> SubAssign<T> for Poly {
    fn sub_assign(&mut self, rhs: T) {
        *self += -rhs.into();
    }
}

impl<T: Into<Poly>> Add<T> for Poly {
    type Output = Poly;

    fn add(mut self, rhs: T) -> Self::Output {
        self += rhs;
        self
    }
}

impl<T: Into<Poly>> Sub<T> for Poly {
    type Output = Poly;

    fn sub(mut self, rhs: T) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<T: Into<Poly>> Mul<T> for Poly {
    type Output = Poly;

    fn mul(self, rhs: T) -> Self::Output {
        self.multiply(&rhs.into())
    }
}

impl Neg for Poly {
    type Output = Poly;

    fn neg(mut self) -> Self::Output {
        for coefficient in self.terms.values_mut() {
            *coefficient = -*coefficient;
        }
        self
    }
}

macro_rules! impl_variable_ops {
    ($($lhs:ty),*) => {
        $(
            impl<T: Into<Poly>> Add<T> for $lhs {
                type Output = Poly;

                fn add(self, rhs: T) -> Self::Output {
                    Poly::from(self) + rhs
                }
            }

            impl<T: Into<Poly>> Sub<T> for $lhs {
                type Output = Poly;

                fn sub(self, rhs: T) -> Self::Output {
                    Poly::from(self) - rhs
                }
            }

            impl<T: Into<Poly>> Mul<T> for $lhs {
                type Output = Poly;

                fn mul(self, rhs: T) -> Self::Output {
                    Poly::from(self) * rhs
                }
            }

            impl Neg for $lhs {
                type Output = Poly;

                fn neg(self) -> Self::Output {
                    -Poly::from(self)
                }
            }
        )*
    };
}

impl_variable_ops!(Variable, &Variable);

macro_rules! impl_scalar_lhs_ops {
    ($($rhs:ty),*) => {
        $(
            impl Add<$rhs> for f64 {
                type Output = Poly;

                fn add(self, rhs: $rhs) -> Self::Output {
                    Poly::from(self) + rhs
                }
            }

            impl Sub<$rhs> for f64 {
                type Output = Poly;

                fn sub(self, rhs: $rhs) -> Self::Output {
                    Poly::from(self) - rhs
                }
            }

            impl Mul<$rhs> for f64 {
                type Output = Poly;

                fn mul(self, rhs: $rhs) -> Self::Output {
                    Poly::from(self) * rhs
                }
            }
        )*
    };
}

impl_scalar_lhs_ops!(Poly, Variable, &Variable);

/// Raw result sample: a value per solver variable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    entries: BTreeMap<Variable, f64>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, var: &Variable, value: f64) {
        self.entries.insert(var.clone(), value);
    }

    pub fn get(&self, var: &Variable) -> Option<f64> {
        self.entries.get(var).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, f64)> {
        self.entries.iter().map(|(v, x)| (v, *x))
    }
}

impl FromIterator<(Variable, f64)> for Values {
    fn from_iter<T: IntoIterator<Item = (Variable, f64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
