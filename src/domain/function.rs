// Generic functions of the instance schema
//
// A `Function` holds exactly one representation: a constant, a linear
// function, a sparse quadratic function or an arbitrary-degree polynomial.

use super::models::State;
use crate::error::{AdapterError, Result};
use std::collections::BTreeMap;

/// Monomial (sorted variable ids) to coefficient
///
/// The empty monomial is the constant term. Zero coefficients are never
/// stored.
pub type TermMap = BTreeMap<Vec<u64>, f64>;

/// `coefficient * x[id]`
#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct LinearTerm {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(double, tag = "2")]
    pub coefficient: f64,
}

/// Linear function `Σ coefficient * x[id] + constant`
#[derive(Clone, PartialEq, prost::Message)]
pub struct Linear {
    #[prost(message, repeated, tag = "1")]
    pub terms: Vec<LinearTerm>,
    #[prost(double, tag = "2")]
    pub constant: f64,
}

/// Sparse quadratic function `Σ values[k] * x[rows[k]] * x[columns[k]] + linear`
#[derive(Clone, PartialEq, prost::Message)]
pub struct Quadratic {
    #[prost(uint64, repeated, tag = "1")]
    pub columns: Vec<u64>,
    #[prost(uint64, repeated, tag = "2")]
    pub rows: Vec<u64>,
    #[prost(double, repeated, tag = "3")]
    pub values: Vec<f64>,
    #[prost(message, optional, tag = "4")]
    pub linear: Option<Linear>,
}

/// Product of the variables in `ids`, scaled by `coefficient`
#[derive(Clone, PartialEq, prost::Message)]
pub struct Monomial {
    #[prost(uint64, repeated, tag = "1")]
    pub ids: Vec<u64>,
    #[prost(double, tag = "2")]
    pub coefficient: f64,
}

/// Polynomial of arbitrary degree
#[derive(Clone, PartialEq, prost::Message)]
pub struct Polynomial {
    #[prost(message, repeated, tag = "1")]
    pub terms: Vec<Monomial>,
}

/// A generic function: exactly one of the representations above
#[derive(Clone, PartialEq, prost::Message)]
pub struct Function {
    #[prost(oneof = "FunctionKind", tags = "1, 2, 3, 4")]
    pub kind: Option<FunctionKind>,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum FunctionKind {
    #[prost(double, tag = "1")]
    Constant(f64),
    #[prost(message, tag = "2")]
    Linear(Linear),
    #[prost(message, tag = "3")]
    Quadratic(Quadratic),
    #[prost(message, tag = "4")]
    Polynomial(Polynomial),
}

fn accumulate(terms: &mut TermMap, mut ids: Vec<u64>, coefficient: f64) {
    if coefficient == 0.0 {
        return;
    }
    ids.sort_unstable();
    *terms.entry(ids).or_insert(0.0) += coefficient;
}

fn drop_zeros(mut terms: TermMap) -> TermMap {
    terms.retain(|_, c| *c != 0.0);
    terms
}

impl Linear {
    pub fn new(terms: impl IntoIterator<Item = (u64, f64)>, constant: f64) -> Self {
        Self {
            terms: terms
                .into_iter()
                .map(|(id, coefficient)| LinearTerm { id, coefficient })
                .collect(),
            constant,
        }
    }

    pub fn to_terms(&self) -> TermMap {
        let mut terms = TermMap::new();
        for term in &self.terms {
            accumulate(&mut terms, vec![term.id], term.coefficient);
        }
        accumulate(&mut terms, Vec::new(), self.constant);
        drop_zeros(terms)
    }
}

impl Quadratic {
    pub fn new(
        columns: Vec<u64>,
        rows: Vec<u64>,
        values: Vec<f64>,
        linear: Option<Linear>,
    ) -> Self {
        Self {
            columns,
            rows,
            values,
            linear,
        }
    }

    /// Sparse entries as `(row, column, value)`.
    ///
    /// Fails when the three parallel arrays differ in length.
    pub fn entries(&self) -> Result<Vec<(u64, u64, f64)>> {
        if self.columns.len() != self.rows.len() || self.rows.len() != self.values.len() {
            return Err(AdapterError::MalformedFunction(format!(
                "quadratic has {} columns, {} rows and {} values",
                self.columns.len(),
                self.rows.len(),
                self.values.len()
            )));
        }
        Ok(self
            .rows
            .iter()
            .zip(&self.columns)
            .zip(&self.values)
            .map(|((row, col), value)| (*row, *col, *value))
            .collect())
    }

    pub fn to_terms(&self) -> Result<TermMap> {
        let mut terms = TermMap::new();
        for (row, col, value) in self.entries()? {
            accumulate(&mut terms, vec![row, col], value);
        }
        if let Some(linear) = &self.linear {
            for (ids, coefficient) in linear.to_terms() {
                accumulate(&mut terms, ids, coefficient);
            }
        }
        Ok(drop_zeros(terms))
    }
}

impl Polynomial {
    pub fn new(terms: impl IntoIterator<Item = (Vec<u64>, f64)>) -> Self {
        Self {
            terms: terms
                .into_iter()
                .map(|(ids, coefficient)| Monomial { ids, coefficient })
                .collect(),
        }
    }

    pub fn to_terms(&self) -> TermMap {
        let mut terms = TermMap::new();
        for monomial in &self.terms {
            accumulate(&mut terms, monomial.ids.clone(), monomial.coefficient);
        }
        drop_zeros(terms)
    }
}

impl Function {
    pub fn constant(value: f64) -> Self {
        Self {
            kind: Some(FunctionKind::Constant(value)),
        }
    }

    /// Canonical term map of this function, whatever its representation.
    pub fn to_terms(&self) -> Result<TermMap> {
        match &self.kind {
            Some(FunctionKind::Constant(value)) => {
                let mut terms = TermMap::new();
                accumulate(&mut terms, Vec::new(), *value);
                Ok(terms)
            }
            Some(FunctionKind::Linear(linear)) => Ok(linear.to_terms()),
            Some(FunctionKind::Quadratic(quadratic)) => quadratic.to_terms(),
            Some(FunctionKind::Polynomial(polynomial)) => Ok(polynomial.to_terms()),
            None => Err(AdapterError::MalformedFunction(
                "no representation is set".to_string(),
            )),
        }
    }

    /// Value of this function at `state`.
    pub fn evaluate(&self, state: &State) -> Result<f64> {
        let mut value = 0.0;
        for (ids, coefficient) in self.to_terms()? {
            let mut term = coefficient;
            for id in ids {
                term *= state
                    .entries
                    .get(&id)
                    .ok_or(AdapterError::MissingStateEntry(id))?;
            }
            value += term;
        }
        Ok(value)
    }
}

impl From<f64> for Function {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl From<Linear> for Function {
    fn from(linear: Linear) -> Self {
        Self {
            kind: Some(FunctionKind::Linear(linear)),
        }
    }
}

impl From<Quadratic> for Function {
    fn from(quadratic: Quadratic) -> Self {
        Self {
            kind: Some(FunctionKind::Quadratic(quadratic)),
        }
    }
}

impl From<Polynomial> for Function {
    fn from(polynomial: Polynomial) -> Self {
        Self {
            kind: Some(FunctionKind::Polynomial(polynomial)),
        }
    }
}
