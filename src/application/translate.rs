// Polynomial translation between generic functions and solver polynomials
//
// Generic -> solver dispatches on the function representation; solver ->
// generic always yields a `Polynomial`, whatever the degree of each term.

use crate::amplify::{Poly, Variable};
use crate::domain::{Function, FunctionKind, Linear, Polynomial, Quadratic, TermMap};
use crate::error::{AdapterError, Result};
use std::collections::{BTreeMap, HashMap};

/// Generic variable id to solver variable, in instance order
#[derive(Debug, Clone, Default)]
pub struct VariableMap {
    entries: Vec<(u64, Variable)>,
    positions: HashMap<u64, usize>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u64, var: Variable) -> Result<()> {
        if self.positions.contains_key(&id) {
            return Err(AdapterError::DuplicateVariableId(id));
        }
        self.positions.insert(id, self.entries.len());
        self.entries.push((id, var));
        Ok(())
    }

    pub fn get(&self, id: u64) -> Result<&Variable> {
        self.positions
            .get(&id)
            .map(|&i| &self.entries[i].1)
            .ok_or(AdapterError::UndefinedVariableId(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &Variable)> {
        self.entries.iter().map(|(id, var)| (*id, var))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Translation of a generic function into a solver polynomial
pub trait ToPoly {
    fn to_poly(&self, variables: &VariableMap) -> Result<Poly>;
}

impl ToPoly for f64 {
    fn to_poly(&self, _variables: &VariableMap) -> Result<Poly> {
        Ok(Poly::constant(*self))
    }
}

impl ToPoly for Linear {
    fn to_poly(&self, variables: &VariableMap) -> Result<Poly> {
        let mut poly = Poly::constant(self.constant);
        for term in &self.terms {
            poly += term.coefficient * variables.get(term.id)?;
        }
        Ok(poly)
    }
}

impl ToPoly for Quadratic {
    fn to_poly(&self, variables: &VariableMap) -> Result<Poly> {
        let mut poly = Poly::new();
        for (row, col, value) in self.entries()? {
            poly += value * variables.get(row)? * variables.get(col)?;
        }
        if let Some(linear) = &self.linear {
            poly += linear.to_poly(variables)?;
        }
        Ok(poly)
    }
}

impl ToPoly for Polynomial {
    fn to_poly(&self, variables: &VariableMap) -> Result<Poly> {
        let mut poly = Poly::new();
        for monomial in &self.terms {
            let mut term = Poly::constant(monomial.coefficient);
            for id in &monomial.ids {
                term = term * variables.get(*id)?;
            }
            poly += term;
        }
        Ok(poly)
    }
}

impl ToPoly for Function {
    fn to_poly(&self, variables: &VariableMap) -> Result<Poly> {
        match &self.kind {
            Some(FunctionKind::Constant(value)) => value.to_poly(variables),
            Some(FunctionKind::Linear(linear)) => linear.to_poly(variables),
            Some(FunctionKind::Quadratic(quadratic)) => quadratic.to_poly(variables),
            Some(FunctionKind::Polynomial(polynomial)) => polynomial.to_poly(variables),
            None => Err(AdapterError::MalformedFunction(
                "no representation is set".to_string(),
            )),
        }
    }
}

/// Translate a solver polynomial into a generic polynomial.
///
/// `ids` assigns each solver variable its generic id; monomials are rewritten
/// as sorted id tuples.
pub fn poly_to_polynomial(poly: &Poly, ids: &BTreeMap<Variable, u64>) -> Result<Polynomial> {
    let mut terms = TermMap::new();
    for (monomial, coefficient) in poly.terms() {
        let mut key = monomial
            .iter()
            .map(|var| {
                ids.get(var).copied().ok_or_else(|| {
                    AdapterError::MalformedFunction(format!(
                        "variable {} is not part of the model",
                        var
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        key.sort_unstable();
        *terms.entry(key).or_insert(0.0) += coefficient;
    }
    Ok(Polynomial::new(terms.into_iter().filter(|(_, c)| *c != 0.0)))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::amplify::{Bounds, VariableGenerator};

    fn map_of(vars: &[Variable]) -> VariableMap {
        let mut map = VariableMap::new();
        for (id, var) in vars.iter().enumerate() {
            map.insert(id as u64, var.clone()).unwrap();
        }
        map
    }

    fn setup() -> (Vec<Variable>, VariableMap) {
        let mut gen = VariableGenerator::new();
        let vars = vec![
            gen.binary("x"),
            gen.integer("y", Bounds::new(-20.0, 20.0)),
            gen.real("z", Bounds::new(-30.0, 30.0)),
        ];
        let map = map_of(&vars);
        (vars, map)
    }

    #[test]
    fn linear_adds_constant_and_terms() {
        let (v, map) = setup();
        let poly = Linear::new([(0, 6.0), (1, 7.0), (2, 8.0)], -9.0)
            .to_poly(&map)
            .unwrap();
        assert_eq!(poly, 6.0 * &v[0] + 7.0 * &v[1] + 8.0 * &v[2] - 9.0);
    }

    #[test]
    fn quadratic_includes_linear_part() {
        let (v, map) = setup();
        let quadratic = Quadratic::new(
            vec![0, 1, 0],
            vec![1, 2, 2],
            vec![10.0, 11.0, 12.0],
            Some(Linear::new([], -13.0)),
        );
        let poly = quadratic.to_poly(&map).unwrap();
        let expected =
            10.0 * &v[0] * &v[1] + 11.0 * &v[1] * &v[2] + 12.0 * &v[0] * &v[2] - 13.0;
        assert_eq!(poly, expected);
    }

    #[test]
    fn polynomial_empty_monomial_is_constant() {
        let (v, map) = setup();
        let poly = Polynomial::new([(vec![0, 1, 2], 2.0), (vec![], 5.0)])
            .to_poly(&map)
            .unwrap();
        assert_eq!(poly, 2.0 * &v[0] * &v[1] * &v[2] + 5.0);
    }

    #[test]
    fn unset_function_is_malformed() {
        let (_, map) = setup();
        let err = Function::default().to_poly(&map).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedFunction(_)));
    }

    #[test]
    fn unknown_id_is_reported() {
        let (_, map) = setup();
        let err = Linear::new([(9, 1.0)], 0.0).to_poly(&map).unwrap_err();
        assert!(matches!(err, AdapterError::UndefinedVariableId(9)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let (v, mut map) = setup();
        let err = map.insert(0, v[1].clone()).unwrap_err();
        assert!(matches!(err, AdapterError::DuplicateVariableId(0)));
    }

    #[test]
    fn inverse_sorts_ids_of_each_monomial() {
        let (v, _) = setup();
        // generic ids deliberately reverse the generator order
        let ids: BTreeMap<Variable, u64> =
            [(v[0].clone(), 2), (v[1].clone(), 1), (v[2].clone(), 0)]
                .into_iter()
                .collect();
        let poly = 3.0 * &v[0] * &v[1] + &v[2] + 1.0;
        let terms = poly_to_polynomial(&poly, &ids).unwrap().to_terms();
        let expected: TermMap = [(vec![], 1.0), (vec![0], 1.0), (vec![1, 2], 3.0)]
            .into_iter()
            .collect();
        assert_eq!(terms, expected);
    }
}
