// Solver-side decision variables
//
// A `Variable` is a cheap shared handle. Its identity is the pair of the
// issuing `VariableGenerator` and the index that generator assigned to it.

use super::poly::Values;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

static NEXT_GENERATOR: AtomicU64 = AtomicU64::new(0);

/// Variable type understood by the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// x ∈ {0, 1}
    Binary,
    /// x ∈ ℤ
    Integer,
    /// x ∈ ℝ
    Real,
    /// s ∈ {-1, 1}
    Ising,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableType::Binary => write!(f, "Binary"),
            VariableType::Integer => write!(f, "Integer"),
            VariableType::Real => write!(f, "Real"),
            VariableType::Ising => write!(f, "Ising"),
        }
    }
}

/// Optional lower and upper bound
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
struct VariableInfo {
    generator: u64,
    index: u32,
    var_type: VariableType,
    bounds: Bounds,
    name: Option<String>,
}

/// Handle to a solver variable
#[derive(Clone)]
pub struct Variable(Arc<VariableInfo>);

impl Variable {
    pub fn index(&self) -> u32 {
        self.0.index
    }

    /// Id of the generator that issued this variable.
    pub fn generator(&self) -> u64 {
        self.0.generator
    }

    fn key(&self) -> (u64, u32) {
        (self.0.generator, self.0.index)
    }

    pub fn var_type(&self) -> VariableType {
        self.0.var_type
    }

    pub fn bounds(&self) -> Bounds {
        self.0.bounds
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Value of this variable in a result sample.
    pub fn evaluate(&self, values: &Values) -> Result<f64, EvaluationError> {
        values
            .get(self)
            .ok_or_else(|| EvaluationError::MissingValue(self.to_string()))
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Variable {}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("generator", &self.0.generator)
            .field("index", &self.0.index)
            .field("type", &self.0.var_type)
            .field("bounds", &self.0.bounds)
            .field("name", &self.0.name)
            .finish()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) if !name.is_empty() => write!(f, "{}", name),
            _ => write!(f, "q_{}", self.index()),
        }
    }
}

/// Failure to evaluate an expression against a result sample
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("no value for variable {0}")]
    MissingValue(String),
}

/// Issues variables with contiguous indices
///
/// Every generator has a process-wide unique id, so variables issued by
/// different generators never compare equal.
#[derive(Debug)]
pub struct VariableGenerator {
    id: u64,
    next_index: u32,
}

impl Default for VariableGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableGenerator {
    pub fn new() -> Self {
        Self {
            id: NEXT_GENERATOR.fetch_add(1, AtomicOrdering::Relaxed),
            next_index: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Create one variable. Binary and Ising variables ignore `bounds`.
    pub fn scalar(
        &mut self,
        var_type: VariableType,
        bounds: Bounds,
        name: Option<String>,
    ) -> Variable {
        let bounds = match var_type {
            VariableType::Binary | VariableType::Ising => Bounds::unbounded(),
            VariableType::Integer | VariableType::Real => bounds,
        };
        let index = self.next_index;
        self.next_index += 1;
        Variable(Arc::new(VariableInfo {
            generator: self.id,
            index,
            var_type,
            bounds,
            name,
        }))
    }

    pub fn binary(&mut self, name: impl Into<String>) -> Variable {
        self.scalar(VariableType::Binary, Bounds::unbounded(), Some(name.into()))
    }

    pub fn integer(&mut self, name: impl Into<String>, bounds: Bounds) -> Variable {
        self.scalar(VariableType::Integer, bounds, Some(name.into()))
    }

    pub fn real(&mut self, name: impl Into<String>, bounds: Bounds) -> Variable {
        self.scalar(VariableType::Real, bounds, Some(name.into()))
    }

    pub fn ising(&mut self, name: impl Into<String>) -> Variable {
        self.scalar(VariableType::Ising, Bounds::unbounded(), Some(name.into()))
    }

    /// Number of variables issued so far.
    pub fn len(&self) -> usize {
        self.next_index as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next_index == 0
    }
}
