// Domain value objects: enumerations of the generic instance schema
//
// Fields holding these are stored as raw `i32` (protobuf enumerations), so a
// value outside the declared variants can reach the adapters and must be
// rejected there.

use std::fmt;

/// Kind of a generic decision variable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum VariableKind {
    Unspecified = 0,
    /// Binary variable (x ∈ {0, 1})
    Binary = 1,
    /// Integer number (x ∈ ℤ)
    Integer = 2,
    /// Continuous real number (x ∈ ℝ)
    Continuous = 3,
    /// Either 0 or an integer within the bound
    SemiInteger = 4,
    /// Either 0 or a real within the bound
    SemiContinuous = 5,
}

/// Relation of a constraint function to zero
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Equality {
    Unspecified = 0,
    /// f(x) = 0
    EqualToZero = 1,
    /// f(x) ≤ 0
    LessThanOrEqualToZero = 2,
}

/// Direction of optimization
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Sense {
    Unspecified = 0,
    /// Minimize the objective function
    Minimize = 1,
    /// Maximize the objective function
    Maximize = 2,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Unspecified => write!(f, "Unspecified"),
            VariableKind::Binary => write!(f, "Binary"),
            VariableKind::Integer => write!(f, "Integer"),
            VariableKind::Continuous => write!(f, "Continuous"),
            VariableKind::SemiInteger => write!(f, "Semi-integer"),
            VariableKind::SemiContinuous => write!(f, "Semi-continuous"),
        }
    }
}

impl fmt::Display for Equality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Equality::Unspecified => write!(f, "Unspecified"),
            Equality::EqualToZero => write!(f, "== 0"),
            Equality::LessThanOrEqualToZero => write!(f, "<= 0"),
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Unspecified => write!(f, "Unspecified"),
            Sense::Minimize => write!(f, "Minimize"),
            Sense::Maximize => write!(f, "Maximize"),
        }
    }
}
