// Error types shared by both translation directions

use crate::amplify::ClientError;

/// Errors raised while translating between generic instances and solver models
///
/// Every variant aborts the current build or decode call; no partial model or
/// partial instance is ever returned alongside one.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("No solver token specified: cannot instantiate client")]
    MissingCredential,

    #[error("Not supported decision variable kind: {0}")]
    UnsupportedVariableKind(String),

    #[error("Unknown sense: {0}")]
    UnknownSense(i32),

    #[error("Unknown equality type: {0}")]
    UnknownEqualityKind(i32),

    #[error("Not supported constraint kind: {0}")]
    UnsupportedConstraintKind(String),

    #[error("Malformed function: {0}")]
    MalformedFunction(String),

    #[error("Failed to create state: {0}")]
    StateConstructionError(String),

    #[error("Function references undefined decision variable id {0}")]
    UndefinedVariableId(u64),

    #[error("Decision variable id {0} is defined more than once")]
    DuplicateVariableId(u64),

    #[error("Model mixes variables from generators {0} and {1}")]
    MixedVariableGenerators(u64, u64),

    #[error("State has no entry for decision variable id {0}")]
    MissingStateEntry(u64),

    #[error("Failed to decode instance: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl AdapterError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            AdapterError::MissingCredential => "CLIENT_MISSING_CREDENTIAL",
            AdapterError::UnsupportedVariableKind(_) => "VARIABLE_UNSUPPORTED_KIND",
            AdapterError::UnknownSense(_) => "OBJECTIVE_UNKNOWN_SENSE",
            AdapterError::UnknownEqualityKind(_) => "CONSTRAINT_UNKNOWN_EQUALITY",
            AdapterError::UnsupportedConstraintKind(_) => "CONSTRAINT_UNSUPPORTED_KIND",
            AdapterError::MalformedFunction(_) => "FUNCTION_MALFORMED",
            AdapterError::StateConstructionError(_) => "STATE_CONSTRUCTION_FAILED",
            AdapterError::UndefinedVariableId(_) => "VARIABLE_UNDEFINED_ID",
            AdapterError::DuplicateVariableId(_) => "VARIABLE_DUPLICATE_ID",
            AdapterError::MixedVariableGenerators(..) => "VARIABLE_MIXED_GENERATORS",
            AdapterError::MissingStateEntry(_) => "STATE_MISSING_ENTRY",
            AdapterError::Decode(_) => "INSTANCE_DECODE_FAILED",
            AdapterError::Client(_) => "CLIENT_FAILED",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::AdapterError;
    use crate::amplify::ClientError;

    #[test]
    fn error_code_is_stable() {
        assert_eq!(
            AdapterError::MissingCredential.code(),
            "CLIENT_MISSING_CREDENTIAL"
        );
        assert_eq!(AdapterError::UnknownSense(9).code(), "OBJECTIVE_UNKNOWN_SENSE");
    }

    #[test]
    fn client_errors_pass_through_unchanged() {
        let err = AdapterError::from(ClientError::NoSolution);
        assert_eq!(err.to_string(), ClientError::NoSolution.to_string());
        assert_eq!(err.code(), "CLIENT_FAILED");
    }
}
