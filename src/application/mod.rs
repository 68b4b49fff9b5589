// Application layer: the two translation directions and their shared
// polynomial translation

pub mod config;
pub mod instance_to_model;
pub mod model_to_instance;
pub mod translate;

pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use instance_to_model::AmplifyAdapter;
pub use model_to_instance::{model_to_instance, InstanceBuilder};
pub use translate::{poly_to_polynomial, ToPoly, VariableMap};
