// Solver backends

pub mod highs_client;

pub use highs_client::HighsClient;
