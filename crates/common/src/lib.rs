pub mod config;
pub mod types;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use types::{AccumulatorStats, Credential, LeafIndex, Passport, RootHash};
