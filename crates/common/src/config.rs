use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONTEXT: i64 = 2024;
pub const DEFAULT_MIN_AGE: u32 = 18;

// Configuration for the credential service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Epoch mixed into every commitment (the issuance year)
    pub context: i64,
    pub default_min_age: u32,
    /// JSON credential store; in-memory only when unset
    pub credential_store: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            context: DEFAULT_CONTEXT,
            default_min_age: DEFAULT_MIN_AGE,
            credential_store: None,
        }
    }
}
