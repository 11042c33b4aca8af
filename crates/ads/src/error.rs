use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdsError {
    #[error("Accumulator capacity exceeded: {current} leaves + {requested} > {max}")]
    CapacityExceeded {
        current: usize,
        requested: usize,
        max: usize,
    },

    #[error("Leaf index {index} out of range (leaf count {leaf_count})")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
