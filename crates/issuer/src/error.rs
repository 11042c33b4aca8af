use thiserror::Error;
use zk_ads::AdsError;

#[derive(Error, Debug)]
pub enum IssuerError {
    #[error("Accumulator error: {0}")]
    Ads(#[from] AdsError),

    #[error("Lock error: {0}")]
    LockPoisoned(String),

    #[error("Credential not found: {0}")]
    CredentialNotFound(String),

    #[error("Duplicate commitment: {0}")]
    DuplicateCommitment(String),

    #[error("Inconsistent credential store: {0}")]
    InconsistentStore(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
