use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerifierError {
    #[error("Root is not trusted: {0}")]
    UntrustedRoot(String),

    #[error("Commitment does not open with the disclosed inputs")]
    OpeningMismatch,

    #[error("Leaf index {index} out of range for root with {leaf_count} leaves")]
    LeafIndexOutOfRange { index: usize, leaf_count: usize },

    #[error("Commitment is not accumulated under root {0}")]
    NotAccumulated(String),

    #[error("Lock error: {0}")]
    LockPoisoned(String),
}
