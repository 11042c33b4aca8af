pub mod core;
pub mod error;
pub mod verifier;

pub use crate::core::{AgePolicy, ProofVerifier};
pub use error::VerifierError;
pub use verifier::{AgeVerification, Verifier};
