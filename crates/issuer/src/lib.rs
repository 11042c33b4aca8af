pub mod ads;
pub mod ads_trait;
pub mod error;
pub mod issuer;
pub mod service;
pub mod store;

pub use ads_trait::AccumulatorOperations;
pub use error::IssuerError;
pub use issuer::CredentialIssuer;
