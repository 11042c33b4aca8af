//! 核心功能模块
//!
//! 包含证明验证和属性策略

pub mod policy;
pub mod verification;

pub use policy::AgePolicy;
pub use verification::ProofVerifier;
