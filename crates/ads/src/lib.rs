//! zk-creds ADS (Authenticated Data Structure) Library
//!
//! 这个库提供匿名凭证系统的认证数据结构:
//!
//! ## 当前实现
//! - **Commitment**: 基于 SHA-256 的承诺函数 `commit(attribute, nonce, context)`
//! - **MerkleAccumulator**: 只追加的 Merkle 累加器，每次插入后重建根
//! - **InclusionProof**: 叶子到根的兄弟节点路径，可由第三方独立验证
//!
//! ## 示例
//!
//! ```rust
//! use zk_ads::{commit, MerkleAccumulator};
//!
//! let mut acc = MerkleAccumulator::new();
//! let c = commit(1990, 42, 2024);
//! let index = acc.insert(c).unwrap();
//! let proof = acc.get_proof(index);
//! assert!(MerkleAccumulator::verify_proof(&c, &proof, &acc.get_root()));
//! ```

#[macro_use]
extern crate log;

// ========================================
// Common utilities
// ========================================

/// Digest utilities - 通用摘要工具
pub mod digest;
pub use digest::*;

pub mod error;
pub use error::AdsError;

// ========================================
// ADS Implementations
// ========================================

pub mod commitment;
pub mod merkle_tree;
pub mod proof;

// Re-export commonly used types
pub use commitment::{commit, generate_nonce, Commitment};
pub use merkle_tree::{MerkleAccumulator, MAX_LEAVES};
pub use proof::{InclusionProof, ProofStep, Side};
