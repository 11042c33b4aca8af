//! 证明验证模块
//!
//! 负责验证来自签发方的包含证明。只需要承诺、证明和可信根，不访问累加器状态。

use common::{Credential, RootHash};
use log::debug;
use zk_ads::{short_hex, Commitment, InclusionProof, MerkleAccumulator};

/// 证明验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofVerifier;

impl ProofVerifier {
    pub fn new() -> Self {
        ProofVerifier
    }

    /// 验证包含证明
    ///
    /// # Arguments
    /// * `commitment` - 叶子承诺
    /// * `proof` - 叶子到根的证明
    /// * `root` - 可信根
    pub fn verify(&self, commitment: &Commitment, proof: &InclusionProof, root: &RootHash) -> bool {
        let ok = MerkleAccumulator::verify_proof(commitment, proof, root);
        debug!(
            "Proof for {:?} ({} steps) against {}: {}",
            commitment,
            proof.len(),
            short_hex(root),
            if ok { "valid" } else { "invalid" }
        );
        ok
    }

    /// 用凭证中保存的证明和根快照验证
    pub fn verify_credential(&self, credential: &Credential) -> bool {
        self.verify(
            &credential.commitment,
            &credential.proof,
            &credential.issued_root,
        )
    }
}
