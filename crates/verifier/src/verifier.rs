//! Verifier 核心结构
//!
//! 负责维护可信根集合，并在信任任何由属性推出的结论之前确认凭证已被累加

use crate::core::{AgePolicy, ProofVerifier};
use crate::error::VerifierError;
use common::{Credential, RootHash};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use zk_ads::{short_hex, to_hex, Commitment};

/// 年龄验证结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeVerification {
    pub commitment: Commitment,
    pub min_age: u32,
    pub is_old_enough: bool,
}

/// Verifier 结构
///
/// 负责：
/// - 记录签发方发布的根（根 -> 当时的叶子数）
/// - 验证凭证的包含证明
/// - 对已确认的凭证执行年龄策略
#[derive(Clone, Default)]
pub struct Verifier {
    verifier: ProofVerifier,
    trusted_roots: Arc<RwLock<HashMap<RootHash, usize>>>,
}

impl Verifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个可信根
    pub fn trust_root(&self, root: RootHash, leaf_count: usize) -> Result<(), VerifierError> {
        let mut roots = self
            .trusted_roots
            .write()
            .map_err(|e| VerifierError::LockPoisoned(e.to_string()))?;
        roots.insert(root, leaf_count);
        Ok(())
    }

    /// 记录签发方按顺序发布的全部根，`roots[i]` 对应 `i + 1` 个叶子
    pub fn trust_published_roots(&self, roots: &[RootHash]) -> Result<(), VerifierError> {
        let mut trusted = self
            .trusted_roots
            .write()
            .map_err(|e| VerifierError::LockPoisoned(e.to_string()))?;
        for (i, root) in roots.iter().enumerate() {
            trusted.insert(*root, i + 1);
        }
        info!(
            "Trusting {} published root(s), {} in total",
            roots.len(),
            trusted.len()
        );
        Ok(())
    }

    pub fn is_trusted(&self, root: &RootHash) -> Result<bool, VerifierError> {
        Ok(self.trusted_leaf_count(root)?.is_some())
    }

    /// 可信根对应的叶子数
    pub fn trusted_leaf_count(&self, root: &RootHash) -> Result<Option<usize>, VerifierError> {
        let roots = self
            .trusted_roots
            .read()
            .map_err(|e| VerifierError::LockPoisoned(e.to_string()))?;
        Ok(roots.get(root).copied())
    }

    /// 确认凭证已被累加
    ///
    /// 1. 签发时的根快照必须是可信根
    /// 2. 叶子索引必须落在该根的叶子范围内
    /// 3. 公开的派生输入必须能重新得到承诺
    /// 4. 包含证明必须在该快照下有效
    pub fn check_credential(&self, credential: &Credential) -> Result<(), VerifierError> {
        let leaf_count = match self.trusted_leaf_count(&credential.issued_root)? {
            Some(count) => count,
            None => {
                warn!(
                    "Credential {:?} references untrusted root {}",
                    credential.commitment,
                    short_hex(&credential.issued_root)
                );
                return Err(VerifierError::UntrustedRoot(to_hex(&credential.issued_root)));
            }
        };

        if credential.leaf_index >= leaf_count {
            return Err(VerifierError::LeafIndexOutOfRange {
                index: credential.leaf_index,
                leaf_count,
            });
        }

        if !credential.opens() {
            return Err(VerifierError::OpeningMismatch);
        }

        if !self.verifier.verify_credential(credential) {
            return Err(VerifierError::NotAccumulated(to_hex(&credential.issued_root)));
        }

        Ok(())
    }

    /// 年龄验证
    pub fn verify_age(
        &self,
        credential: &Credential,
        min_age: u32,
    ) -> Result<AgeVerification, VerifierError> {
        self.check_credential(credential)?;

        let policy = AgePolicy::new(min_age);
        let is_old_enough = policy.is_satisfied(credential.birth_year, credential.context);

        info!(
            "Age verification for {:?}: min_age={} -> {}",
            credential.commitment,
            min_age,
            if is_old_enough { "passed" } else { "failed" }
        );

        Ok(AgeVerification {
            commitment: credential.commitment,
            min_age,
            is_old_enough,
        })
    }
}
