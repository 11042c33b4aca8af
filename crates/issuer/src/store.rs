//! 凭证持久化
//!
//! 凭证表以 JSON 数组保存（按叶子索引排序）。恢复时按顺序重放承诺重建累加器，
//! 每个凭证记录的根快照都必须与重放得到的根一致。

use crate::error::IssuerError;
use crate::issuer::{CredentialIssuer, IssuerState};
use common::{Credential, ServiceConfig};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use zk_ads::MerkleAccumulator;

impl CredentialIssuer {
    /// 保存所有凭证到文件
    pub fn save_credentials(&self, path: &Path) -> Result<usize, IssuerError> {
        let mut credentials: Vec<Credential> = {
            let state = self.read_state()?;
            state.credentials.values().cloned().collect()
        };
        credentials.sort_by_key(|c| c.leaf_index);

        let content = serde_json::to_string_pretty(&credentials)?;
        std::fs::write(path, content)?;

        info!("Saved {} credential(s) to {}", credentials.len(), path.display());
        Ok(credentials.len())
    }

    /// 从文件恢复签发方
    pub fn restore(path: &Path, config: ServiceConfig) -> Result<Self, IssuerError> {
        let content = std::fs::read_to_string(path)?;
        let mut credentials: Vec<Credential> = serde_json::from_str(&content)?;
        credentials.sort_by_key(|c| c.leaf_index);

        let mut acc = MerkleAccumulator::new();
        let mut root_history = Vec::with_capacity(credentials.len());
        let mut by_commitment = HashMap::with_capacity(credentials.len());

        for (expected_index, credential) in credentials.into_iter().enumerate() {
            if credential.leaf_index != expected_index {
                return Err(IssuerError::InconsistentStore(format!(
                    "expected leaf {}, found {}",
                    expected_index, credential.leaf_index
                )));
            }
            if !credential.opens() {
                return Err(IssuerError::InconsistentStore(format!(
                    "credential at leaf {} does not open its commitment",
                    expected_index
                )));
            }

            acc.insert(credential.commitment)?;
            let root = acc.get_root();
            if root != credential.issued_root {
                return Err(IssuerError::InconsistentStore(format!(
                    "root mismatch at leaf {}",
                    expected_index
                )));
            }
            if credential.proof != acc.get_proof(expected_index) {
                return Err(IssuerError::InconsistentStore(format!(
                    "proof mismatch at leaf {}",
                    expected_index
                )));
            }
            root_history.push(root);

            if by_commitment
                .insert(credential.commitment, credential)
                .is_some()
            {
                return Err(IssuerError::DuplicateCommitment(format!(
                    "leaf {}",
                    expected_index
                )));
            }
        }

        info!(
            "Restored {} credential(s) from {}",
            by_commitment.len(),
            path.display()
        );

        Ok(Self::from_state(
            config,
            IssuerState {
                ads: Box::new(acc),
                credentials: by_commitment,
                root_history,
            },
        ))
    }
}
