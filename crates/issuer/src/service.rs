//! 签发方对外操作
//!
//! - 签发凭证: commit -> insert -> 记录证明和根快照
//! - 查询凭证、根、统计信息
//! - 成员资格检查和证明刷新

use crate::error::IssuerError;
use crate::issuer::CredentialIssuer;
use common::{AccumulatorStats, Credential, Passport, RootHash};
use log::{debug, info, warn};
use zk_ads::{commit, generate_nonce, short_hex, Commitment, InclusionProof, EMPTY_ROOT};

impl CredentialIssuer {
    /// 根据护照签发匿名凭证
    pub fn issue_credential(&self, passport: &Passport) -> Result<Credential, IssuerError> {
        let nonce = generate_nonce();
        let commitment = commit(passport.birth_year, nonce, self.config.context);

        let mut state = self.write_state()?;
        if state.credentials.contains_key(&commitment) {
            return Err(IssuerError::DuplicateCommitment(commitment.to_hex()));
        }

        let (leaf_index, proof, issued_root) = state.ads.add(commitment)?;
        state.root_history.push(issued_root);

        let credential = Credential {
            commitment,
            birth_year: passport.birth_year,
            nonce,
            context: self.config.context,
            leaf_index,
            proof,
            issued_root,
        };
        state.credentials.insert(commitment, credential.clone());

        info!(
            "Issued credential {:?} at leaf {} (root={})",
            commitment,
            leaf_index,
            short_hex(&issued_root)
        );

        Ok(credential)
    }

    pub fn get_credential(
        &self,
        commitment: &Commitment,
    ) -> Result<Option<Credential>, IssuerError> {
        let state = self.read_state()?;
        Ok(state.credentials.get(commitment).cloned())
    }

    pub fn merkle_root(&self) -> Result<RootHash, IssuerError> {
        Ok(self.read_state()?.ads.root())
    }

    /// 叶子数为 `leaf_count` 时的根
    pub fn root_at(&self, leaf_count: usize) -> Result<Option<RootHash>, IssuerError> {
        if leaf_count == 0 {
            return Ok(Some(EMPTY_ROOT));
        }
        let state = self.read_state()?;
        Ok(state.root_history.get(leaf_count - 1).copied())
    }

    /// 每次插入后发布过的所有根，按叶子数递增
    pub fn published_roots(&self) -> Result<Vec<RootHash>, IssuerError> {
        Ok(self.read_state()?.root_history.clone())
    }

    pub fn stats(&self) -> Result<AccumulatorStats, IssuerError> {
        let state = self.read_state()?;
        Ok(AccumulatorStats {
            total_credentials: state.credentials.len(),
            leaf_count: state.ads.leaf_count(),
            tree_height: state.ads.height(),
            merkle_root: state.ads.root(),
        })
    }

    /// 检查凭证是否在累加器中
    ///
    /// 证明对签发时的根快照验证，并且该快照必须与根历史一致。
    pub fn verify_membership(&self, commitment: &Commitment) -> Result<bool, IssuerError> {
        let state = self.read_state()?;
        let credential = match state.credentials.get(commitment) {
            Some(c) => c,
            None => {
                debug!("Membership check for unknown commitment {:?}", commitment);
                return Ok(false);
            }
        };

        let snapshot_known =
            state.root_history.get(credential.leaf_index) == Some(&credential.issued_root);
        if !snapshot_known {
            warn!(
                "Credential {:?} carries unknown root {}",
                commitment,
                short_hex(&credential.issued_root)
            );
            return Ok(false);
        }

        Ok(credential.verify_inclusion())
    }

    /// 当前根下的新证明
    pub fn current_proof(
        &self,
        commitment: &Commitment,
    ) -> Result<(InclusionProof, RootHash), IssuerError> {
        let state = self.read_state()?;
        let credential = state
            .credentials
            .get(commitment)
            .ok_or_else(|| IssuerError::CredentialNotFound(commitment.to_hex()))?;

        let proof = state.ads.prove(credential.leaf_index).ok_or_else(|| {
            IssuerError::InconsistentStore(format!(
                "leaf {} missing from accumulator",
                credential.leaf_index
            ))
        })?;

        Ok((proof, state.ads.root()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ServiceConfig;
    use zk_ads::MerkleAccumulator;

    fn passport(birth_year: i64) -> Passport {
        Passport {
            name: "Alice".to_string(),
            birth_year,
            country: "NL".to_string(),
            passport_number: "X1234567".to_string(),
            expiry_year: 2030,
        }
    }

    #[test]
    fn test_issue_credential() {
        let issuer = CredentialIssuer::default();
        let cred = issuer.issue_credential(&passport(1990)).unwrap();

        assert_eq!(cred.leaf_index, 0);
        assert_eq!(cred.context, 2024);
        assert!(cred.opens());
        assert!(cred.verify_inclusion());
        assert_eq!(cred.issued_root, issuer.merkle_root().unwrap());
        assert_eq!(
            issuer.get_credential(&cred.commitment).unwrap(),
            Some(cred.clone())
        );
    }

    #[test]
    fn test_context_from_config() {
        let issuer = CredentialIssuer::new(ServiceConfig {
            context: 2030,
            ..ServiceConfig::default()
        });
        let cred = issuer.issue_credential(&passport(2000)).unwrap();
        assert_eq!(cred.context, 2030);
        assert!(cred.commitment.opens(2000, cred.nonce, 2030));
    }

    #[test]
    fn test_membership_after_growth() {
        let issuer = CredentialIssuer::default();
        let first = issuer.issue_credential(&passport(1990)).unwrap();
        for year in 1991..1996 {
            issuer.issue_credential(&passport(year)).unwrap();
        }

        // 旧证明仍对签发时的快照有效，但不对当前根有效
        assert!(issuer.verify_membership(&first.commitment).unwrap());
        let live_root = issuer.merkle_root().unwrap();
        assert!(!MerkleAccumulator::verify_proof(
            &first.commitment,
            &first.proof,
            &live_root
        ));

        let (fresh, root) = issuer.current_proof(&first.commitment).unwrap();
        assert_eq!(root, live_root);
        assert!(MerkleAccumulator::verify_proof(&first.commitment, &fresh, &root));
    }

    #[test]
    fn test_unknown_commitment() {
        let issuer = CredentialIssuer::default();
        let unknown = commit(1990, 1, 2024);
        assert!(!issuer.verify_membership(&unknown).unwrap());
        assert!(issuer.get_credential(&unknown).unwrap().is_none());
        assert!(matches!(
            issuer.current_proof(&unknown),
            Err(IssuerError::CredentialNotFound(_))
        ));
    }

    #[test]
    fn test_root_history_and_stats() {
        let issuer = CredentialIssuer::default();
        assert_eq!(issuer.root_at(0).unwrap(), Some(EMPTY_ROOT));
        assert_eq!(issuer.root_at(1).unwrap(), None);

        let creds: Vec<Credential> = (0..3)
            .map(|i| issuer.issue_credential(&passport(1990 + i)).unwrap())
            .collect();

        for (i, cred) in creds.iter().enumerate() {
            assert_eq!(issuer.root_at(i + 1).unwrap(), Some(cred.issued_root));
        }
        assert_eq!(issuer.published_roots().unwrap().len(), 3);

        let stats = issuer.stats().unwrap();
        assert_eq!(stats.total_credentials, 3);
        assert_eq!(stats.leaf_count, 3);
        assert_eq!(stats.tree_height, 3);
        assert_eq!(stats.merkle_root, creds[2].issued_root);
    }
}
