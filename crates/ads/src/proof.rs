use crate::commitment::Commitment;
use crate::digest::{self, HashValue};
use serde::{Deserialize, Serialize};

/// 兄弟节点相对于当前节点的位置
///
/// 拼接顺序不满足交换律，所以每一步都必须带上方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// 兄弟在左: `hash(sibling || current)`
    Left,
    /// 兄弟在右: `hash(current || sibling)`
    Right,
    /// 奇数层的最后一个节点与自身配对: `hash(current || current)`
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    #[serde(with = "crate::digest::hex_serde")]
    pub sibling: HashValue,
    pub side: Side,
}

impl ProofStep {
    pub fn new(sibling: HashValue, side: Side) -> Self {
        Self { sibling, side }
    }

    /// 把兄弟节点折叠进当前哈希；`Duplicate` 的兄弟必须等于当前哈希
    fn fold(&self, current: &HashValue) -> Option<HashValue> {
        match self.side {
            Side::Left => Some(digest::hash_pair(&self.sibling, current)),
            Side::Right => Some(digest::hash_pair(current, &self.sibling)),
            Side::Duplicate if self.sibling == *current => {
                Some(digest::hash_pair(current, &self.sibling))
            }
            Side::Duplicate => None,
        }
    }
}

/// 包含证明：从叶子到根，每层一个兄弟节点
///
/// 证明只对生成它时的根有效。累加器继续增长后，调用方需要自己记住证明对应的根快照。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InclusionProof {
    steps: Vec<ProofStep>,
}

impl InclusionProof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    /// 空证明，表示"未找到"
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut Vec<ProofStep> {
        &mut self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 从叶子值和证明计算根
    ///
    /// 证明格式错误（`Duplicate` 步骤的兄弟与当前哈希不同）时返回 `None`。
    pub fn compute_root(&self, leaf: &Commitment) -> Option<HashValue> {
        let mut current = digest::sha256(leaf.as_bytes());
        for step in &self.steps {
            current = step.fold(&current)?;
        }
        Some(current)
    }

    /// 验证叶子在 `expected_root` 下的包含性
    pub fn verify(&self, leaf: &Commitment, expected_root: &HashValue) -> bool {
        match self.compute_root(leaf) {
            Some(root) => root == *expected_root,
            None => {
                debug!("Malformed proof for leaf {:?}", leaf);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit;
    use crate::digest::sha256;

    #[test]
    fn test_empty_proof_computes_leaf_hash() {
        let leaf = commit(1990, 1, 2024);
        let proof = InclusionProof::empty();
        assert_eq!(proof.compute_root(&leaf), Some(sha256(leaf.as_bytes())));
    }

    #[test]
    fn test_fold_order() {
        let leaf = commit(1990, 1, 2024);
        let leaf_hash = sha256(leaf.as_bytes());
        let sibling = sha256(b"sibling");

        let right = InclusionProof::new(vec![ProofStep::new(sibling, Side::Right)]);
        assert_eq!(
            right.compute_root(&leaf),
            Some(digest::hash_pair(&leaf_hash, &sibling))
        );

        let left = InclusionProof::new(vec![ProofStep::new(sibling, Side::Left)]);
        assert_eq!(
            left.compute_root(&leaf),
            Some(digest::hash_pair(&sibling, &leaf_hash))
        );
    }

    #[test]
    fn test_duplicate_step_must_match_current() {
        let leaf = commit(1990, 1, 2024);
        let leaf_hash = sha256(leaf.as_bytes());

        let good = InclusionProof::new(vec![ProofStep::new(leaf_hash, Side::Duplicate)]);
        let root = digest::hash_pair(&leaf_hash, &leaf_hash);
        assert!(good.verify(&leaf, &root));

        let bad = InclusionProof::new(vec![ProofStep::new(sha256(b"other"), Side::Duplicate)]);
        assert_eq!(bad.compute_root(&leaf), None);
        assert!(!bad.verify(&leaf, &root));
    }

    #[test]
    fn test_json_format() {
        let proof = InclusionProof::new(vec![ProofStep::new([0xab; 32], Side::Left)]);
        let json = serde_json::to_value(&proof).unwrap();
        assert_eq!(json[0]["side"], "left");
        assert_eq!(json[0]["sibling"], "ab".repeat(32));
    }
}
