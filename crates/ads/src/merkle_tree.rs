//! Merkle Accumulator
//!
//! 只追加的二叉 Merkle 树:
//! - level 0 = `sha256(commitment)`，承诺值和树叶哈希是不同的值
//! - 上层节点 = `sha256(left || right)`
//! - 某层节点数为奇数时，最后一个节点与自身配对（复制），不会被直接提升
//!
//! 每次插入都从头重建所有层。新层先在局部构建好再整体替换，
//! 所以不存在叶子已更新而根还是旧值的可观察状态。

use crate::commitment::Commitment;
use crate::digest::{self, HashValue, EMPTY_ROOT};
use crate::proof::{InclusionProof, ProofStep, Side};
use crate::AdsError;
use rayon::prelude::*;
use std::ops::Range;

/// 叶子数量上限，防止索引空间溢出
pub const MAX_LEAVES: usize = u32::MAX as usize;

/// 叶子数量超过该值时，level 0 哈希并行计算
const PARALLEL_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Default)]
pub struct MerkleAccumulator {
    leaves: Vec<Commitment>,
    /// levels[0] 为叶子哈希，最后一层为单元素根
    levels: Vec<Vec<HashValue>>,
}

impl MerkleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按顺序重放承诺，重建累加器
    pub fn from_commitments<I>(commitments: I) -> Result<Self, AdsError>
    where
        I: IntoIterator<Item = Commitment>,
    {
        let mut acc = Self::new();
        let commitments: Vec<Commitment> = commitments.into_iter().collect();
        acc.insert_batch(&commitments)?;
        Ok(acc)
    }

    /// 插入一个承诺，返回新叶子的索引（从 0 开始）
    pub fn insert(&mut self, commitment: Commitment) -> Result<usize, AdsError> {
        let range = self.insert_batch(std::slice::from_ref(&commitment))?;
        Ok(range.start)
    }

    /// 批量插入，只重建一次
    ///
    /// 返回新叶子的索引范围。
    pub fn insert_batch(&mut self, commitments: &[Commitment]) -> Result<Range<usize>, AdsError> {
        let start = self.leaves.len();
        let end = start
            .checked_add(commitments.len())
            .filter(|end| *end <= MAX_LEAVES)
            .ok_or(AdsError::CapacityExceeded {
                current: start,
                requested: commitments.len(),
                max: MAX_LEAVES,
            })?;

        if commitments.is_empty() {
            return Ok(start..end);
        }

        let mut leaves = self.leaves.clone();
        leaves.extend_from_slice(commitments);
        let levels = Self::build_levels(&leaves);

        self.leaves = leaves;
        self.levels = levels;

        debug!(
            "Inserted {} leaf(s) at {}..{}, root={}",
            commitments.len(),
            start,
            end,
            digest::short_hex(&self.get_root())
        );

        Ok(start..end)
    }

    /// 当前根；空累加器返回 [`EMPTY_ROOT`]
    pub fn get_root(&self) -> HashValue {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(EMPTY_ROOT)
    }

    /// 生成包含证明
    ///
    /// `index` 越界时返回空证明。空证明对单叶子的根也能验证通过，
    /// 因此调用方需要先检查 `index < len()`，或者使用 [`Self::try_get_proof`]。
    pub fn get_proof(&self, index: usize) -> InclusionProof {
        if index >= self.leaves.len() {
            return InclusionProof::empty();
        }

        let mut steps = Vec::with_capacity(self.levels.len().saturating_sub(1));
        let mut position = index;

        for level in &self.levels[..self.levels.len() - 1] {
            let step = if position % 2 == 0 {
                match level.get(position + 1) {
                    Some(sibling) => ProofStep::new(*sibling, Side::Right),
                    None => ProofStep::new(level[position], Side::Duplicate),
                }
            } else {
                ProofStep::new(level[position - 1], Side::Left)
            };
            steps.push(step);
            position /= 2;
        }

        InclusionProof::new(steps)
    }

    /// 带边界检查的 [`Self::get_proof`]
    pub fn try_get_proof(&self, index: usize) -> Result<InclusionProof, AdsError> {
        if index >= self.leaves.len() {
            return Err(AdsError::IndexOutOfRange {
                index,
                leaf_count: self.leaves.len(),
            });
        }
        Ok(self.get_proof(index))
    }

    /// 验证证明
    ///
    /// 纯函数，不访问累加器状态：持有承诺、证明和可信根的第三方也能调用。
    pub fn verify_proof(
        leaf: &Commitment,
        proof: &InclusionProof,
        expected_root: &HashValue,
    ) -> bool {
        proof.verify(leaf, expected_root)
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn leaf(&self, index: usize) -> Option<&Commitment> {
        self.leaves.get(index)
    }

    pub fn levels(&self) -> &[Vec<HashValue>] {
        &self.levels
    }

    /// 树高（层数）；空累加器为 0
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    fn build_levels(leaves: &[Commitment]) -> Vec<Vec<HashValue>> {
        if leaves.is_empty() {
            return Vec::new();
        }

        let level0: Vec<HashValue> = if leaves.len() >= PARALLEL_THRESHOLD {
            leaves.par_iter().map(|c| digest::sha256(c.as_bytes())).collect()
        } else {
            leaves.iter().map(|c| digest::sha256(c.as_bytes())).collect()
        };

        let mut levels = vec![level0];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next: Vec<HashValue> = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => digest::hash_pair(left, right),
                    [single] => digest::hash_pair(single, single),
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            levels.push(next);
        }

        levels
    }
}
