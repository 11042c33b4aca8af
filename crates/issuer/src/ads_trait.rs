/// 累加器操作的通用 trait
/// 签发方持有的认证数据结构都需要实现这个 trait
use common::{LeafIndex, RootHash};
use zk_ads::{AdsError, Commitment, InclusionProof};

pub trait AccumulatorOperations: Send + Sync {
    /// 追加承诺
    /// 返回: (leaf_index, proof, root_hash)，证明对应返回的根
    fn add(&mut self, commitment: Commitment)
        -> Result<(LeafIndex, InclusionProof, RootHash), AdsError>;

    /// 当前根下的包含证明；索引越界返回 None
    fn prove(&self, index: LeafIndex) -> Option<InclusionProof>;

    fn root(&self) -> RootHash;

    fn leaf_count(&self) -> usize;

    fn height(&self) -> usize;
}
