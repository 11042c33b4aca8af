/// ADS implementations module
///
/// 当前使用: MerkleAccumulator (只追加的 SHA-256 Merkle 累加器)
pub mod merkle_accumulator;
