//! Merkle Accumulator ADS Implementation
//!
//! 签发方使用的只追加 Merkle 累加器

use crate::ads_trait::AccumulatorOperations;
use common::{LeafIndex, RootHash};
use zk_ads::{AdsError, Commitment, InclusionProof, MerkleAccumulator};

impl AccumulatorOperations for MerkleAccumulator {
    fn add(
        &mut self,
        commitment: Commitment,
    ) -> Result<(LeafIndex, InclusionProof, RootHash), AdsError> {
        let index = self.insert(commitment)?;
        Ok((index, self.get_proof(index), self.get_root()))
    }

    fn prove(&self, index: LeafIndex) -> Option<InclusionProof> {
        self.try_get_proof(index).ok()
    }

    fn root(&self) -> RootHash {
        self.get_root()
    }

    fn leaf_count(&self) -> usize {
        self.len()
    }

    fn height(&self) -> usize {
        MerkleAccumulator::height(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zk_ads::commit;

    #[test]
    fn test_add_returns_fresh_proof() {
        let mut ads: Box<dyn AccumulatorOperations> = Box::new(MerkleAccumulator::new());

        let c0 = commit(1990, 1, 2024);
        let c1 = commit(1991, 2, 2024);
        let (i0, p0, r0) = ads.add(c0).unwrap();
        let (i1, p1, r1) = ads.add(c1).unwrap();

        assert_eq!((i0, i1), (0, 1));
        assert!(MerkleAccumulator::verify_proof(&c0, &p0, &r0));
        assert!(MerkleAccumulator::verify_proof(&c1, &p1, &r1));
        assert_eq!(ads.root(), r1);
        assert_eq!(ads.leaf_count(), 2);
        assert_eq!(ads.height(), 2);
    }

    #[test]
    fn test_prove_out_of_range() {
        let mut ads = MerkleAccumulator::new();
        assert!(AccumulatorOperations::prove(&ads, 0).is_none());
        ads.add(commit(1990, 1, 2024)).unwrap();
        assert!(AccumulatorOperations::prove(&ads, 0).is_some());
    }
}
