use serde::{Deserialize, Serialize};
use zk_ads::{Commitment, HashValue, InclusionProof};

// Position of a leaf in the accumulator
pub type LeafIndex = usize;

// Root of the Merkle accumulator
pub type RootHash = HashValue;

// Mock passport presented to the issuer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passport {
    pub name: String,
    pub birth_year: i64,
    pub country: String,
    pub passport_number: String,
    pub expiry_year: i64,
}

/// Anonymous age credential
///
/// `birth_year` and `nonce` stay with the issuer and holder; only the
/// commitment, proof and root are meant to be shown to a verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub commitment: Commitment,
    pub birth_year: i64,
    pub nonce: u64,
    /// Context (issuance year) mixed into the commitment
    pub context: i64,
    pub leaf_index: LeafIndex,
    /// Inclusion proof captured at issuance
    pub proof: InclusionProof,
    /// Root the proof authenticates
    #[serde(with = "zk_ads::digest::hex_serde")]
    pub issued_root: RootHash,
}

impl Credential {
    /// Re-derive the commitment from the disclosed inputs
    pub fn opens(&self) -> bool {
        self.commitment
            .opens(self.birth_year, self.nonce, self.context)
    }

    /// Verify the stored proof against the issuance snapshot
    pub fn verify_inclusion(&self) -> bool {
        zk_ads::MerkleAccumulator::verify_proof(&self.commitment, &self.proof, &self.issued_root)
    }

    /// Year difference, saturating at the `i64` bounds
    pub fn age_at_context(&self) -> i64 {
        self.context.saturating_sub(self.birth_year)
    }
}

// Snapshot of the issuer's accumulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatorStats {
    pub total_credentials: usize,
    pub leaf_count: usize,
    pub tree_height: usize,
    #[serde(with = "zk_ads::digest::hex_serde")]
    pub merkle_root: RootHash,
}
