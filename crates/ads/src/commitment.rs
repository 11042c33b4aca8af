//! Commitment Function
//!
//! `commit(attribute, nonce, context)` 生成 32 字节承诺。
//! 三个输入都以定长大端编码写入哈希，前面加域分隔标签，
//! 因此不同的输入元组不会得到相同的编码。

use crate::digest::{self, HashValue};
use crate::AdsError;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

const COMMITMENT_TAG: &[u8] = b"zkc:commit:v1";

/// 承诺值：对 `(attribute, nonce, context)` 的隐藏且绑定的摘要
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment(#[serde(with = "crate::digest::hex_serde")] HashValue);

impl Commitment {
    pub fn as_bytes(&self) -> &HashValue {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        digest::to_hex(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, AdsError> {
        digest::from_hex(s).map(Commitment)
    }

    /// 用公开的派生输入重新计算承诺，检查是否一致
    pub fn opens(&self, attribute: i64, nonce: u64, context: i64) -> bool {
        commit(attribute, nonce, context) == *self
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", digest::short_hex(&self.0))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Commitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<HashValue> for Commitment {
    fn from(bytes: HashValue) -> Self {
        Commitment(bytes)
    }
}

/// 计算承诺
///
/// # Arguments
/// * `attribute` - 私有属性（出生年份）
/// * `nonce` - 每个凭证独立生成的随机数，见 [`generate_nonce`]
/// * `context` - 纪元/上下文值（签发年份）
pub fn commit(attribute: i64, nonce: u64, context: i64) -> Commitment {
    let mut hasher = Sha256::new();
    hasher.update(COMMITMENT_TAG);
    hasher.update(attribute.to_be_bytes());
    hasher.update(nonce.to_be_bytes());
    hasher.update(context.to_be_bytes());
    Commitment(hasher.finalize().into())
}

/// 从操作系统 CSPRNG 取 64 位随机数
///
/// 每个凭证调用一次，不能在两个凭证之间复用。
pub fn generate_nonce() -> u64 {
    OsRng.next_u64()
}
