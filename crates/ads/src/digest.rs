//! 摘要工具
//!
//! 所有摘要都是定长 32 字节数组，哈希输入按字节拼接（不是按十六进制字符串拼接）。
//! 十六进制只用于日志和 JSON。

use crate::AdsError;
use sha2::{Digest, Sha256};

pub const DIGEST_LEN: usize = 32;

/// 32 字节 SHA-256 摘要
pub type HashValue = [u8; DIGEST_LEN];

/// 空累加器的根
pub const EMPTY_ROOT: HashValue = [0u8; DIGEST_LEN];

pub fn sha256(data: &[u8]) -> HashValue {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// `sha256(left || right)`，左操作数的字节在前
pub fn hash_pair(left: &HashValue, right: &HashValue) -> HashValue {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

pub fn to_hex(value: &HashValue) -> String {
    hex::encode(value)
}

pub fn from_hex(s: &str) -> Result<HashValue, AdsError> {
    let mut out = [0u8; DIGEST_LEN];
    hex::decode_to_slice(s, &mut out)
        .map_err(|e| AdsError::InvalidDigest(format!("{:?}: {}", s, e)))?;
    Ok(out)
}

/// 短格式，用于日志
pub fn short_hex(value: &HashValue) -> String {
    format!("{}...", &to_hex(value)[..16])
}

/// serde 适配器：`HashValue` 以十六进制字符串序列化
///
/// 用法: `#[serde(with = "zk_ads::digest::hex_serde")]`
pub mod hex_serde {
    use super::HashValue;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &HashValue, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<HashValue, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::from_hex(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_pair_is_byte_concatenation() {
        let left = sha256(b"left");
        let right = sha256(b"right");

        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(&left);
        concat.extend_from_slice(&right);

        assert_eq!(hash_pair(&left, &right), sha256(&concat));
        assert_ne!(hash_pair(&left, &right), hash_pair(&right, &left));
    }

    #[test]
    fn test_hex_roundtrip() {
        let value = sha256(b"zk-creds");
        let encoded = to_hex(&value);
        assert_eq!(encoded.len(), 64);
        assert_eq!(from_hex(&encoded).unwrap(), value);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(from_hex("abcd").is_err());
        assert!(from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(short_hex(&EMPTY_ROOT), "0000000000000000...");
    }
}
