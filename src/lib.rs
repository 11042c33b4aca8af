//! System-level helper library for the zk-creds workspace.
//!
//! 把签发方和验证方组装在一起：
//! - `initialize` 根据配置构造 `System`（配置了凭证文件时从文件恢复）
//! - `load_config` / `save_config` 用于从文件加载和保存配置

use anyhow::{anyhow, Context, Result};
use common::{Credential, Passport, ServiceConfig};
use issuer::CredentialIssuer;
use log::info;
use std::path::Path;
use verifier::{AgeVerification, Verifier};
use zk_ads::{short_hex, Commitment};

/// 签发方 + 验证方
///
/// 签发方是累加器状态的唯一持有者；验证方只看到签发方发布的根。
#[derive(Clone)]
pub struct System {
    pub issuer: CredentialIssuer,
    pub verifier: Verifier,
    pub config: ServiceConfig,
}

impl System {
    pub fn new(config: ServiceConfig) -> Self {
        System {
            issuer: CredentialIssuer::new(config.clone()),
            verifier: Verifier::new(),
            config,
        }
    }

    /// 把签发方的根历史发布给验证方，返回发布的根数量
    pub fn publish_roots(&self) -> Result<usize> {
        let roots = self.issuer.published_roots()?;
        self.verifier.trust_published_roots(&roots)?;
        Ok(roots.len())
    }

    /// 签发凭证并发布新根
    pub fn issue(&self, passport: &Passport) -> Result<Credential> {
        let credential = self.issuer.issue_credential(passport)?;
        self.verifier
            .trust_root(credential.issued_root, credential.leaf_index + 1)?;
        Ok(credential)
    }

    /// 按承诺查找凭证并验证年龄；`min_age` 为空时使用配置的默认值
    pub fn verify_age(
        &self,
        commitment: &Commitment,
        min_age: Option<u32>,
    ) -> Result<AgeVerification> {
        let credential = self
            .issuer
            .get_credential(commitment)?
            .ok_or_else(|| anyhow!("Credential not found: {}", commitment))?;

        if !self.issuer.verify_membership(commitment)? {
            return Err(anyhow!("Credential not in tree: {}", commitment));
        }

        let min_age = min_age.unwrap_or(self.config.default_min_age);
        Ok(self.verifier.verify_age(&credential, min_age)?)
    }

    /// 配置了凭证文件时保存凭证
    pub fn persist(&self) -> Result<Option<usize>> {
        match &self.config.credential_store {
            Some(path) => Ok(Some(self.issuer.save_credentials(path)?)),
            None => Ok(None),
        }
    }
}

/// Initialize the credential system
///
/// 配置了凭证文件且文件存在时，从文件恢复签发方并把根历史发布给验证方。
pub async fn initialize(config: ServiceConfig) -> Result<System> {
    info!("Initializing zk-creds system...");
    info!("  Context: {}", config.context);
    info!("  Default min age: {}", config.default_min_age);

    let issuer = match config.credential_store.clone() {
        Some(path) if path.exists() => {
            let restore_config = config.clone();
            tokio::task::spawn_blocking(move || CredentialIssuer::restore(&path, restore_config))
                .await
                .context("restore task failed")??
        }
        _ => CredentialIssuer::new(config.clone()),
    };

    let system = System {
        issuer,
        verifier: Verifier::new(),
        config,
    };
    let published = system.publish_roots()?;

    info!(
        "System initialized: {} root(s) published, root={}",
        published,
        short_hex(&system.issuer.merkle_root()?)
    );

    Ok(system)
}

/// Load service configuration from a file
pub fn load_config(path: &Path) -> Result<ServiceConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: ServiceConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Save service configuration to a file
pub fn save_config(config: &ServiceConfig, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
