use crate::ads_trait::AccumulatorOperations;
use crate::error::IssuerError;
use common::{Credential, RootHash, ServiceConfig};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use zk_ads::{Commitment, MerkleAccumulator};

/// 签发方持有的全部可变状态
///
/// 累加器、凭证表和根历史放在同一把锁后面：
/// 一次签发（追加叶子 + 重建 + 登记凭证）对所有读者是原子的。
pub(crate) struct IssuerState {
    pub(crate) ads: Box<dyn AccumulatorOperations>,
    /// commitment -> credential
    pub(crate) credentials: HashMap<Commitment, Credential>,
    /// root_history[i] = 插入第 i 个叶子之后的根
    pub(crate) root_history: Vec<RootHash>,
}

/// CredentialIssuer 结构
///
/// 累加器状态的唯一持有者。克隆得到的是同一状态的句柄。
#[derive(Clone)]
pub struct CredentialIssuer {
    pub(crate) state: Arc<RwLock<IssuerState>>,
    pub(crate) config: ServiceConfig,
}

impl CredentialIssuer {
    /// 创建新的签发方（空的 Merkle 累加器）
    pub fn new(config: ServiceConfig) -> Self {
        Self::from_state(
            config,
            IssuerState {
                ads: Box::new(MerkleAccumulator::new()),
                credentials: HashMap::new(),
                root_history: Vec::new(),
            },
        )
    }

    pub(crate) fn from_state(config: ServiceConfig, state: IssuerState) -> Self {
        CredentialIssuer {
            state: Arc::new(RwLock::new(state)),
            config,
        }
    }

    pub(crate) fn read_state(&self) -> Result<RwLockReadGuard<'_, IssuerState>, IssuerError> {
        self.state
            .read()
            .map_err(|e| IssuerError::LockPoisoned(e.to_string()))
    }

    pub(crate) fn write_state(&self) -> Result<RwLockWriteGuard<'_, IssuerState>, IssuerError> {
        self.state
            .write()
            .map_err(|e| IssuerError::LockPoisoned(e.to_string()))
    }
}

impl Default for CredentialIssuer {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
