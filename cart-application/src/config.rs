//! 购物车服务配置
//!
use crate::error::{AppError, AppResult};
use bon::Builder;
use std::time::Duration;

/// 载入响应与本地变更冲突时的处理策略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadConflictPolicy {
    /// 载入期间发生过本地变更则丢弃响应，保留本地状态
    #[default]
    KeepLocal,
    /// 无条件以响应覆盖（本地变更可能丢失）
    Overwrite,
}

/// 购物车服务配置
#[derive(Builder, Clone, Copy, Debug)]
pub struct CartServiceConfig {
    /// 广播缓冲区容量；订阅者落后超过该数量会跳过快照
    #[builder(default = 64)]
    pub bus_capacity: usize,
    /// 新订阅者是否立即收到当前快照
    #[builder(default)]
    pub replay_on_subscribe: bool,
    /// 单次载入的最大尝试次数（含首次）
    #[builder(default = 1)]
    pub load_attempts: u32,
    /// 两次尝试之间的等待
    #[builder(default = Duration::from_millis(200))]
    pub retry_delay: Duration,
    #[builder(default)]
    pub load_conflict: LoadConflictPolicy,
}

impl Default for CartServiceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CartServiceConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.bus_capacity == 0 {
            return Err(AppError::Validation("bus_capacity must be > 0".into()));
        }
        if self.load_attempts == 0 {
            return Err(AppError::Validation("load_attempts must be >= 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_preserve_no_replay_and_single_attempt() {
        let cfg = CartServiceConfig::default();
        assert_eq!(cfg.bus_capacity, 64);
        assert!(!cfg.replay_on_subscribe);
        assert_eq!(cfg.load_attempts, 1);
        assert_eq!(cfg.retry_delay, Duration::from_millis(200));
        assert_eq!(cfg.load_conflict, LoadConflictPolicy::KeepLocal);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cfg = CartServiceConfig::builder().bus_capacity(0).build();
        assert!(matches!(cfg.validate(), Err(AppError::Validation(_))));

        let cfg = CartServiceConfig::builder().load_attempts(0).build();
        assert!(matches!(cfg.validate(), Err(AppError::Validation(_))));
    }
}
