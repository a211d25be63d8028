//! 领域层统一错误定义
//!
//! 聚焦条目查找、载入数据校验、状态约束、数据源与广播等最小必要集合，
//! 便于在应用层统一转换。
//!
use crate::value_object::ProductId;
use thiserror::Error;

/// 统一错误类型（购物车领域最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CartError {
    // --- 查找 ---
    #[error("item not found: id={id}")]
    ItemNotFound { id: ProductId },

    // --- 命令与状态 ---
    #[error("invalid item: {reason}")]
    InvalidItem { reason: String },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    // --- 数据源 ---
    #[error("cart data source error: {reason}")]
    Source { reason: String },
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    // --- 广播 ---
    #[error("subscriber lagged behind, skipped {skipped} snapshots")]
    Lagged { skipped: u64 },
}

impl CartError {
    pub fn source_failed(reason: impl Into<String>) -> Self {
        Self::Source {
            reason: reason.into(),
        }
    }

    pub fn invalid_item(reason: impl Into<String>) -> Self {
        Self::InvalidItem {
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type CartResult<T> = Result<T, CartError>;

impl From<std::io::Error> for CartError {
    fn from(err: std::io::Error) -> Self {
        CartError::Source {
            reason: err.to_string(),
        }
    }
}
