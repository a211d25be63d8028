use cart_domain::value_object::Version;
use serde::Serialize;

/// `remove_product` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemoveOutcome {
    /// 数量减一，`remaining` 为剩余数量
    Decremented { remaining: u32 },
    /// 条目已从购物车删除
    Removed,
    /// 购物车中没有该商品（仍会重新发布快照）
    NotInCart,
}

/// `load_stored_items` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// 数据源的条目已替换购物车内容并发布
    Applied {
        ticket: u64,
        version: Version,
        items: usize,
    },
    /// 票据更新的载入（`latest`）已被应用，本次响应被丢弃
    Superseded { ticket: u64, latest: u64 },
    /// 期间购物车发生了本地变更，按 `KeepLocal` 策略丢弃本次响应
    Conflicted {
        ticket: u64,
        requested_at: Version,
        current: Version,
    },
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn ticket(&self) -> u64 {
        match self {
            Self::Applied { ticket, .. }
            | Self::Superseded { ticket, .. }
            | Self::Conflicted { ticket, .. } => *ticket,
        }
    }
}
