//! 购物车快照（CartSnapshot）
//!
//! 某一时刻购物车状态的不可变视图，由广播总线分发给订阅者。
//!
use crate::cart_item::CartItem;
use crate::value_object::{ProductId, Version};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 购物车快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    version: Version,
    items: Vec<CartItem>,
    total: Decimal,
    occurred_at: DateTime<Utc>,
}

impl CartSnapshot {
    pub(crate) fn new(version: Version, items: Vec<CartItem>, total: Decimal) -> Self {
        Self {
            version,
            items,
            total,
            occurred_at: Utc::now(),
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// 按商品标识查找条目
    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}
