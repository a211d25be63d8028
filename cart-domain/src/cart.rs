//! 购物车聚合（Cart）
//!
//! 按插入顺序保存条目（标识唯一）与总价：
//! - `AddProduct`：已存在则数量加一，否则追加数量为 1 的新条目；
//! - `RemoveProduct`：数量为 1 或要求全部移除时删除条目，否则数量减一；
//!   条目不存在时不产生事件；
//! - `ReplaceItems`：以数据源载入的条目整体替换（先规范化）。
//!
//! 每个被应用的事件都会使版本号递增，并通过全量遍历重新计算总价。
//!
use crate::aggregate::Aggregate;
use crate::cart_item::{CartItem, checked_total};
use crate::error::{CartError, CartResult};
use crate::product::Product;
use crate::snapshot::CartSnapshot;
use crate::value_object::{ProductId, Version};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 购物车聚合
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    version: Version,
    items: Vec<CartItem>,
    total: Decimal,
}

/// 购物车命令
#[derive(Debug, Clone)]
pub enum CartCommand {
    AddProduct {
        product: Product,
    },
    RemoveProduct {
        product_id: ProductId,
        remove_all: bool,
    },
    ReplaceItems {
        items: Vec<CartItem>,
    },
}

/// 购物车事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    ItemAdded { product: Product },
    AmountIncreased { id: ProductId },
    AmountDecreased { id: ProductId },
    ItemRemoved { id: ProductId },
    ItemsReplaced { items: Vec<CartItem> },
}

impl CartEvent {
    /// 稳定的事件类型名（用于日志）
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ItemAdded { .. } => "cart.item_added",
            Self::AmountIncreased { .. } => "cart.amount_increased",
            Self::AmountDecreased { .. } => "cart.amount_decreased",
            Self::ItemRemoved { .. } => "cart.item_removed",
            Self::ItemsReplaced { .. } => "cart.items_replaced",
        }
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 生成当前状态的快照
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.version, self.items.clone(), self.total)
    }

    /// 计算应用事件后的条目与总价，不修改状态
    fn project(&self, event: &CartEvent) -> CartResult<(Vec<CartItem>, Decimal)> {
        let mut items = self.items.clone();
        match event {
            CartEvent::ItemAdded { product } => {
                items.push(CartItem::new(product.clone(), 1)?);
            }
            CartEvent::AmountIncreased { id } => {
                if let Some(item) = items.iter_mut().find(|item| item.id() == *id) {
                    *item = item.incremented()?;
                }
            }
            CartEvent::AmountDecreased { id } => {
                if let Some(item) = items.iter_mut().find(|item| item.id() == *id) {
                    *item = item.decremented()?;
                }
            }
            CartEvent::ItemRemoved { id } => {
                items.retain(|item| item.id() != *id);
            }
            CartEvent::ItemsReplaced { items: replaced } => {
                items = replaced.clone();
            }
        }
        let total = checked_total(&items)?;
        Ok((items, total))
    }

    fn commit(&mut self, items: Vec<CartItem>, total: Decimal) {
        self.items = items;
        self.total = total;
        self.version = self.version.next();
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = CartError;

    fn version(&self) -> Version {
        self.version
    }

    fn execute(&self, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = match command {
            CartCommand::AddProduct { product } => match self.item(product.id()) {
                Some(item) if item.is_saturated() => Err(CartError::InvalidState {
                    reason: format!("amount of item {} cannot grow any further", item.id()),
                }),
                Some(item) => Ok(vec![CartEvent::AmountIncreased { id: item.id() }]),
                None => Ok(vec![CartEvent::ItemAdded { product }]),
            },
            CartCommand::RemoveProduct {
                product_id,
                remove_all,
            } => match self.item(product_id) {
                None => Ok(vec![]),
                Some(item) if remove_all || item.amount() <= 1 => {
                    Ok(vec![CartEvent::ItemRemoved { id: product_id }])
                }
                Some(_) => Ok(vec![CartEvent::AmountDecreased { id: product_id }]),
            },
            CartCommand::ReplaceItems { items } => Ok(vec![CartEvent::ItemsReplaced {
                items: normalize_loaded(items)?,
            }]),
        }?;

        // 先在副本上演算，金额越界在产生事件前报告
        let mut preview = self.clone();
        for event in &events {
            let (items, total) = preview.project(event)?;
            preview.commit(items, total);
        }
        Ok(events)
    }

    fn apply(&mut self, event: &Self::Event) {
        match self.project(event) {
            Ok((items, total)) => self.commit(items, total),
            Err(err) => tracing::error!(
                event = event.event_type(),
                error = %err,
                "cart event cannot be applied, state unchanged"
            ),
        }
    }
}

/// 规范化数据源载入的条目：
/// - 条目标识与商品标识不一致时整体拒绝；
/// - 丢弃数量为 0 的条目；
/// - 相同标识的条目合并到首次出现的位置；
/// - 依据单价与数量重新计算小计。
pub fn normalize_loaded(items: Vec<CartItem>) -> CartResult<Vec<CartItem>> {
    let mut out: Vec<CartItem> = Vec::with_capacity(items.len());
    let mut positions: HashMap<ProductId, usize> = HashMap::new();

    for mut item in items {
        item.check_loaded()?;
        if item.amount() == 0 {
            tracing::warn!(id = %item.id(), "dropping loaded cart item with zero amount");
            continue;
        }
        match positions.get(&item.id()).and_then(|&pos| out.get_mut(pos)) {
            Some(existing) => {
                tracing::debug!(id = %item.id(), "merging duplicate loaded cart item");
                existing.absorb(&item)?;
            }
            None => {
                item.recalculate()?;
                positions.insert(item.id(), out.len());
                out.push(item);
            }
        }
    }

    Ok(out)
}
