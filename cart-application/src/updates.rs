//! 更新流（update streams）
//!
//! 将原始快照流映射为视图层关心的三种流：全部条目、单个条目、总价。
//! 落后的订阅者跳过的快照记录为告警，流本身继续。
//!
use cart_domain::error::CartResult;
use cart_domain::{CartItem, CartSnapshot, ProductId};
use futures_core::stream::BoxStream;
use futures_util::{StreamExt, future};
use rust_decimal::Decimal;

/// 丢弃错误项，只保留快照
pub fn snapshots(
    raw: BoxStream<'static, CartResult<CartSnapshot>>,
) -> BoxStream<'static, CartSnapshot> {
    raw.filter_map(|r| {
        future::ready(match r {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "cart update stream skipped snapshots");
                None
            }
        })
    })
    .boxed()
}

/// 每次变化后的全部条目
pub fn items(raw: BoxStream<'static, CartResult<CartSnapshot>>) -> BoxStream<'static, Vec<CartItem>> {
    snapshots(raw).map(CartSnapshot::into_items).boxed()
}

/// 每次变化后按标识重新查找的单个条目（不在购物车中时为 `None`）
pub fn item(
    raw: BoxStream<'static, CartResult<CartSnapshot>>,
    id: ProductId,
) -> BoxStream<'static, Option<CartItem>> {
    snapshots(raw)
        .map(move |snapshot| snapshot.item(id).cloned())
        .boxed()
}

/// 每次变化后的总价
pub fn total(raw: BoxStream<'static, CartResult<CartSnapshot>>) -> BoxStream<'static, Decimal> {
    snapshots(raw).map(|snapshot| snapshot.total()).boxed()
}
