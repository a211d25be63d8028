//! 快照总线（SnapshotBus）协议
//!
//! 定义快照发布与订阅的统一抽象。发布为同步调用，便于在持有状态写锁时
//! 完成发布，从而保证订阅者观察到的顺序与变更顺序一致；订阅返回
//! 'static 生命周期的流，便于在 tokio::spawn 中消费。
//!
use crate::{error::CartResult as Result, snapshot::CartSnapshot};
use futures_core::stream::BoxStream;

/// 快照总线：负责分发快照与订阅快照流
pub trait SnapshotBus: Send + Sync {
    /// 发布快照，返回送达的订阅者数量（无订阅者时为 0，不视为错误）
    fn publish(&self, snapshot: CartSnapshot) -> usize;

    /// 订阅此后发布的快照
    fn subscribe(&self) -> BoxStream<'static, Result<CartSnapshot>>;

    /// 当前订阅者数量
    fn subscriber_count(&self) -> usize;
}
