//! 快照广播（eventing）
//!
//! 购物车每次变化后向零个或多个订阅者推送新快照：
//! - `SnapshotBus`：统一发布/订阅接口；
//! - `InMemorySnapshotBus`：基于 `tokio::sync::broadcast` 的进程内实现。
//!
//! 订阅只接收订阅之后发布的快照，不重放历史；丢弃返回的流即取消订阅。
//!
pub mod bus;
pub mod bus_inmemory;

pub use bus::SnapshotBus;
pub use bus_inmemory::InMemorySnapshotBus;
