//! 内存版快照总线（InMemorySnapshotBus）
//!
//! 基于 `tokio::sync::broadcast` 实现，满足 `SnapshotBus` 协议：
//! - `publish`：克隆并广播快照；
//! - `subscribe`：返回 `'static` 生命周期的快照流；
//! - 订阅者落后超过 `capacity` 个快照时，流中产生一次 `CartError::Lagged`，
//!   随后从仍在缓冲区内的最早快照继续。

use crate::error::{CartError, CartResult as Result};
use crate::eventing::SnapshotBus;
use crate::snapshot::CartSnapshot;
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

/// 简单的内存快照总线实现
#[derive(Clone)]
pub struct InMemorySnapshotBus {
    tx: broadcast::Sender<CartSnapshot>,
}

impl InMemorySnapshotBus {
    /// 创建一个内存总线，`capacity` 为广播缓冲区容量（必须大于 0）
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }
}

impl SnapshotBus for InMemorySnapshotBus {
    fn publish(&self, snapshot: CartSnapshot) -> usize {
        // 若当前无订阅者，broadcast 的 send 会返回错误，这里视为非致命并忽略
        self.tx.send(snapshot).unwrap_or(0)
    }

    fn subscribe(&self) -> BoxStream<'static, Result<CartSnapshot>> {
        let rx = self.tx.subscribe();
        let stream = BroadcastStream::new(rx).map(|r| {
            r.map_err(|e| match e {
                BroadcastStreamRecvError::Lagged(skipped) => CartError::Lagged { skipped },
            })
        });
        Box::pin(stream)
    }

    fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregate;
    use crate::cart::{Cart, CartCommand};
    use crate::product::Product;
    use crate::value_object::{ProductId, Version};
    use rust_decimal::Decimal;

    fn mutate(cart: &mut Cart, id: u64) -> CartSnapshot {
        cart.handle(CartCommand::AddProduct {
            product: Product::new(ProductId::new(id), Decimal::ONE),
        })
        .unwrap();
        cart.snapshot()
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_not_an_error() {
        let bus = InMemorySnapshotBus::new(4);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(Cart::new().snapshot()), 0);
    }

    #[tokio::test]
    async fn every_subscriber_sees_every_later_snapshot() {
        let bus = InMemorySnapshotBus::new(16);
        let mut cart = Cart::new();

        // 订阅前发布的快照不会被重放
        bus.publish(mutate(&mut cart, 1));

        let mut a = bus.subscribe();
        let mut b = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        assert_eq!(bus.publish(mutate(&mut cart, 2)), 2);
        assert_eq!(bus.publish(mutate(&mut cart, 2)), 2);

        for stream in [&mut a, &mut b] {
            let first = stream.next().await.unwrap().unwrap();
            let second = stream.next().await.unwrap().unwrap();
            assert_eq!(first.version(), Version::from_value(2));
            assert_eq!(second.version(), Version::from_value(3));
            assert_eq!(second.total(), Decimal::from(3));
        }

        drop(a);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn slow_subscriber_gets_lagged_error_then_continues() {
        let bus = InMemorySnapshotBus::new(2);
        let mut cart = Cart::new();
        let mut stream = bus.subscribe();

        for _ in 0..5 {
            bus.publish(mutate(&mut cart, 1));
        }

        match stream.next().await {
            Some(Err(CartError::Lagged { skipped })) => assert_eq!(skipped, 3),
            other => panic!("unexpected {other:?}"),
        }
        let next = stream.next().await.unwrap().unwrap();
        assert_eq!(next.version(), Version::from_value(4));
    }
}
