//! 购物车服务（CartService）
//!
//! 持有唯一的购物车聚合，编排“加锁 → 执行命令 → 应用事件 → 发布快照”：
//! - 变更在写锁内完成并在释放前发布，订阅者看到的顺序与变更顺序一致；
//! - 读取返回当前状态的拷贝；
//! - 载入使用递增的载入票据与版本号防护：比已应用的载入更旧的响应被丢弃，
//!   载入期间发生本地变更时按策略处理。
//!
use crate::config::{CartServiceConfig, LoadConflictPolicy};
use crate::error::{AppError, AppResult};
use crate::outcome::{LoadOutcome, RemoveOutcome};
use crate::updates;
use cart_domain::aggregate::Aggregate;
use cart_domain::error::{CartError, CartResult};
use cart_domain::eventing::{InMemorySnapshotBus, SnapshotBus};
use cart_domain::source::CartDataSource;
use cart_domain::{Cart, CartCommand, CartEvent, CartItem, CartSnapshot, Product, ProductId};
use cart_domain::value_object::Version;
use futures_core::stream::BoxStream;
use futures_util::{StreamExt, future, stream};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 购物车聚合管理器
pub struct CartService<S> {
    cart: RwLock<Cart>,
    bus: Arc<dyn SnapshotBus>,
    source: S,
    config: CartServiceConfig,
    load_seq: AtomicU64,
    /// 最近一次被应用的载入票据（仅在持有写锁时更新）
    applied_load: AtomicU64,
    /// 最近一次本地变更后的版本值（仅在持有写锁时更新）
    local_edit: AtomicU64,
}

impl<S> CartService<S>
where
    S: CartDataSource,
{
    /// 使用内存快照总线创建服务
    pub fn new(source: S, config: CartServiceConfig) -> AppResult<Self> {
        config.validate()?;
        let bus = Arc::new(InMemorySnapshotBus::new(config.bus_capacity));
        Self::with_bus(source, bus, config)
    }

    /// 使用给定的快照总线创建服务（`bus_capacity` 不再生效）
    pub fn with_bus(
        source: S,
        bus: Arc<dyn SnapshotBus>,
        config: CartServiceConfig,
    ) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            cart: RwLock::new(Cart::new()),
            bus,
            source,
            config,
            load_seq: AtomicU64::new(0),
            applied_load: AtomicU64::new(0),
            local_edit: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &CartServiceConfig {
        &self.config
    }

    // ---- 变更 ----

    /// 从数据源载入已保存的条目并整体替换购物车内容
    ///
    /// - 数据源失败时按 `load_attempts`/`retry_delay` 重试，最终失败返回
    ///   `AppError::LoadFailed`，状态保持不变且不发布；
    /// - 更新的载入已先被应用时返回 `LoadOutcome::Superseded`（更新的载入失败不影响本次）；
    /// - 等待期间发生本地变更且策略为 `KeepLocal` 时返回 `LoadOutcome::Conflicted`。
    pub async fn load_stored_items(&self) -> AppResult<LoadOutcome> {
        let ticket = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let requested_at = self.read().version();
        tracing::debug!(ticket, %requested_at, "loading stored cart items");

        let items = self.fetch_with_retry(ticket).await?;

        let mut cart = self.write();
        let latest = self.applied_load.load(Ordering::SeqCst);
        if latest > ticket {
            tracing::warn!(ticket, latest, "discarding superseded cart load");
            return Ok(LoadOutcome::Superseded { ticket, latest });
        }

        let current = cart.version();
        let edited = self.local_edit.load(Ordering::SeqCst) > requested_at.value();
        if edited && self.config.load_conflict == LoadConflictPolicy::KeepLocal {
            tracing::warn!(
                ticket,
                %requested_at,
                %current,
                "discarding cart load, cart changed while loading"
            );
            return Ok(LoadOutcome::Conflicted {
                ticket,
                requested_at,
                current,
            });
        }

        let events = cart.handle(CartCommand::ReplaceItems { items })?;
        self.applied_load.store(ticket, Ordering::SeqCst);
        let snapshot = self.publish(&cart, &events);
        tracing::info!(
            ticket,
            version = %snapshot.version(),
            items = snapshot.items().len(),
            total = %snapshot.total(),
            "stored cart items loaded"
        );

        Ok(LoadOutcome::Applied {
            ticket,
            version: snapshot.version(),
            items: snapshot.items().len(),
        })
    }

    /// 加入一件商品：已存在则数量加一，否则新增数量为 1 的条目
    pub fn add_product(&self, product: Product) -> AppResult<CartSnapshot> {
        let mut cart = self.write();
        let events = cart.handle(CartCommand::AddProduct { product })?;
        self.mark_local_edit(&cart, &events);
        Ok(self.publish(&cart, &events))
    }

    /// 移除商品：`remove_all` 为真或数量为 1 时删除条目，否则数量减一；
    /// 商品不在购物车中时不改变状态，但仍重新发布快照
    pub fn remove_product(
        &self,
        product_id: impl Into<ProductId>,
        remove_all: bool,
    ) -> AppResult<RemoveOutcome> {
        let product_id = product_id.into();
        let mut cart = self.write();
        let events = cart.handle(CartCommand::RemoveProduct {
            product_id,
            remove_all,
        })?;
        self.mark_local_edit(&cart, &events);
        let snapshot = self.publish(&cart, &events);

        let outcome = match events.first() {
            Some(CartEvent::ItemRemoved { .. }) => RemoveOutcome::Removed,
            Some(_) => RemoveOutcome::Decremented {
                remaining: snapshot.item(product_id).map_or(0, CartItem::amount),
            },
            None => {
                tracing::debug!(id = %product_id, "remove requested for product not in cart");
                RemoveOutcome::NotInCart
            }
        };
        Ok(outcome)
    }

    // ---- 读取 ----

    pub fn items(&self) -> Vec<CartItem> {
        self.read().items().to_vec()
    }

    pub fn item(&self, id: ProductId) -> Option<CartItem> {
        self.read().item(id).cloned()
    }

    /// 与 `item` 相同，但条目不存在时返回 `CartError::ItemNotFound`
    pub fn require_item(&self, id: ProductId) -> AppResult<CartItem> {
        self.item(id)
            .ok_or_else(|| AppError::Domain(CartError::ItemNotFound { id }))
    }

    pub fn total(&self) -> Decimal {
        self.read().total()
    }

    pub fn version(&self) -> Version {
        self.read().version()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.read().snapshot()
    }

    // ---- 订阅 ----

    /// 原始快照流；启用 `replay_on_subscribe` 时先产出当前快照
    pub fn subscribe(&self) -> BoxStream<'static, CartResult<CartSnapshot>> {
        if !self.config.replay_on_subscribe {
            return self.bus.subscribe();
        }
        // 持有读锁期间订阅，发布（持写锁）不会落在当前快照与实时流之间
        let cart = self.read();
        let live = self.bus.subscribe();
        let current = cart.snapshot();
        drop(cart);
        stream::once(future::ready(Ok(current))).chain(live).boxed()
    }

    /// 每次变化后的全部条目
    pub fn cart_updates(&self) -> BoxStream<'static, Vec<CartItem>> {
        updates::items(self.subscribe())
    }

    /// 每次变化后按标识查找的单个条目
    pub fn item_updates(&self, id: ProductId) -> BoxStream<'static, Option<CartItem>> {
        updates::item(self.subscribe(), id)
    }

    /// 每次变化后的总价
    pub fn total_updates(&self) -> BoxStream<'static, Decimal> {
        updates::total(self.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    // ---- 内部 ----

    async fn fetch_with_retry(&self, ticket: u64) -> AppResult<Vec<CartItem>> {
        let attempts = self.config.load_attempts;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.source.fetch_all().await {
                Ok(items) => return Ok(items),
                Err(err) if attempt < attempts => {
                    tracing::warn!(ticket, attempt, error = %err, "cart load failed, retrying");
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(err) => {
                    tracing::warn!(ticket, attempt, error = %err, "cart load failed, keeping current state");
                    return Err(AppError::LoadFailed {
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }

    fn mark_local_edit(&self, cart: &Cart, events: &[CartEvent]) {
        if !events.is_empty() {
            self.local_edit
                .store(cart.version().value(), Ordering::SeqCst);
        }
    }

    fn publish(&self, cart: &Cart, events: &[CartEvent]) -> CartSnapshot {
        let snapshot = cart.snapshot();
        let reached = self.bus.publish(snapshot.clone());
        tracing::debug!(
            events = ?events.iter().map(CartEvent::event_type).collect::<Vec<_>>(),
            version = %snapshot.version(),
            total = %snapshot.total(),
            subscribers = reached,
            "cart snapshot published"
        );
        snapshot
    }

    fn read(&self) -> RwLockReadGuard<'_, Cart> {
        self.cart.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Cart> {
        self.cart.write().unwrap_or_else(PoisonError::into_inner)
    }
}
