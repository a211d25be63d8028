use super::CartDataSource;
use crate::cart_item::CartItem;
use crate::error::{CartError, CartResult as Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 内存数据源：用于测试、示例与本地开发
///
/// 可预置条目，也可注入失败（`fail_next`）以模拟数据源不可用。
#[derive(Clone, Default)]
pub struct InMemoryCartDataSource {
    items: Arc<Mutex<Vec<CartItem>>>,
    failures: Arc<Mutex<Vec<String>>>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryCartDataSource {
    pub fn new(items: Vec<CartItem>) -> Self {
        let source = Self::default();
        source.set_items(items);
        source
    }

    /// 替换已保存的条目
    pub fn set_items(&self, items: Vec<CartItem>) {
        *self.items.lock().unwrap_or_else(PoisonError::into_inner) = items;
    }

    /// 让接下来的一次 `fetch_all` 以给定原因失败（可多次调用累积）
    pub fn fail_next(&self, reason: impl Into<String>) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reason.into());
    }

    /// 已发生的 `fetch_all` 调用次数（含失败）
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CartDataSource for InMemoryCartDataSource {
    async fn fetch_all(&self) -> Result<Vec<CartItem>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);

        let failure = {
            let mut failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
            (!failures.is_empty()).then(|| failures.remove(0))
        };
        if let Some(reason) = failure {
            return Err(CartError::source_failed(reason));
        }

        Ok(self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;
    use crate::value_object::ProductId;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn returns_seeded_items_and_injected_failures() {
        let item = CartItem::new(Product::new(ProductId::new(1), Decimal::TEN), 2).unwrap();
        let source = InMemoryCartDataSource::new(vec![item.clone()]);

        source.fail_next("offline");
        let err = source.fetch_all().await.unwrap_err();
        assert_eq!(err.to_string(), "cart data source error: offline");

        assert_eq!(source.fetch_all().await.unwrap(), vec![item]);
        assert_eq!(source.fetch_count(), 2);

        source.set_items(vec![]);
        assert!(source.fetch_all().await.unwrap().is_empty());
    }
}
