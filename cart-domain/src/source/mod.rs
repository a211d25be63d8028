//! 购物车数据源（CartDataSource）
//!
//! 外部协作方：一次性取回已保存的全部条目（无分页、无过滤）。
//! 具体后端（HTTP、数据库等）由上层实现并注入；本模块提供内存与 JSON 文件两种实现。
//!
use crate::cart_item::CartItem;
use crate::error::CartResult as Result;
use async_trait::async_trait;
use std::sync::Arc;

mod in_memory;
#[cfg(feature = "json-source")]
mod json_file;

pub use in_memory::InMemoryCartDataSource;
#[cfg(feature = "json-source")]
pub use json_file::JsonFileCartDataSource;

/// 数据源：返回已保存的购物车条目
#[async_trait]
pub trait CartDataSource: Send + Sync {
    /// 取回全部已保存条目
    async fn fetch_all(&self) -> Result<Vec<CartItem>>;
}

#[async_trait]
impl<T> CartDataSource for Arc<T>
where
    T: CartDataSource + ?Sized,
{
    async fn fetch_all(&self) -> Result<Vec<CartItem>> {
        (**self).fetch_all().await
    }
}
