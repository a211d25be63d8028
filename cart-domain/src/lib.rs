//! 购物车领域层（cart-domain）
//!
//! 面向店面 UI 的单会话购物车状态：
//! - 值对象（`value_object`）：商品标识与版本号；
//! - 商品（`product`）与购物车条目（`cart_item`）；
//! - 购物车聚合（`cart`）：命令 → 事件 → 应用，维护条目顺序、小计与总价；
//! - 快照（`snapshot`）与快照广播（`eventing`）；
//! - 数据源协议（`source`）及内存/JSON 文件实现。
//!
//! 典型用法：
//! 1. 通过 `Aggregate::handle` 向 `Cart` 发送 `CartCommand`；
//! 2. 以 `Cart::snapshot` 生成快照并经 `SnapshotBus` 发布；
//! 3. 由应用层（cart-application）统一编排加锁、发布与载入。
//!
pub mod aggregate;
pub mod cart;
pub mod cart_item;
pub mod error;
#[cfg(feature = "eventing")]
pub mod eventing;
pub mod product;
pub mod snapshot;
pub mod source;
pub mod value_object;

pub use cart::{Cart, CartCommand, CartEvent};
pub use cart_item::CartItem;
pub use error::{CartError, CartResult};
pub use product::Product;
pub use snapshot::CartSnapshot;
pub use value_object::{ProductId, Version};
