//! 商品（Product）
//!
//! 购物车之外的实体，对购物车而言不可变：仅依赖其标识与价格，
//! 其余展示字段原样保存在 `attributes` 中。
//!
use crate::value_object::ProductId;
use bon::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 商品
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 商品标识
    id: ProductId,
    /// 单价
    price: Decimal,
    /// 展示名称
    #[builder(default, into)]
    #[serde(default)]
    name: String,
    /// 其他展示字段（图片、描述等），序列化时与上述字段平铺
    #[builder(default)]
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Product {
    /// 仅以标识与价格创建商品
    pub fn new(id: ProductId, price: Decimal) -> Self {
        Self {
            id,
            price,
            name: String::new(),
            attributes: Map::new(),
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// 读取单个展示字段
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl From<&Product> for ProductId {
    fn from(product: &Product) -> Self {
        product.id
    }
}
