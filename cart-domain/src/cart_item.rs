//! 购物车条目（CartItem）
//!
//! 一件商品在购物车中的数量与小计；小计始终等于 `单价 × 数量`。
//!
use crate::error::{CartError, CartResult};
use crate::product::Product;
use crate::value_object::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 购物车条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// 与 `product.id` 一致
    id: ProductId,
    /// 数量（>= 1）
    amount: u32,
    product: Product,
    /// 小计；数据源提供的值不可信，载入时重新计算
    #[serde(default)]
    subtotal: Decimal,
}

impl CartItem {
    /// 创建条目并计算小计；小计超出 `Decimal` 范围时返回 `CartError::InvalidState`
    pub fn new(product: Product, amount: u32) -> CartResult<Self> {
        let subtotal = priced(&product, amount)?;
        Ok(Self {
            id: product.id(),
            amount,
            product,
            subtotal,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// 数量是否已达上限
    pub fn is_saturated(&self) -> bool {
        self.amount == u32::MAX
    }

    /// 数量加一后的条目；原条目不变
    pub(crate) fn incremented(&self) -> CartResult<Self> {
        let amount = self
            .amount
            .checked_add(1)
            .ok_or_else(|| CartError::InvalidState {
                reason: format!("amount of item {} cannot grow any further", self.id),
            })?;
        self.with_amount(amount)
    }

    /// 数量减一后的条目；原条目不变
    pub(crate) fn decremented(&self) -> CartResult<Self> {
        self.with_amount(self.amount.saturating_sub(1))
    }

    /// 合并同一商品的另一条目（载入去重）；失败时条目不变
    pub(crate) fn absorb(&mut self, other: &CartItem) -> CartResult<()> {
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| CartError::InvalidState {
                reason: format!("amount overflow while merging item {}", self.id),
            })?;
        *self = self.with_amount(amount)?;
        Ok(())
    }

    /// 依据单价与数量重新计算小计；失败时条目不变
    pub(crate) fn recalculate(&mut self) -> CartResult<()> {
        self.subtotal = priced(&self.product, self.amount)?;
        Ok(())
    }

    fn with_amount(&self, amount: u32) -> CartResult<Self> {
        Ok(Self {
            id: self.id,
            amount,
            product: self.product.clone(),
            subtotal: priced(&self.product, amount)?,
        })
    }

    /// 校验载入条目的结构约束
    pub(crate) fn check_loaded(&self) -> CartResult<()> {
        if self.id != self.product.id() {
            return Err(CartError::invalid_item(format!(
                "item id {} does not match product id {}",
                self.id,
                self.product.id()
            )));
        }
        Ok(())
    }
}

fn priced(product: &Product, amount: u32) -> CartResult<Decimal> {
    product
        .price()
        .checked_mul(Decimal::from(amount))
        .ok_or_else(|| CartError::InvalidState {
            reason: format!("subtotal of item {} is out of range", product.id()),
        })
}

/// 各条目小计之和；超出 `Decimal` 范围时返回 `CartError::InvalidState`
pub(crate) fn checked_total<'a>(
    items: impl IntoIterator<Item = &'a CartItem>,
) -> CartResult<Decimal> {
    items.into_iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.subtotal())
            .ok_or_else(|| CartError::InvalidState {
                reason: "cart total is out of range".to_string(),
            })
    })
}
