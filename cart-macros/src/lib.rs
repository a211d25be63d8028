//! 购物车领域过程宏（cart-macros）
//!
//! - `#[value_object]`：为值对象统一追加派生；
//! - `#[identifier]`：为单字段 tuple struct 标识类型生成派生与转换实现。
//!
use proc_macro::TokenStream;

mod derive_utils;
mod identifier;
mod value_object;

/// 值对象宏
/// 用法：`#[value_object]`、`#[value_object(debug = false)]`、`#[value_object(ordered = true)]`
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}

/// 标识类型宏
/// 用法：`#[identifier] pub struct ProductId(u64);`
/// 内部类型需为 `Copy + Display + FromStr`（如整数类型）。
#[proc_macro_attribute]
pub fn identifier(attr: TokenStream, item: TokenStream) -> TokenStream {
    identifier::expand(attr, item)
}
