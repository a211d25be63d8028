//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象：商品标识 `ProductId` 与购物车版本号 `Version`。
//!

use std::fmt;

use cart_macros::{identifier, value_object};

/// 商品标识（同时作为购物车条目的标识）
///
/// ```
/// use cart_domain::value_object::ProductId;
///
/// let id: ProductId = "12".parse().unwrap();
/// assert_eq!(id, ProductId::new(12));
/// assert_eq!(id.to_string(), "12");
/// ```
#[identifier]
pub struct ProductId(u64);

/// 版本号（购物车每次状态变化递增，用于快照排序与载入请求的防护）
///
/// 提供类型安全的版本号操作，避免直接使用整数导致的语义不明确问题。
///
/// # 示例
///
/// ```
/// use cart_domain::value_object::Version;
///
/// let v1 = Version::new();
/// assert_eq!(v1.value(), 0);
/// assert!(v1.is_new());
///
/// let v2 = v1.next();
/// assert_eq!(v2.value(), 1);
/// assert!(v2 > v1);
/// ```
// value_object 宏提供 Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq；
// ordered = true 追加 Copy, PartialOrd, Ord, Hash
#[value_object(ordered = true)]
pub struct Version(u64);

impl Version {
    /// 创建初始版本（版本号为 0，对应空购物车）
    pub const fn new() -> Self {
        Self(0)
    }

    /// 从值创建版本号
    pub const fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// 获取下一个版本号
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// 获取版本号的值
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// 是否为初始版本（尚未发生任何变更）
    pub const fn is_new(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self::from_value(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.value()
    }
}
