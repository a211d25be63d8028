//! 购物车应用层（cart-application）
//!
//! `CartService` 是购物车状态的唯一持有者：执行加/减/载入，读取当前状态，
//! 并向订阅者提供条目、单个条目与总价三种更新流。
//!
pub mod config;
pub mod error;
pub mod outcome;
pub mod service;
pub mod updates;

pub use config::{CartServiceConfig, LoadConflictPolicy};
pub use error::{AppError, AppResult};
pub use outcome::{LoadOutcome, RemoveOutcome};
pub use service::CartService;
