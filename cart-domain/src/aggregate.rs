//! 聚合（Aggregate）抽象
//!
//! 约束一个聚合的核心行为：
//! - `execute` 将命令转换为事件（不改变状态）；
//! - `apply` 将事件投影到状态（改变状态）；
//! - `handle` 组合二者，命令失败时状态保持不变。
//!
use crate::value_object::Version;
use std::error::Error;

/// 聚合接口
pub trait Aggregate: Default + Clone + Send + Sync {
    /// 该聚合支持的命令类型
    type Command;
    /// 该聚合产生的事件类型
    type Event;
    /// 命令执行环节的错误类型
    type Error: Error + Send + Sync + 'static;

    /// 当前版本（每应用一个事件递增）
    fn version(&self) -> Version;

    /// 执行命令，返回产生的事件列表
    fn execute(&self, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// 应用事件，更新聚合状态
    fn apply(&mut self, event: &Self::Event);

    /// 执行命令并依次应用产生的事件
    fn handle(&mut self, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.execute(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}
