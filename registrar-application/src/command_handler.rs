use crate::{command::Command, context::AppContext, error::AppError};
use async_trait::async_trait;

/// 命令处理器：每个具体命令恰有一个处理器
///
/// 契约：处理器自行开启单元工作，经仓储读写实体，
/// 成功路径上恰好提交一次，失败路径上绝不提交。
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Command,
{
    async fn handle(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError>;
}
