//! 统一派发入口（Dispatcher）
//!
//! 每个请求类型的处理器在注册时被包成固定装饰链
//! `Audit(Retry(Handler))`，顺序不可变更：
//! - 审计必须最外层，才能看到全部重试之后的真实最终结果，
//!   并保证每次对外调用恰好一条审计记录；
//! - 重试在审计之内、处理器之外，使每次尝试获得全新的单元工作。
//!
//! 链由注册方法在构造时固定，调用方无法打乱顺序。
//!
use crate::audit::AuditSink;
use crate::audit_logging::AuditLoggingDecorator;
use crate::command::Command;
use crate::command_bus::CommandBus;
use crate::command_handler::CommandHandler;
use crate::config::RetryConfig;
use crate::context::AppContext;
use crate::error::AppError;
use crate::inmemory_command_bus::InMemoryCommandBus;
use crate::inmemory_query_bus::InMemoryQueryBus;
use crate::query::Query;
use crate::query_bus::QueryBus;
use crate::query_handler::QueryHandler;
use crate::retry::DatabaseRetryDecorator;
use serde::Serialize;
use std::sync::Arc;

/// 进程内派发器：命令与查询的统一入口
pub struct Dispatcher {
    commands: InMemoryCommandBus,
    queries: InMemoryQueryBus,
    retry: RetryConfig,
    audit_sink: Arc<dyn AuditSink>,
}

impl Dispatcher {
    pub fn new(retry: RetryConfig, audit_sink: Arc<dyn AuditSink>) -> Self {
        Self {
            commands: InMemoryCommandBus::new(),
            queries: InMemoryQueryBus::new(),
            retry,
            audit_sink,
        }
    }

    /// 注册命令处理器（自动套上固定装饰链）
    pub fn register_command<C, H>(&self, handler: H) -> Result<(), AppError>
    where
        C: Command + Clone + Serialize,
        H: CommandHandler<C> + 'static,
    {
        let chain = AuditLoggingDecorator::new(
            DatabaseRetryDecorator::new(handler, self.retry),
            Arc::clone(&self.audit_sink),
        );
        self.commands.register::<C, _>(Arc::new(chain))
    }

    /// 注册查询处理器（自动套上固定装饰链）
    pub fn register_query<Q, H>(&self, handler: H) -> Result<(), AppError>
    where
        Q: Query + Clone + Serialize,
        H: QueryHandler<Q> + 'static,
    {
        let chain = AuditLoggingDecorator::new(
            DatabaseRetryDecorator::new(handler, self.retry),
            Arc::clone(&self.audit_sink),
        );
        self.queries.register::<Q, _>(Arc::new(chain))
    }

    /// 派发命令
    pub async fn dispatch_command<C>(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError>
    where
        C: Command,
    {
        self.commands.dispatch(ctx, cmd).await
    }

    /// 派发查询，返回该查询的 DTO
    pub async fn dispatch_query<Q>(&self, ctx: &AppContext, q: Q) -> Result<Q::Dto, AppError>
    where
        Q: Query,
    {
        self.queries.dispatch(ctx, q).await
    }

    /// 已注册的命令名（只读视图）
    pub fn registered_commands(&self) -> Vec<&'static str> {
        self.commands.registered_commands()
    }

    /// 已注册的查询名（只读视图）
    pub fn registered_queries(&self) -> Vec<&'static str> {
        self.queries.registered_queries()
    }
}
