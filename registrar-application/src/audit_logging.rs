//! 审计日志装饰器（AuditLoggingDecorator）
//!
//! 记录"尝试了什么操作、最终结论如何"，与其下是否发生过重试无关：
//! - 每次对外调用恰好调用内层处理器一次、产生恰好一条审计记录；
//! - 记录的结论与返回给调用方的结果一致；
//! - 落地失败只记日志，绝不改变业务结果。
//!
//! 装配时审计必须位于最外层（见 [`Dispatcher`](crate::dispatcher::Dispatcher)），
//! 以看到重试之后的真实最终结果。
//!
use crate::audit::{AuditOutcome, AuditRecord, AuditSink};
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// 审计装饰器：命令与查询两侧共用同一结构
pub struct AuditLoggingDecorator<H> {
    inner: H,
    sink: Arc<dyn AuditSink>,
}

impl<H> AuditLoggingDecorator<H> {
    pub fn new(inner: H, sink: Arc<dyn AuditSink>) -> Self {
        Self { inner, sink }
    }

    fn emit(
        &self,
        operation: &'static str,
        summary: String,
        ctx: &AppContext,
        outcome: AuditOutcome,
    ) {
        let record = AuditRecord::builder()
            .operation(operation)
            .summary(summary)
            .maybe_correlation_id(ctx.correlation_id.clone())
            .maybe_actor(ctx.actor.clone())
            .outcome(outcome)
            .recorded_at(Utc::now())
            .build();
        if let Err(err) = self.sink.record(&record) {
            // 审计是旁路,不得否决业务结果
            tracing::warn!(operation, error = %err, "audit sink failed");
        }
    }
}

fn request_summary<T: Serialize>(request: &T) -> String {
    serde_json::to_string(request).unwrap_or_else(|_| "<unserializable>".to_string())
}

#[async_trait]
impl<C, H> CommandHandler<C> for AuditLoggingDecorator<H>
where
    C: Command + Serialize,
    H: CommandHandler<C>,
{
    async fn handle(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError> {
        let summary = request_summary(&cmd);
        tracing::debug!(operation = C::NAME, summary = %summary, "dispatching command");

        let result = self.inner.handle(ctx, cmd).await;
        self.emit(C::NAME, summary, ctx, AuditOutcome::from_result(&result));
        result
    }
}

#[async_trait]
impl<Q, H> QueryHandler<Q> for AuditLoggingDecorator<H>
where
    Q: Query + Serialize,
    H: QueryHandler<Q>,
{
    async fn handle(&self, ctx: &AppContext, q: Q) -> Result<Q::Dto, AppError> {
        let summary = request_summary(&q);
        tracing::debug!(operation = Q::NAME, summary = %summary, "dispatching query");

        let result = self.inner.handle(ctx, q).await;
        self.emit(Q::NAME, summary, ctx, AuditOutcome::from_result(&result));
        result
    }
}
