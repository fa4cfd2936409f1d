//! 数据库重试装饰器（DatabaseRetryDecorator)
//!
//! 包装任意处理器，对瞬态存储失败（连接/超时类）按配置的
//! 尝试上限重放；处理器对重试无感知。
//!
//! - 普通业务失败（未找到、校验不通过）与永久存储失败立即上抛；
//! - 每次尝试由内层处理器自行开启全新的单元工作，绝不复用已丢弃的事务；
//! - 尝试耗尽时返回带尝试次数的失败；
//! - `max_attempts = 1` 退化为"不重试，首次失败即上报"。
//!
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::config::RetryConfig;
use crate::context::AppContext;
use crate::error::AppError;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use async_trait::async_trait;

/// 重试装饰器：命令与查询两侧共用同一结构
pub struct DatabaseRetryDecorator<H> {
    inner: H,
    config: RetryConfig,
}

impl<H> DatabaseRetryDecorator<H> {
    pub fn new(inner: H, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl<C, H> CommandHandler<C> for DatabaseRetryDecorator<H>
where
    C: Command + Clone,
    H: CommandHandler<C>,
{
    async fn handle(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError> {
        let max = self.config.max_attempts();
        let mut attempt = 1u32;
        loop {
            match self.inner.handle(ctx, cmd.clone()).await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_transient() => {
                    if attempt >= max {
                        return Err(AppError::RetryExhausted {
                            attempts: attempt,
                            source: Box::new(err),
                        });
                    }
                    tracing::debug!(
                        operation = C::NAME,
                        attempt,
                        error = %err,
                        "transient storage failure, retrying"
                    );
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl<Q, H> QueryHandler<Q> for DatabaseRetryDecorator<H>
where
    Q: Query + Clone,
    H: QueryHandler<Q>,
{
    async fn handle(&self, ctx: &AppContext, q: Q) -> Result<Q::Dto, AppError> {
        let max = self.config.max_attempts();
        let mut attempt = 1u32;
        loop {
            match self.inner.handle(ctx, q.clone()).await {
                Ok(dto) => return Ok(dto),
                Err(err) if err.is_transient() => {
                    if attempt >= max {
                        return Err(AppError::RetryExhausted {
                            attempts: attempt,
                            source: Box::new(err),
                        });
                    }
                    tracing::debug!(
                        operation = Q::NAME,
                        attempt,
                        error = %err,
                        "transient storage failure, retrying"
                    );
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
