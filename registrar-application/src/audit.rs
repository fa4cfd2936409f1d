//! 审计记录与落地（Audit）
//!
//! 每次对外派发恰好产生一条 [`AuditRecord`]，由外部提供的
//! [`AuditSink`] 落地。审计是旁路：落地失败不得影响业务结果。
//!
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;
use std::sync::PoisonError;

/// 操作的最终结论
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AuditOutcome {
    Success,
    Failure { reason: String },
}

impl AuditOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// 从业务结果提取结论（失败时保留展示文本）
    pub fn from_result<T, E: std::fmt::Display>(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(err) => Self::Failure {
                reason: err.to_string(),
            },
        }
    }
}

/// 一次对外派发的审计记录
///
/// `summary` 是请求的序列化摘要；命令/查询只携带领域允许公开的
/// 字段，敏感字段应在类型上以 `#[serde(skip_serializing)]` 排除。
#[derive(Builder, Clone, Debug, Serialize)]
pub struct AuditRecord {
    /// 操作的稳定名称（`Command::NAME`/`Query::NAME`）
    pub operation: &'static str,
    /// 请求摘要（JSON）
    pub summary: String,
    /// 关联追踪标识（来自 `AppContext`）
    pub correlation_id: Option<String>,
    /// 执行者标识（来自 `AppContext`）
    pub actor: Option<String>,
    /// 最终结论：与返回给调用方的结果一致
    pub outcome: AuditOutcome,
    pub recorded_at: DateTime<Utc>,
}

/// 审计落地接口：每次对外派发被调用一次
///
/// 实现方自行处理落地失败；返回错误仅用于诊断日志，
/// 绝不改变业务结果。
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &AuditRecord) -> anyhow::Result<()>;
}

/// 基于 tracing 的审计落地
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: &AuditRecord) -> anyhow::Result<()> {
        match &record.outcome {
            AuditOutcome::Success => tracing::info!(
                operation = record.operation,
                summary = %record.summary,
                correlation_id = record.correlation_id.as_deref(),
                actor = record.actor.as_deref(),
                "operation succeeded"
            ),
            AuditOutcome::Failure { reason } => tracing::warn!(
                operation = record.operation,
                summary = %record.summary,
                correlation_id = record.correlation_id.as_deref(),
                actor = record.actor.as_deref(),
                reason = %reason,
                "operation failed"
            ),
        }
        Ok(())
    }
}

/// 内存审计落地（测试与演示用）
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已落地记录的快照
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: &AuditRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}
