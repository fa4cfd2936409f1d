//! 领域层统一错误定义
//!
//! 聚焦领域规则与持久化两类错误的最小必要集合，
//! 并为重试策略提供瞬态/永久的分类依据。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 领域规则 ---
    #[error("{reason}")]
    NotFound { reason: String },
    #[error("{reason}")]
    Validation { reason: String },

    // --- 持久化 ---
    #[error("storage unavailable: {reason}")]
    ConnectionLost { reason: String },
    #[error("storage timeout: {reason}")]
    Timeout { reason: String },
    #[error("constraint violated: {reason}")]
    ConstraintViolation { reason: String },
    #[error("repository error: {reason}")]
    Repository { reason: String },
}

impl DomainError {
    /// 瞬态错误：连接/超时类故障，重试可能恢复；
    /// 其余（校验、未找到、约束冲突等）重试无意义。
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionLost { .. } | Self::Timeout { .. }
        )
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
