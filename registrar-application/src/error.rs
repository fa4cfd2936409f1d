use registrar_domain::error::DomainError;

/// 应用层统一错误
///
/// 领域规则失败（未找到、校验不通过）以普通错误返回，展示为裸原因文本；
/// 仅存储层故障参与瞬态/永久分类，且只有重试装饰器会据此改变行为。
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("transient failure persisted after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: u32,
        source: Box<AppError>,
    },

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("handler already registered: query={query}")]
    AlreadyRegisteredQuery { query: &'static str },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl AppError {
    /// 瞬态错误：仅来自存储层的连接/超时类故障
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Domain(err) if err.is_transient())
    }
}

/// 统一 Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
