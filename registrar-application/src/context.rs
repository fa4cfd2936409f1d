use bon::Builder;

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（命令/查询）所需的横切信息：
/// - `correlation_id`：关联追踪标识，贯穿日志与审计记录；
/// - `actor`：执行者（用户/系统）标识，仅用于审计归属。
///
/// 典型用法：
/// ```rust
/// use registrar_application::context::AppContext;
///
/// let ctx = AppContext::builder()
///     .maybe_correlation_id(Some("cor-123".into()))
///     .maybe_actor(Some("u-1".into()))
///     .build();
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct AppContext {
    /// 关联追踪标识（可选）
    pub correlation_id: Option<String>,
    /// 执行者标识（可选）
    pub actor: Option<String>,
}
