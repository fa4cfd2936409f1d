/// 重试配置
///
/// 单一整数：对瞬态存储失败的最大尝试次数（含首次），
/// 进程生命周期内不可变，可被全部派发并发只读共享。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    max_attempts: u32,
}

impl RetryConfig {
    /// 创建配置；`max_attempts = 1` 等价于"不重试，首次失败即上报"
    ///
    /// # Panics
    ///
    /// `max_attempts` 为 0 时 panic（至少要包含首次尝试）。
    pub fn new(max_attempts: u32) -> Self {
        assert!(
            max_attempts >= 1,
            "max_attempts must include the first attempt (got {max_attempts})"
        );
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}
