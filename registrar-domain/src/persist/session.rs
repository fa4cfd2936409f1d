//! 会话（Session）与会话工厂（SessionFactory）
//!
//! 持久化后端只需实现这两个接口即可接入：
//! - 读取为异步（可能跨网络）；
//! - 写入先在会话内暂存，`commit` 时一次性落盘；
//! - `rollback` 为同步操作（仅丢弃暂存），以便在析构路径调用。
//!
use crate::course::Course;
use crate::error::DomainResult;
use crate::student::{Student, StudentId};
use async_trait::async_trait;

/// 一次操作尝试所独占的持久化会话
///
/// 暂存的写入在 `commit` 成功前对任何读取不可见。
#[async_trait]
pub trait Session: Send {
    async fn load_student(&mut self, id: StudentId) -> DomainResult<Option<Student>>;

    async fn load_course_by_name(&mut self, name: &str) -> DomainResult<Option<Course>>;

    async fn list_students(&mut self) -> DomainResult<Vec<Student>>;

    /// 暂存新增；提交时若标识已存在则以约束冲突失败
    fn insert_student(&mut self, student: Student);

    /// 暂存更新（覆盖写）
    fn save_student(&mut self, student: Student);

    /// 暂存删除
    fn delete_student(&mut self, id: StudentId);

    /// 原子地应用全部暂存写入
    async fn commit(&mut self) -> DomainResult<()>;

    /// 丢弃全部暂存写入
    fn rollback(&mut self);
}

/// 会话工厂：进程生命周期内共享、只读，可被并发调用
pub trait SessionFactory: Send + Sync {
    fn open_session(&self) -> DomainResult<Box<dyn Session>>;
}
