//! 持久化（persist）
//!
//! 定义写侧的事务边界与实体访问：
//! - 会话与会话工厂（`Session`/`SessionFactory`）：后端接入的最小接口；
//! - 单元工作（`UnitOfWork`）：每次操作尝试一个会话、一次提交；
//! - 仓储（`StudentRepository`/`CourseRepository`）：绑定单元工作的集合式访问；
//! - 内存后端（`InMemorySessionFactory`）：参考实现，支持故障注入。
//!
//! 该模块聚焦协议与装配逻辑，真实存储后端由上层提供实现并注入。
//!
mod memory;
mod repository;
mod session;
mod unit_of_work;

pub use memory::InMemorySessionFactory;
pub use repository::{CourseRepository, StudentRepository};
pub use session::{Session, SessionFactory};
pub use unit_of_work::{UnitOfWork, UowState};
