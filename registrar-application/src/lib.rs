//! 学籍应用层（registrar-application）
//!
//! 以统一的派发契约执行业务操作：命令改变状态，查询读取状态。
//! 每个处理器在注册时被包上固定的横切装饰链 `Audit(Retry(Handler))`，
//! 处理器本身对重试与审计无感知：
//! - 派发契约与总线（`command`/`query` 及 `inmemory_*` 总线）
//! - 重试装饰器（`retry`）：瞬态存储失败按配置上限重放
//! - 审计装饰器（`audit_logging`）：每次对外调用恰好一条审计记录
//! - 派发器（`dispatcher`）：固定装饰顺序的统一入口
//! - 学生操作（`students`）：六个命令与一个列表查询
//!
//! 持久化经由 `registrar-domain` 的单元工作完成，
//! 每次操作尝试恰好一个会话、至多一次提交。
//!
pub mod audit;
pub mod audit_logging;
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod dto;
pub mod error;
pub mod inmemory_command_bus;
pub mod inmemory_query_bus;
pub mod query;
pub mod query_bus;
pub mod query_handler;
pub mod retry;
pub mod students;

pub use dispatcher::Dispatcher;
pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;
