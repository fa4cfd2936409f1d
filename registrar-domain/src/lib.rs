//! 学籍领域层基础库（registrar-domain）
//!
//! 提供学生注册/选课系统的领域模型与持久化接缝：
//! - 实体与值对象（`student`/`course`）：学生、课程、选课与成绩
//! - 统一错误（`error`）：领域规则与持久化错误，附瞬态/永久分类
//! - 持久化（`persist`）：会话工厂、单元工作、仓储与内存后端
//!
//! 本 crate 与存储和传输实现解耦：真实后端只需实现 `persist`
//! 中的会话接口即可接入，写入始终经由单元工作的单次提交生效。
//!
pub mod course;
pub mod error;
pub mod persist;
pub mod student;
