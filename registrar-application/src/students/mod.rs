//! 学生操作（students）
//!
//! 七个具体操作：六个命令与一个列表查询，每个操作恰有一个处理器。
//! 处理器持有共享的会话工厂，每次调用自行开启单元工作并单次提交；
//! `register_student_operations` 将全部操作经固定装饰链注册到派发器。
//!
mod disenroll;
mod edit_personal_info;
mod enroll;
mod get_list;
mod register;
mod transfer;
mod unregister;

pub use disenroll::{DisenrollCommand, DisenrollHandler};
pub use edit_personal_info::{EditPersonalInfoCommand, EditPersonalInfoHandler};
pub use enroll::{EnrollCommand, EnrollHandler};
pub use get_list::{GetListHandler, GetListQuery, StudentDto};
pub use register::{RegisterCommand, RegisterHandler};
pub use transfer::{TransferCommand, TransferHandler};
pub use unregister::{UnregisterCommand, UnregisterHandler};

use crate::dispatcher::Dispatcher;
use crate::error::AppError;
use registrar_domain::persist::SessionFactory;
use std::sync::Arc;

/// 组装根：把全部学生操作注册到派发器
///
/// 每个处理器由注册方法统一包成 `Audit(Retry(Handler))`。
pub fn register_student_operations(
    dispatcher: &Dispatcher,
    session_factory: Arc<dyn SessionFactory>,
) -> Result<(), AppError> {
    dispatcher
        .register_command::<RegisterCommand, _>(RegisterHandler::new(session_factory.clone()))?;
    dispatcher.register_command::<EditPersonalInfoCommand, _>(EditPersonalInfoHandler::new(
        session_factory.clone(),
    ))?;
    dispatcher
        .register_command::<UnregisterCommand, _>(UnregisterHandler::new(session_factory.clone()))?;
    dispatcher.register_command::<EnrollCommand, _>(EnrollHandler::new(session_factory.clone()))?;
    dispatcher
        .register_command::<TransferCommand, _>(TransferHandler::new(session_factory.clone()))?;
    dispatcher
        .register_command::<DisenrollCommand, _>(DisenrollHandler::new(session_factory.clone()))?;
    dispatcher.register_query::<GetListQuery, _>(GetListHandler::new(session_factory))?;
    Ok(())
}
