use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppResult;
use async_trait::async_trait;
use registrar_domain::persist::{SessionFactory, StudentRepository, UnitOfWork};
use registrar_domain::student::{Student, StudentId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 注册新学生
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterCommand {
    pub id: StudentId,
    pub name: String,
    pub email: String,
}

impl Command for RegisterCommand {
    const NAME: &'static str = "student.register";
}

pub struct RegisterHandler {
    session_factory: Arc<dyn SessionFactory>,
}

impl RegisterHandler {
    pub fn new(session_factory: Arc<dyn SessionFactory>) -> Self {
        Self { session_factory }
    }
}

#[async_trait]
impl CommandHandler<RegisterCommand> for RegisterHandler {
    async fn handle(&self, _ctx: &AppContext, cmd: RegisterCommand) -> AppResult<()> {
        // 纯校验先行,不开无谓的会话
        let student = Student::new(cmd.id, cmd.name, cmd.email)?;

        let mut uow = UnitOfWork::new(self.session_factory.as_ref())?;
        let mut repo = StudentRepository::new(&mut uow);
        // 标识已存在时由提交以约束冲突拒绝
        repo.add(student);

        uow.commit().await?;
        Ok(())
    }
}
