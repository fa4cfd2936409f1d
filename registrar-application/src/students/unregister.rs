use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use registrar_domain::persist::{SessionFactory, StudentRepository, UnitOfWork};
use registrar_domain::student::StudentId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 注销学生
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnregisterCommand {
    pub id: StudentId,
}

impl Command for UnregisterCommand {
    const NAME: &'static str = "student.unregister";
}

pub struct UnregisterHandler {
    session_factory: Arc<dyn SessionFactory>,
}

impl UnregisterHandler {
    pub fn new(session_factory: Arc<dyn SessionFactory>) -> Self {
        Self { session_factory }
    }
}

#[async_trait]
impl CommandHandler<UnregisterCommand> for UnregisterHandler {
    async fn handle(&self, _ctx: &AppContext, cmd: UnregisterCommand) -> AppResult<()> {
        let mut uow = UnitOfWork::new(self.session_factory.as_ref())?;
        let mut repo = StudentRepository::new(&mut uow);
        // 仅在查得学生时才执行删除
        let Some(student) = repo.get_by_id(cmd.id).await? else {
            return Err(AppError::NotFound(format!(
                "No student found for Id {}",
                cmd.id
            )));
        };

        repo.delete(student.id());

        uow.commit().await?;
        Ok(())
    }
}
