use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use registrar_domain::persist::{SessionFactory, StudentRepository, UnitOfWork};
use registrar_domain::student::StudentId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 修改学生个人信息
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditPersonalInfoCommand {
    pub id: StudentId,
    pub name: String,
    pub email: String,
}

impl Command for EditPersonalInfoCommand {
    const NAME: &'static str = "student.edit_personal_info";
}

pub struct EditPersonalInfoHandler {
    session_factory: Arc<dyn SessionFactory>,
}

impl EditPersonalInfoHandler {
    pub fn new(session_factory: Arc<dyn SessionFactory>) -> Self {
        Self { session_factory }
    }
}

#[async_trait]
impl CommandHandler<EditPersonalInfoCommand> for EditPersonalInfoHandler {
    async fn handle(&self, _ctx: &AppContext, cmd: EditPersonalInfoCommand) -> AppResult<()> {
        let mut uow = UnitOfWork::new(self.session_factory.as_ref())?;
        let mut repo = StudentRepository::new(&mut uow);
        let Some(mut student) = repo.get_by_id(cmd.id).await? else {
            return Err(AppError::NotFound(format!(
                "No student found for Id {}",
                cmd.id
            )));
        };

        student.edit_personal_info(cmd.name, cmd.email)?;
        repo.save(student);

        uow.commit().await?;
        Ok(())
    }
}
