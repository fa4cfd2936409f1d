use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use registrar_domain::persist::{SessionFactory, StudentRepository, UnitOfWork};
use registrar_domain::student::StudentId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 退课
///
/// 备注为必填，仅进入审计记录，不落库。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisenrollCommand {
    pub id: StudentId,
    pub enrollment_number: usize,
    pub comment: String,
}

impl Command for DisenrollCommand {
    const NAME: &'static str = "student.disenroll";
}

pub struct DisenrollHandler {
    session_factory: Arc<dyn SessionFactory>,
}

impl DisenrollHandler {
    pub fn new(session_factory: Arc<dyn SessionFactory>) -> Self {
        Self { session_factory }
    }
}

#[async_trait]
impl CommandHandler<DisenrollCommand> for DisenrollHandler {
    async fn handle(&self, _ctx: &AppContext, cmd: DisenrollCommand) -> AppResult<()> {
        if cmd.comment.trim().is_empty() {
            return Err(AppError::Validation(
                "Disenrollment comment is required".into(),
            ));
        }

        let mut uow = UnitOfWork::new(self.session_factory.as_ref())?;
        let mut repo = StudentRepository::new(&mut uow);
        let Some(mut student) = repo.get_by_id(cmd.id).await? else {
            return Err(AppError::NotFound(format!(
                "No student found for Id {}",
                cmd.id
            )));
        };

        student.disenroll(cmd.enrollment_number)?;
        repo.save(student);

        uow.commit().await?;
        Ok(())
    }
}
