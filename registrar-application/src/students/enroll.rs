use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use registrar_domain::persist::{CourseRepository, SessionFactory, StudentRepository, UnitOfWork};
use registrar_domain::student::{Grade, StudentId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 选课
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnrollCommand {
    pub id: StudentId,
    pub course: String,
    pub grade: String,
}

impl Command for EnrollCommand {
    const NAME: &'static str = "student.enroll";
}

pub struct EnrollHandler {
    session_factory: Arc<dyn SessionFactory>,
}

impl EnrollHandler {
    pub fn new(session_factory: Arc<dyn SessionFactory>) -> Self {
        Self { session_factory }
    }
}

#[async_trait]
impl CommandHandler<EnrollCommand> for EnrollHandler {
    async fn handle(&self, _ctx: &AppContext, cmd: EnrollCommand) -> AppResult<()> {
        let grade: Grade = cmd.grade.parse()?;

        let mut uow = UnitOfWork::new(self.session_factory.as_ref())?;
        let Some(course) = CourseRepository::new(&mut uow)
            .get_by_name(&cmd.course)
            .await?
        else {
            return Err(AppError::Validation(format!(
                "Course is incorrect: '{}'",
                cmd.course
            )));
        };

        let mut repo = StudentRepository::new(&mut uow);
        let Some(mut student) = repo.get_by_id(cmd.id).await? else {
            return Err(AppError::NotFound(format!(
                "No student found for Id {}",
                cmd.id
            )));
        };

        student.enroll(course, grade)?;
        repo.save(student);

        uow.commit().await?;
        Ok(())
    }
}
