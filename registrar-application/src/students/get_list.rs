use crate::context::AppContext;
use crate::dto::Dto;
use crate::error::AppResult;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use async_trait::async_trait;
use registrar_domain::persist::{SessionFactory, StudentRepository, UnitOfWork};
use registrar_domain::student::Student;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 学生列表查询：可按课程名与选课数过滤
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GetListQuery {
    pub enrolled_in: Option<String>,
    pub number_of_courses: Option<usize>,
}

impl Query for GetListQuery {
    const NAME: &'static str = "student.get_list";
    type Dto = Vec<StudentDto>;
}

/// 学生数据传输对象：两个课程槽位展平为列
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub course1: Option<String>,
    pub course1_grade: Option<String>,
    pub course1_credits: Option<u32>,
    pub course2: Option<String>,
    pub course2_grade: Option<String>,
    pub course2_credits: Option<u32>,
}

impl Dto for StudentDto {}

impl From<&Student> for StudentDto {
    fn from(student: &Student) -> Self {
        let slot = |number: usize| student.enrollment(number);
        Self {
            id: student.id().value(),
            name: student.name().to_string(),
            email: student.email().to_string(),
            course1: slot(1).map(|e| e.course().name().to_string()),
            course1_grade: slot(1).map(|e| e.grade().to_string()),
            course1_credits: slot(1).map(|e| e.course().credits()),
            course2: slot(2).map(|e| e.course().name().to_string()),
            course2_grade: slot(2).map(|e| e.grade().to_string()),
            course2_credits: slot(2).map(|e| e.course().credits()),
        }
    }
}

pub struct GetListHandler {
    session_factory: Arc<dyn SessionFactory>,
}

impl GetListHandler {
    pub fn new(session_factory: Arc<dyn SessionFactory>) -> Self {
        Self { session_factory }
    }
}

#[async_trait]
impl QueryHandler<GetListQuery> for GetListHandler {
    async fn handle(&self, _ctx: &AppContext, q: GetListQuery) -> AppResult<Vec<StudentDto>> {
        // 只读路径:不提交,单元工作随作用域丢弃
        let mut uow = UnitOfWork::new(self.session_factory.as_ref())?;
        let students = StudentRepository::new(&mut uow)
            .get_list(q.enrolled_in.as_deref(), q.number_of_courses)
            .await?;
        Ok(students.iter().map(StudentDto::from).collect())
    }
}
