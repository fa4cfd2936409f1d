//! 仓储（Repository）
//!
//! 按实体提供集合式访问，严格绑定到单次调用的 [`UnitOfWork`]：
//! 写入仅暂存到会话，经 `UnitOfWork::commit` 才生效。
//!
use super::unit_of_work::UnitOfWork;
use crate::course::Course;
use crate::error::DomainResult;
use crate::student::{Student, StudentId};

/// 学生仓储
pub struct StudentRepository<'a> {
    uow: &'a mut UnitOfWork,
}

impl<'a> StudentRepository<'a> {
    pub fn new(uow: &'a mut UnitOfWork) -> Self {
        Self { uow }
    }

    pub async fn get_by_id(&mut self, id: StudentId) -> DomainResult<Option<Student>> {
        self.uow.session_mut().load_student(id).await
    }

    /// 列表查询：可按课程名与选课数过滤，按学生标识升序返回
    pub async fn get_list(
        &mut self,
        enrolled_in: Option<&str>,
        number_of_courses: Option<usize>,
    ) -> DomainResult<Vec<Student>> {
        let mut students = self.uow.session_mut().list_students().await?;
        if let Some(course) = enrolled_in {
            students.retain(|s| s.enrollments().iter().any(|e| e.course().name() == course));
        }
        if let Some(count) = number_of_courses {
            students.retain(|s| s.enrollments().len() == count);
        }
        students.sort_by_key(|s| s.id());
        Ok(students)
    }

    /// 新增：提交时若标识已存在则以约束冲突失败
    pub fn add(&mut self, student: Student) {
        self.uow.session_mut().insert_student(student);
    }

    /// 更新（覆盖写）
    pub fn save(&mut self, student: Student) {
        self.uow.session_mut().save_student(student);
    }

    pub fn delete(&mut self, id: StudentId) {
        self.uow.session_mut().delete_student(id);
    }
}

/// 课程仓储（只读参考数据）
pub struct CourseRepository<'a> {
    uow: &'a mut UnitOfWork,
}

impl<'a> CourseRepository<'a> {
    pub fn new(uow: &'a mut UnitOfWork) -> Self {
        Self { uow }
    }

    pub async fn get_by_name(&mut self, name: &str) -> DomainResult<Option<Course>> {
        self.uow.session_mut().load_course_by_name(name).await
    }
}
