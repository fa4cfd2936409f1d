//! 学生（Student）聚合
//!
//! 承载注册信息与选课记录（最多两门），选课/转课/退课的
//! 业务规则在此处校验，校验失败返回 [`DomainError::Validation`]。
//!
use crate::course::Course;
use crate::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 单个学生允许的最大选课数
pub const MAX_ENROLLMENTS: usize = 2;

/// 学生标识（值对象）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(i64);

impl StudentId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for StudentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// 成绩等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(s)
    }
}

impl FromStr for Grade {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            other => Err(DomainError::Validation {
                reason: format!("Grade is incorrect: '{other}'"),
            }),
        }
    }
}

/// 选课记录：课程与当前成绩
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    course: Course,
    grade: Grade,
}

impl Enrollment {
    pub fn new(course: Course, grade: Grade) -> Self {
        Self { course, grade }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }
}

/// 学生实体
///
/// 选课槽位以 1 起始编号（第一门课为 1），与对外接口一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    name: String,
    email: String,
    enrollments: Vec<Enrollment>,
}

impl Student {
    /// 创建学生；姓名与邮箱不得为空
    pub fn new(
        id: StudentId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();
        validate_name(&name)?;
        validate_email(&email)?;
        Ok(Self {
            id,
            name,
            email,
            enrollments: Vec::new(),
        })
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// 按 1 起始编号取选课记录
    pub fn enrollment(&self, number: usize) -> Option<&Enrollment> {
        number
            .checked_sub(1)
            .and_then(|idx| self.enrollments.get(idx))
    }

    /// 修改个人信息；姓名与邮箱不得为空
    pub fn edit_personal_info(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> DomainResult<()> {
        let name = name.into();
        let email = email.into();
        validate_name(&name)?;
        validate_email(&email)?;
        self.name = name;
        self.email = email;
        Ok(())
    }

    /// 选课：同一门课不可重复选，且总数不超过 [`MAX_ENROLLMENTS`]
    pub fn enroll(&mut self, course: Course, grade: Grade) -> DomainResult<()> {
        if self
            .enrollments
            .iter()
            .any(|e| e.course().name() == course.name())
        {
            return Err(DomainError::Validation {
                reason: format!(
                    "Student is already enrolled into course '{}'",
                    course.name()
                ),
            });
        }
        if self.enrollments.len() >= MAX_ENROLLMENTS {
            return Err(DomainError::Validation {
                reason: format!("Cannot have more than {MAX_ENROLLMENTS} enrollments"),
            });
        }
        self.enrollments.push(Enrollment::new(course, grade));
        Ok(())
    }

    /// 转课：将指定编号的选课替换为新的课程与成绩
    pub fn transfer(
        &mut self,
        number: usize,
        course: Course,
        grade: Grade,
    ) -> DomainResult<()> {
        let idx = self.slot_index(number)?;
        self.enrollments[idx] = Enrollment::new(course, grade);
        Ok(())
    }

    /// 退课：移除指定编号的选课
    pub fn disenroll(&mut self, number: usize) -> DomainResult<()> {
        let idx = self.slot_index(number)?;
        self.enrollments.remove(idx);
        Ok(())
    }

    fn slot_index(&self, number: usize) -> DomainResult<usize> {
        number
            .checked_sub(1)
            .filter(|idx| *idx < self.enrollments.len())
            .ok_or_else(|| DomainError::Validation {
                reason: format!("No enrollment found with number '{number}'"),
            })
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::Validation {
            reason: "Student name is required".into(),
        });
    }
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    if email.trim().is_empty() {
        return Err(DomainError::Validation {
            reason: "Student email is required".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::CourseId;

    fn student() -> Student {
        Student::new(StudentId::new(1), "Alice", "alice@example.com").unwrap()
    }

    fn course(id: i64, name: &str) -> Course {
        Course::new(CourseId::new(id), name, 3)
    }

    #[test]
    fn new_rejects_blank_name_and_email() {
        let err = Student::new(StudentId::new(1), "  ", "a@x.com").unwrap_err();
        assert_eq!(err.to_string(), "Student name is required");

        let err = Student::new(StudentId::new(1), "Alice", "").unwrap_err();
        assert_eq!(err.to_string(), "Student email is required");
    }

    #[test]
    fn enroll_rejects_duplicate_course() {
        let mut s = student();
        s.enroll(course(1, "Calculus"), Grade::A).unwrap();

        let err = s.enroll(course(1, "Calculus"), Grade::B).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Student is already enrolled into course 'Calculus'"
        );
    }

    #[test]
    fn enroll_rejects_third_course() {
        let mut s = student();
        s.enroll(course(1, "Calculus"), Grade::A).unwrap();
        s.enroll(course(2, "History"), Grade::B).unwrap();

        let err = s.enroll(course(3, "Chemistry"), Grade::C).unwrap_err();
        assert_eq!(err.to_string(), "Cannot have more than 2 enrollments");
    }

    #[test]
    fn transfer_replaces_the_numbered_slot() {
        let mut s = student();
        s.enroll(course(1, "Calculus"), Grade::A).unwrap();
        s.enroll(course(2, "History"), Grade::B).unwrap();

        s.transfer(2, course(3, "Chemistry"), Grade::C).unwrap();

        let second = s.enrollment(2).unwrap();
        assert_eq!(second.course().name(), "Chemistry");
        assert_eq!(second.grade(), Grade::C);
        // 槽位 1 不受影响
        assert_eq!(s.enrollment(1).unwrap().course().name(), "Calculus");
    }

    #[test]
    fn disenroll_removes_the_numbered_slot() {
        let mut s = student();
        s.enroll(course(1, "Calculus"), Grade::A).unwrap();
        s.enroll(course(2, "History"), Grade::B).unwrap();

        s.disenroll(1).unwrap();

        assert_eq!(s.enrollments().len(), 1);
        assert_eq!(s.enrollment(1).unwrap().course().name(), "History");
    }

    #[test]
    fn slot_numbers_are_one_based() {
        let mut s = student();
        s.enroll(course(1, "Calculus"), Grade::A).unwrap();

        assert!(s.enrollment(1).is_some());
        assert!(s.enrollment(0).is_none());

        let err = s.disenroll(0).unwrap_err();
        assert_eq!(err.to_string(), "No enrollment found with number '0'");
        let err = s.transfer(2, course(2, "History"), Grade::B).unwrap_err();
        assert_eq!(err.to_string(), "No enrollment found with number '2'");
    }

    #[test]
    fn grade_parses_and_rejects_unknown_values() {
        assert_eq!("A".parse::<Grade>().unwrap(), Grade::A);
        let err = "E".parse::<Grade>().unwrap_err();
        assert_eq!(err.to_string(), "Grade is incorrect: 'E'");
    }
}
