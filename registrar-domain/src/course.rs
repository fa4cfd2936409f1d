//! 课程（Course）
//!
//! 只读参考数据：按名称查找，不经由写侧单元工作修改。
//!
use serde::{Deserialize, Serialize};
use std::fmt;

/// 课程标识（值对象）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(i64);

impl CourseId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CourseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// 课程实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    name: String,
    credits: u32,
}

impl Course {
    pub fn new(id: CourseId, name: impl Into<String>, credits: u32) -> Self {
        Self {
            id,
            name: name.into(),
            credits,
        }
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }
}
