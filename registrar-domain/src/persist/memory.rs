//! 基于内存的会话工厂（参考后端）
//!
//! 共享存储 + 会话内暂存的最小实现，用于测试与演示：
//! - 暂存写入在 `commit` 时一次性原子应用；
//! - 可注入按序消费的提交故障，驱动瞬态/永久失败路径；
//! - 统计已开启会话数，用于断言"每次尝试一个全新会话"。
//!
use super::session::{Session, SessionFactory};
use crate::course::Course;
use crate::error::{DomainError, DomainResult};
use crate::student::{Student, StudentId};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
struct StoreInner {
    students: HashMap<StudentId, Student>,
    courses: HashMap<String, Course>,
}

/// 内存会话工厂
#[derive(Default)]
pub struct InMemorySessionFactory {
    store: Arc<Mutex<StoreInner>>,
    commit_faults: Arc<Mutex<VecDeque<DomainError>>>,
    sessions_opened: AtomicUsize,
}

impl InMemorySessionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置学生（绕过会话，直接写入存储）
    pub async fn seed_student(&self, student: Student) {
        self.store
            .lock()
            .await
            .students
            .insert(student.id(), student);
    }

    /// 预置课程
    pub async fn seed_course(&self, course: Course) {
        self.store
            .lock()
            .await
            .courses
            .insert(course.name().to_string(), course);
    }

    /// 直接读取存储中的学生（断言用）
    pub async fn student(&self, id: StudentId) -> Option<Student> {
        self.store.lock().await.students.get(&id).cloned()
    }

    /// 注入一次提交故障；故障按入队顺序被后续 `commit` 逐个消费
    pub async fn push_commit_fault(&self, fault: DomainError) {
        self.commit_faults.lock().await.push_back(fault);
    }

    /// 已开启的会话总数
    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }
}

impl SessionFactory for InMemorySessionFactory {
    fn open_session(&self) -> DomainResult<Box<dyn Session>> {
        self.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemorySession {
            store: self.store.clone(),
            commit_faults: self.commit_faults.clone(),
            staged: Vec::new(),
        }))
    }
}

enum StagedWrite {
    Insert(Student),
    Upsert(Student),
    Delete(StudentId),
}

struct InMemorySession {
    store: Arc<Mutex<StoreInner>>,
    commit_faults: Arc<Mutex<VecDeque<DomainError>>>,
    staged: Vec<StagedWrite>,
}

#[async_trait]
impl Session for InMemorySession {
    async fn load_student(&mut self, id: StudentId) -> DomainResult<Option<Student>> {
        Ok(self.store.lock().await.students.get(&id).cloned())
    }

    async fn load_course_by_name(&mut self, name: &str) -> DomainResult<Option<Course>> {
        Ok(self.store.lock().await.courses.get(name).cloned())
    }

    async fn list_students(&mut self) -> DomainResult<Vec<Student>> {
        Ok(self.store.lock().await.students.values().cloned().collect())
    }

    fn insert_student(&mut self, student: Student) {
        self.staged.push(StagedWrite::Insert(student));
    }

    fn save_student(&mut self, student: Student) {
        self.staged.push(StagedWrite::Upsert(student));
    }

    fn delete_student(&mut self, id: StudentId) {
        self.staged.push(StagedWrite::Delete(id));
    }

    async fn commit(&mut self) -> DomainResult<()> {
        if let Some(fault) = self.commit_faults.lock().await.pop_front() {
            return Err(fault);
        }

        let mut store = self.store.lock().await;
        // 先校验全部新增,再应用,保证拒绝时不留下部分写入
        for write in &self.staged {
            if let StagedWrite::Insert(student) = write {
                if store.students.contains_key(&student.id()) {
                    return Err(DomainError::ConstraintViolation {
                        reason: format!("student {} already exists", student.id()),
                    });
                }
            }
        }
        for write in self.staged.drain(..) {
            match write {
                StagedWrite::Insert(student) | StagedWrite::Upsert(student) => {
                    let id = student.id();
                    store.students.insert(id, student);
                }
                StagedWrite::Delete(id) => {
                    store.students.remove(&id);
                }
            }
        }
        Ok(())
    }

    fn rollback(&mut self) {
        self.staged.clear();
    }
}
