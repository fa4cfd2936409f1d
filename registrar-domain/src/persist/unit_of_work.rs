//! 单元工作（UnitOfWork）
//!
//! 每次操作尝试独占一个会话，状态机为 `Open → Committed | Discarded`：
//! - `commit` 至多调用一次，重复调用视为契约违背并直接 panic；
//! - 未提交即离开作用域时在析构中回滚，提前返回不会留下部分写入。
//!
use super::session::{Session, SessionFactory};
use crate::error::DomainResult;

/// 单元工作的生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UowState {
    Open,
    Committed,
    Discarded,
}

/// 一次操作尝试的事务边界
pub struct UnitOfWork {
    session: Box<dyn Session>,
    state: UowState,
}

impl UnitOfWork {
    /// 从工厂开启新会话；连接类失败按瞬态错误上抛
    pub fn new(factory: &dyn SessionFactory) -> DomainResult<Self> {
        Ok(Self {
            session: factory.open_session()?,
            state: UowState::Open,
        })
    }

    pub fn state(&self) -> UowState {
        self.state
    }

    /// 提交全部暂存写入
    ///
    /// 后端拒绝事务（约束冲突、连接丢失等）时返回错误并转入
    /// `Discarded`，实例不可再使用。
    ///
    /// # Panics
    ///
    /// 在已提交或已丢弃的实例上再次调用时 panic。
    pub async fn commit(&mut self) -> DomainResult<()> {
        if self.state != UowState::Open {
            panic!("commit called on a closed unit of work (state: {:?})", self.state);
        }
        match self.session.commit().await {
            Ok(()) => {
                self.state = UowState::Committed;
                Ok(())
            }
            Err(err) => {
                self.session.rollback();
                self.state = UowState::Discarded;
                Err(err)
            }
        }
    }

    pub(crate) fn session_mut(&mut self) -> &mut dyn Session {
        if self.state != UowState::Open {
            panic!("unit of work used after close (state: {:?})", self.state);
        }
        self.session.as_mut()
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if self.state == UowState::Open {
            self.session.rollback();
            self.state = UowState::Discarded;
        }
    }
}
