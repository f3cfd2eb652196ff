// ==========================================
// 工位轮换排班系统 - 轮换会话与分配领域模型
// ==========================================
// 状态机: DRAFT → ACTIVE → COMPLETED / CANCELLED
// 红线: 每名员工在同一会话同一轮换类型下至多一条分配
// ==========================================

use crate::domain::types::{
    AssignmentSource, RotationType, SessionStatus, WorkerId, WorkstationId,
};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// RotationSession - 轮换会话
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationSession {
    pub id: Uuid,
    pub name: String,
    pub status: SessionStatus,

    // ===== 时间戳 =====
    pub created_at: DateTime<Utc>,
    pub activated_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    // ===== 汇总计数 =====
    pub total_assignments: u32,
    pub current_assignments: u32,
    pub next_assignments: u32,
    pub leader_assignments: u32,
    pub training_assignments: u32,
    pub unfilled_stations: u32,
}

impl RotationSession {
    /// 创建 DRAFT 会话
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: SessionStatus::Draft,
            created_at: now,
            activated_at: None,
            completed_at: None,
            total_assignments: 0,
            current_assignments: 0,
            next_assignments: 0,
            leader_assignments: 0,
            training_assignments: 0,
            unfilled_stations: 0,
        }
    }

    /// DRAFT/ACTIVE → ACTIVE (ACTIVE 重新生成时保留首次激活时间)
    pub fn activate(&mut self, now: DateTime<Utc>) -> EngineResult<()> {
        match self.status {
            SessionStatus::Draft => {
                self.status = SessionStatus::Active;
                self.activated_at = Some(now);
                Ok(())
            }
            SessionStatus::Active => Ok(()),
            other => Err(self.invalid_transition(other, SessionStatus::Active)),
        }
    }

    /// ACTIVE → COMPLETED
    pub fn complete(&mut self, now: DateTime<Utc>) -> EngineResult<()> {
        match self.status {
            SessionStatus::Active => {
                self.status = SessionStatus::Completed;
                self.completed_at = Some(now);
                Ok(())
            }
            other => Err(self.invalid_transition(other, SessionStatus::Completed)),
        }
    }

    /// DRAFT/ACTIVE → CANCELLED
    pub fn cancel(&mut self, now: DateTime<Utc>) -> EngineResult<()> {
        match self.status {
            SessionStatus::Draft | SessionStatus::Active => {
                self.status = SessionStatus::Cancelled;
                self.completed_at = Some(now);
                Ok(())
            }
            other => Err(self.invalid_transition(other, SessionStatus::Cancelled)),
        }
    }

    /// 按分配结果刷新汇总计数
    pub fn refresh_counts(&mut self, assignments: &[RotationAssignment], unfilled_stations: usize) {
        let by_type = |t: RotationType| {
            assignments.iter().filter(|a| a.rotation_type == t).count() as u32
        };
        let by_source = |s: AssignmentSource| {
            assignments.iter().filter(|a| a.source == s).count() as u32
        };

        self.total_assignments = assignments.len() as u32;
        self.current_assignments = by_type(RotationType::Current);
        self.next_assignments = by_type(RotationType::Next);
        self.leader_assignments = by_source(AssignmentSource::Leader);
        self.training_assignments = by_source(AssignmentSource::TrainingPair);
        self.unfilled_stations = unfilled_stations as u32;
    }

    fn invalid_transition(&self, from: SessionStatus, to: SessionStatus) -> EngineError {
        EngineError::InvalidStateTransition {
            session_id: self.id,
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

// ==========================================
// RotationAssignment - 轮换分配
// ==========================================
// 说明: 分配记录的持久化主键由外部持久化层分配
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationAssignment {
    pub worker_id: WorkerId,
    pub workstation_id: WorkstationId,
    pub session_id: Uuid,
    pub rotation_type: RotationType,
    pub is_active: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub priority: u8, // 1=高 … 5=低
    pub source: AssignmentSource,
}

impl RotationAssignment {
    pub fn new(
        worker_id: WorkerId,
        workstation_id: WorkstationId,
        session_id: Uuid,
        rotation_type: RotationType,
        source: AssignmentSource,
    ) -> Self {
        Self {
            worker_id,
            workstation_id,
            session_id,
            rotation_type,
            is_active: true,
            started_at: None,
            completed_at: None,
            priority: source.base_priority(),
            source,
        }
    }

    /// LIMITED 限制下的分配降为最低优先级
    pub fn with_limited(mut self, limited: bool) -> Self {
        if limited {
            self.priority = 5;
        }
        self
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
    }

    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.completed_at = Some(now);
        self.is_active = false;
    }
}
