// ==========================================
// 工位轮换排班系统 - 员工领域模型
// ==========================================
// 职责: 员工快照 (由外部 CRUD 维护, 引擎只读)
// 红线: 不含数据访问逻辑
// ==========================================

use crate::domain::types::{LeadershipType, RotationHalf, WorkerId, WorkstationId};
use serde::{Deserialize, Serialize};

// ==========================================
// Worker - 员工
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    // ===== 主键 =====
    pub id: WorkerId,
    pub name: String,
    pub is_active: bool,

    // ===== 领导 =====
    #[serde(default)]
    pub is_leader: bool,
    #[serde(default)]
    pub leader_workstation_id: Option<WorkstationId>,
    #[serde(default)]
    pub leadership_type: LeadershipType,

    // ===== 培训 =====
    #[serde(default)]
    pub is_trainer: bool,
    #[serde(default)]
    pub is_trainee: bool,
    #[serde(default)]
    pub trainer_id: Option<WorkerId>,
    #[serde(default)]
    pub training_workstation_id: Option<WorkstationId>,

    // ===== 可用性与轮换统计 =====
    pub availability_percentage: u8,          // 0-100
    #[serde(default)]
    pub rotations_in_current_station: u32,    // 在当前工位连续轮换次数
    #[serde(default)]
    pub current_workstation_id: Option<WorkstationId>,
}

impl Worker {
    /// 创建普通员工 (非领导/非师徒, 100% 可用)
    pub fn new(id: WorkerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_active: true,
            is_leader: false,
            leader_workstation_id: None,
            leadership_type: LeadershipType::Both,
            is_trainer: false,
            is_trainee: false,
            trainer_id: None,
            training_workstation_id: None,
            availability_percentage: 100,
            rotations_in_current_station: 0,
            current_workstation_id: None,
        }
    }

    /// 是否为在指定半班生效的领导
    pub fn leads_during(&self, half: RotationHalf) -> bool {
        self.is_active && self.is_leader && self.leadership_type.applies_to(half)
    }

    /// 是否为在岗学徒
    pub fn is_active_trainee(&self) -> bool {
        self.is_active && self.is_trainee
    }

    /// 是否为在岗师傅
    pub fn is_active_trainer(&self) -> bool {
        self.is_active && self.is_trainer
    }
}
