// ==========================================
// 工位轮换排班系统 - 输入快照
// ==========================================
// 职责: 调用方在事务边界内读取的一致性快照
// 红线: 引擎只读, 不回写
// ==========================================

use crate::domain::capability::{Capability, Restriction};
use crate::domain::types::{WorkerId, WorkstationId};
use crate::domain::worker::Worker;
use crate::domain::workstation::Workstation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RotationSnapshot - 排班输入快照
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RotationSnapshot {
    pub workers: Vec<Worker>,
    pub workstations: Vec<Workstation>,

    /// 能力记录 (None 表示调用方未提供, 跳过能力门槛检查)
    #[serde(default)]
    pub capabilities: Option<Vec<Capability>>,

    #[serde(default)]
    pub restrictions: Vec<Restriction>,

    /// 员工可用工位 (预计算关联; None 表示不限制)
    #[serde(default)]
    pub eligible_workstations: Option<HashMap<WorkerId, Vec<WorkstationId>>>,

    /// 历史分配次数 (均衡轮换的初始计数)
    #[serde(default)]
    pub prior_assignment_counts: HashMap<WorkerId, u32>,
}

impl RotationSnapshot {
    pub fn new(workers: Vec<Worker>, workstations: Vec<Workstation>) -> Self {
        Self {
            workers,
            workstations,
            ..Default::default()
        }
    }

    pub fn with_capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn with_restrictions(mut self, restrictions: Vec<Restriction>) -> Self {
        self.restrictions = restrictions;
        self
    }

    pub fn with_eligible_workstations(
        mut self,
        eligible: HashMap<WorkerId, Vec<WorkstationId>>,
    ) -> Self {
        self.eligible_workstations = Some(eligible);
        self
    }

    pub fn with_prior_counts(mut self, counts: HashMap<WorkerId, u32>) -> Self {
        self.prior_assignment_counts = counts;
        self
    }

    /// 在岗员工 (按 ID 升序)
    pub fn active_workers(&self) -> Vec<&Worker> {
        let mut workers: Vec<&Worker> = self.workers.iter().filter(|w| w.is_active).collect();
        workers.sort_by_key(|w| w.id);
        workers
    }

    /// 启用工位 (按 ID 升序)
    pub fn active_workstations(&self) -> Vec<&Workstation> {
        let mut stations: Vec<&Workstation> =
            self.workstations.iter().filter(|s| s.is_active).collect();
        stations.sort_by_key(|s| s.id);
        stations
    }

    pub fn find_worker(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }
}
