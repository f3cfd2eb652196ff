// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use workstation_rotation::domain::capability::{Capability, Restriction};
use workstation_rotation::domain::types::{LeadershipType, RestrictionType, WorkerId, WorkstationId};
use workstation_rotation::domain::worker::Worker;
use workstation_rotation::domain::workstation::Workstation;

// ==========================================
// Worker 构建器
// ==========================================

pub struct WorkerBuilder {
    worker: Worker,
}

impl WorkerBuilder {
    pub fn new(id: WorkerId) -> Self {
        Self {
            worker: Worker::new(id, format!("员工{}", id)),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.worker.name = name.to_string();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.worker.is_active = false;
        self
    }

    pub fn leader_of(mut self, workstation_id: WorkstationId) -> Self {
        self.worker.is_leader = true;
        self.worker.leader_workstation_id = Some(workstation_id);
        self
    }

    pub fn leadership(mut self, leadership_type: LeadershipType) -> Self {
        self.worker.leadership_type = leadership_type;
        self
    }

    pub fn trainer(mut self) -> Self {
        self.worker.is_trainer = true;
        self
    }

    pub fn trainee_of(mut self, trainer_id: WorkerId, workstation_id: WorkstationId) -> Self {
        self.worker.is_trainee = true;
        self.worker.trainer_id = Some(trainer_id);
        self.worker.training_workstation_id = Some(workstation_id);
        self
    }

    pub fn availability(mut self, percentage: u8) -> Self {
        self.worker.availability_percentage = percentage;
        self
    }

    pub fn rotations_in_station(mut self, rotations: u32) -> Self {
        self.worker.rotations_in_current_station = rotations;
        self
    }

    pub fn build(self) -> Worker {
        self.worker
    }
}

// ==========================================
// Workstation 构建器
// ==========================================

pub struct WorkstationBuilder {
    workstation: Workstation,
}

impl WorkstationBuilder {
    pub fn new(id: WorkstationId) -> Self {
        Self {
            workstation: Workstation::new(id, format!("工位{}", id), 1),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.workstation.name = name.to_string();
        self
    }

    pub fn required(mut self, required_workers: u32) -> Self {
        self.workstation.required_workers = required_workers;
        self
    }

    pub fn priority(mut self) -> Self {
        self.workstation.is_priority = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.workstation.is_active = false;
        self
    }

    pub fn min_competency(mut self, level: u8) -> Self {
        self.workstation.min_competency_level = Some(level);
        self
    }

    pub fn requires_certification(mut self) -> Self {
        self.workstation.requires_certification = Some(true);
        self
    }

    pub fn build(self) -> Workstation {
        self.workstation
    }
}

// ==========================================
// Capability / Restriction 辅助函数
// ==========================================

pub fn capability(
    worker_id: WorkerId,
    workstation_id: WorkstationId,
    level: u8,
    certified: bool,
) -> Capability {
    let mut cap = Capability::new(worker_id, workstation_id, level);
    cap.is_certified = certified;
    cap
}

pub fn prohibited(worker_id: WorkerId, workstation_id: WorkstationId) -> Restriction {
    Restriction::new(worker_id, workstation_id, RestrictionType::Prohibited)
}

pub fn limited(worker_id: WorkerId, workstation_id: WorkstationId) -> Restriction {
    Restriction::new(worker_id, workstation_id, RestrictionType::Limited)
}

pub fn temporary_until(
    worker_id: WorkerId,
    workstation_id: WorkstationId,
    expires_at: DateTime<Utc>,
) -> Restriction {
    let mut restriction = Restriction::new(worker_id, workstation_id, RestrictionType::Temporary);
    restriction.expires_at = Some(expires_at);
    restriction
}

// ==========================================
// 场景辅助函数
// ==========================================

/// 创建 n 名普通在岗员工 (ID 1..=n)
pub fn create_workers(n: i64) -> Vec<Worker> {
    (1..=n).map(|id| WorkerBuilder::new(id).build()).collect()
}

/// 全员可分配到全部工位的关联表
pub fn full_assignment_map(
    workers: &[Worker],
    workstations: &[Workstation],
) -> HashMap<WorkerId, Vec<WorkstationId>> {
    workers
        .iter()
        .map(|w| (w.id, workstations.iter().map(|s| s.id).collect()))
        .collect()
}
