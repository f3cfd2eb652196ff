// ==========================================
// 工位轮换排班系统 - 均衡轮换引擎
// ==========================================
// 职责: 不考虑领导/师徒/优先级, 按最少轮换次数轮询分配
// 输入: RotationSnapshot (历史分配次数作为初始计数)
// 输出: BalancedSchedule (N 轮分配 + 累计计数)
// ==========================================
// 红线: 同一轮内员工至多分配一次; 遵守限制与可用工位关联
// ==========================================

use crate::config::RotationConfigReader;
use crate::domain::session::RotationAssignment;
use crate::domain::snapshot::RotationSnapshot;
use crate::domain::types::{AssignmentSource, RotationType, WorkerId, WorkstationId};
use crate::engine::eligibility::EligibilityFilter;
use crate::engine::station_filler::UnfilledStation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// BalancedRotation - 单轮分配
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancedRotation {
    pub rotation_index: usize,
    pub assignments: Vec<RotationAssignment>,
    pub unfilled: Vec<UnfilledStation>,
}

// ==========================================
// BalancedSchedule - 均衡排班结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancedSchedule {
    pub session_id: Uuid,
    pub rotations: Vec<BalancedRotation>,
    /// 累计分配次数 (含历史计数)
    pub assignment_counts: BTreeMap<WorkerId, u32>,
    pub generated_at: DateTime<Utc>,
}

impl BalancedSchedule {
    pub fn total_assignments(&self) -> usize {
        self.rotations.iter().map(|r| r.assignments.len()).sum()
    }

    /// 员工在本次排班中的分配工位 (按轮次顺序)
    pub fn stations_for(&self, worker_id: WorkerId) -> Vec<WorkstationId> {
        self.rotations
            .iter()
            .flat_map(|r| r.assignments.iter())
            .filter(|a| a.worker_id == worker_id)
            .map(|a| a.workstation_id)
            .collect()
    }
}

// ==========================================
// EquitableBalancer - 均衡轮换引擎
// ==========================================
pub struct EquitableBalancer<C>
where
    C: RotationConfigReader,
{
    config: Arc<C>,
}

impl<C> EquitableBalancer<C>
where
    C: RotationConfigReader,
{
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }

    /// 生成均衡排班
    ///
    /// 规则：
    /// 1) 轮数 N = max(在岗员工数, 可排班工位数)
    /// 2) 每轮按工位 ID 升序, 为每个工位补足 required_workers 个名额
    /// 3) 每个名额选择本轮未使用、合格、累计次数最少的员工 (同数按 ID)
    /// 4) 第 0 轮标记为 CURRENT, 其余为 NEXT
    ///
    /// # 参数
    /// - session_id: 会话 ID
    /// - snapshot: 输入快照
    /// - now: 生成时刻 (用于限制过期判断)
    #[instrument(skip(self, snapshot), fields(
        workers_count = snapshot.workers.len(),
        workstations_count = snapshot.workstations.len()
    ))]
    pub fn generate_schedule(
        &self,
        session_id: Uuid,
        snapshot: &RotationSnapshot,
        now: DateTime<Utc>,
    ) -> BalancedSchedule {
        let workers = snapshot.active_workers();
        let stations: Vec<_> = snapshot
            .active_workstations()
            .into_iter()
            .filter(|s| s.is_staffable())
            .collect();

        let mut counts: BTreeMap<WorkerId, u32> = workers
            .iter()
            .map(|w| {
                let prior = snapshot.prior_assignment_counts.get(&w.id).copied().unwrap_or(0);
                (w.id, prior)
            })
            .collect();

        let filter =
            EligibilityFilter::from_snapshot(&*self.config, snapshot, now).without_capability_check();

        let rotation_count = if stations.is_empty() {
            0
        } else {
            workers.len().max(stations.len())
        };
        info!(rotation_count, "开始均衡排班");

        let mut rotations = Vec::with_capacity(rotation_count);
        for rotation_index in 0..rotation_count {
            let rotation_type = if rotation_index == 0 {
                RotationType::Current
            } else {
                RotationType::Next
            };
            let mut used: HashSet<WorkerId> = HashSet::new();
            let mut rotation = BalancedRotation {
                rotation_index,
                assignments: Vec::new(),
                unfilled: Vec::new(),
            };

            for station in &stations {
                let mut placed = 0u32;
                while placed < station.required_workers {
                    let pick = workers
                        .iter()
                        .filter(|w| !used.contains(&w.id))
                        .filter(|w| filter.is_eligible(w, station))
                        .min_by_key(|w| (counts.get(&w.id).copied().unwrap_or(0), w.id));

                    let Some(worker) = pick else {
                        break;
                    };

                    used.insert(worker.id);
                    *counts.entry(worker.id).or_insert(0) += 1;
                    rotation.assignments.push(RotationAssignment::new(
                        worker.id,
                        station.id,
                        session_id,
                        rotation_type,
                        AssignmentSource::Balanced,
                    ));
                    placed += 1;
                }

                if placed < station.required_workers {
                    rotation.unfilled.push(UnfilledStation {
                        workstation_id: station.id,
                        rotation_type,
                        is_priority: station.is_priority,
                        required_workers: station.required_workers,
                        assigned_workers: placed,
                        shortfall: station.required_workers - placed,
                    });
                }
            }

            debug!(
                rotation_index,
                assignments = rotation.assignments.len(),
                unfilled = rotation.unfilled.len(),
                "均衡轮次完成"
            );
            rotations.push(rotation);
        }

        let schedule = BalancedSchedule {
            session_id,
            rotations,
            assignment_counts: counts,
            generated_at: now,
        };
        info!(total_assignments = schedule.total_assignments(), "均衡排班完成");
        schedule
    }
}
