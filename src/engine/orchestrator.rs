// ==========================================
// 工位轮换排班系统 - 轮换编排器
// ==========================================
// 用途: 按固定顺序执行五个分配阶段
// 阶段: 领导固定 → 师徒配对 → 优先工位 → 普通工位 → 下一轮预计算
// ==========================================
// 红线: 阶段不回溯; 同一轮换类型下员工至多分配一次
// 红线: 领导固定可超出 required_workers (领导连续性优先, 以 HIGH 问题告知调用方)
// ==========================================

use crate::config::RotationConfigReader;
use crate::domain::session::{RotationAssignment, RotationSession};
use crate::domain::snapshot::RotationSnapshot;
use crate::domain::types::{
    AssignmentSource, RotationHalf, RotationType, Severity, WorkerId, WorkstationId,
};
use crate::domain::validation::ValidationIssue;
use crate::domain::worker::Worker;
use crate::domain::workstation::Workstation;
use crate::engine::diagnostics;
use crate::engine::eligibility::EligibilityFilter;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::station_filler::{CandidatePool, StationFiller, UnfilledStation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// SkipReason - 师徒配对跳过原因
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    /// 学徒已在前序阶段分配
    AlreadyAssigned,
    MissingTrainer,
    TrainerNotFound { trainer_id: WorkerId },
    TrainerInactive { trainer_id: WorkerId },
    NotATrainer { trainer_id: WorkerId },
    /// 师傅已分配到其他工位
    TrainerUnavailable { trainer_id: WorkerId },
    MissingTrainingWorkstation,
    WorkstationNotFound { workstation_id: WorkstationId },
    WorkstationInactive { workstation_id: WorkstationId },
    Restricted { worker_id: WorkerId },
    StationFull { seated: u32, required: u32 },
}

impl SkipReason {
    /// 是否为引用性问题 (需要以 HIGH 问题上报)
    pub fn is_referential(&self) -> bool {
        matches!(
            self,
            SkipReason::MissingTrainer
                | SkipReason::TrainerNotFound { .. }
                | SkipReason::TrainerInactive { .. }
                | SkipReason::NotATrainer { .. }
                | SkipReason::MissingTrainingWorkstation
                | SkipReason::WorkstationNotFound { .. }
                | SkipReason::WorkstationInactive { .. }
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyAssigned => write!(f, "ALREADY_ASSIGNED"),
            SkipReason::MissingTrainer => write!(f, "MISSING_TRAINER"),
            SkipReason::TrainerNotFound { trainer_id } => {
                write!(f, "TRAINER_NOT_FOUND: trainer_id={}", trainer_id)
            }
            SkipReason::TrainerInactive { trainer_id } => {
                write!(f, "TRAINER_INACTIVE: trainer_id={}", trainer_id)
            }
            SkipReason::NotATrainer { trainer_id } => {
                write!(f, "NOT_A_TRAINER: trainer_id={}", trainer_id)
            }
            SkipReason::TrainerUnavailable { trainer_id } => {
                write!(f, "TRAINER_UNAVAILABLE: trainer_id={}", trainer_id)
            }
            SkipReason::MissingTrainingWorkstation => write!(f, "MISSING_TRAINING_WORKSTATION"),
            SkipReason::WorkstationNotFound { workstation_id } => {
                write!(f, "WORKSTATION_NOT_FOUND: workstation_id={}", workstation_id)
            }
            SkipReason::WorkstationInactive { workstation_id } => {
                write!(f, "WORKSTATION_INACTIVE: workstation_id={}", workstation_id)
            }
            SkipReason::Restricted { worker_id } => {
                write!(f, "RESTRICTED: worker_id={}", worker_id)
            }
            SkipReason::StationFull { seated, required } => {
                write!(f, "STATION_FULL: seated={}, required={}", seated, required)
            }
        }
    }
}

// ==========================================
// SkippedTrainingPair - 被跳过的师徒配对
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedTrainingPair {
    pub trainee_id: WorkerId,
    pub trainer_id: Option<WorkerId>,
    pub workstation_id: Option<WorkstationId>,
    pub reason: SkipReason,
}

// ==========================================
// RotationOutcome - 轮换生成结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationOutcome {
    pub session: RotationSession,
    pub half: RotationHalf,
    pub assignments: Vec<RotationAssignment>,
    pub unfilled: Vec<UnfilledStation>,
    pub skipped_pairs: Vec<SkippedTrainingPair>,
    pub issues: Vec<ValidationIssue>,
    pub generated_at: DateTime<Utc>,
}

impl RotationOutcome {
    /// 是否因结构性问题中止
    pub fn is_blocked(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Critical)
    }

    pub fn assignments_of(&self, rotation_type: RotationType) -> Vec<&RotationAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.rotation_type == rotation_type)
            .collect()
    }

    pub fn assignment_for(
        &self,
        worker_id: WorkerId,
        rotation_type: RotationType,
    ) -> Option<&RotationAssignment> {
        self.assignments
            .iter()
            .find(|a| a.worker_id == worker_id && a.rotation_type == rotation_type)
    }

    /// 工位在指定轮换类型下的在岗人数
    pub fn seated_count(&self, workstation_id: WorkstationId, rotation_type: RotationType) -> usize {
        self.assignments
            .iter()
            .filter(|a| {
                a.workstation_id == workstation_id && a.rotation_type == rotation_type && a.is_active
            })
            .count()
    }
}

// ==========================================
// PhaseState - 单一轮换类型的阶段共享状态
// ==========================================
struct PhaseState<'a> {
    rotation_type: RotationType,
    pool: CandidatePool<'a>,
    seated: HashMap<WorkstationId, u32>,
    assignments: Vec<RotationAssignment>,
    unfilled: Vec<UnfilledStation>,
}

impl<'a> PhaseState<'a> {
    fn new(rotation_type: RotationType, workers: &'a [Worker]) -> Self {
        Self {
            rotation_type,
            pool: CandidatePool::from_workers(workers),
            seated: HashMap::new(),
            assignments: Vec::new(),
            unfilled: Vec::new(),
        }
    }

    fn seated(&self, workstation_id: WorkstationId) -> u32 {
        self.seated.get(&workstation_id).copied().unwrap_or(0)
    }

    fn place(&mut self, assignment: RotationAssignment) {
        self.pool.remove(assignment.worker_id);
        *self.seated.entry(assignment.workstation_id).or_insert(0) += 1;
        self.assignments.push(assignment);
    }

    fn is_placed_at(&self, worker_id: WorkerId, workstation_id: WorkstationId) -> bool {
        self.assignments
            .iter()
            .any(|a| a.worker_id == worker_id && a.workstation_id == workstation_id)
    }
}

// ==========================================
// RotationOrchestrator - 轮换编排器
// ==========================================
pub struct RotationOrchestrator<C>
where
    C: RotationConfigReader,
{
    config: Arc<C>,
    filler: StationFiller,
}

impl<C> RotationOrchestrator<C>
where
    C: RotationConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            filler: StationFiller::new(),
        }
    }

    /// 生成一轮轮换（CURRENT + NEXT）
    ///
    /// # 参数
    /// - session: 轮换会话 (DRAFT 或 ACTIVE)
    /// - snapshot: 输入快照
    /// - half: 生成的半班 (决定哪些领导生效)
    /// - now: 生成时刻
    ///
    /// # 返回
    /// - Ok(RotationOutcome): 尽力而为的分配结果 + 诊断
    ///   (无在岗员工/无启用工位时分配为空, 附 CRITICAL 问题, 会话不变)
    /// - Err(EngineError::SessionClosed): 会话已完成或已取消
    #[instrument(skip(self, session, snapshot), fields(
        session_id = %session.id,
        workers_count = snapshot.workers.len(),
        workstations_count = snapshot.workstations.len()
    ))]
    pub fn generate(
        &self,
        mut session: RotationSession,
        snapshot: &RotationSnapshot,
        half: RotationHalf,
        now: DateTime<Utc>,
    ) -> EngineResult<RotationOutcome> {
        if session.status.is_terminal() {
            return Err(EngineError::SessionClosed {
                session_id: session.id,
                status: session.status.to_string(),
            });
        }

        info!("开始生成轮换");

        // ==========================================
        // 步骤0: 结构性检查
        // ==========================================
        let mut issues = Vec::new();
        if snapshot.active_workers().is_empty() {
            issues.push(diagnostics::no_active_workers(&snapshot.workers));
        }
        if snapshot.active_workstations().is_empty() {
            issues.push(diagnostics::no_active_workstations(&snapshot.workstations));
        }
        if !issues.is_empty() {
            warn!(critical_count = issues.len(), "结构性问题, 中止生成");
            return Ok(RotationOutcome {
                session,
                half,
                assignments: Vec::new(),
                unfilled: Vec::new(),
                skipped_pairs: Vec::new(),
                issues,
                generated_at: now,
            });
        }

        let filter = EligibilityFilter::from_snapshot(&*self.config, snapshot, now);
        let stations_by_id: HashMap<WorkstationId, &Workstation> =
            snapshot.workstations.iter().map(|s| (s.id, s)).collect();
        let workers_by_id: HashMap<WorkerId, &Worker> =
            snapshot.workers.iter().map(|w| (w.id, w)).collect();
        let (priority_stations, normal_stations) = Self::partition_stations(snapshot);

        // ==========================================
        // CURRENT: 阶段1-4
        // ==========================================
        let mut current = PhaseState::new(RotationType::Current, &snapshot.workers);

        debug!("阶段1: 领导固定");
        self.run_leader_phase(
            snapshot,
            &filter,
            &stations_by_id,
            half,
            session.id,
            &mut current,
            &mut issues,
        );

        debug!("阶段2: 师徒配对");
        let skipped_pairs = self.run_training_phase(
            snapshot,
            &filter,
            &stations_by_id,
            &workers_by_id,
            session.id,
            &mut current,
            &mut issues,
        );

        debug!("阶段3-4: 优先工位 → 普通工位");
        self.run_fill_phases(
            &filter,
            &priority_stations,
            &normal_stations,
            session.id,
            &mut current,
        );

        info!(
            assignments = current.assignments.len(),
            unfilled = current.unfilled.len(),
            skipped_pairs = skipped_pairs.len(),
            "CURRENT 轮换完成"
        );

        // ==========================================
        // NEXT: 阶段5 (不重新固定领导与师徒, 使用完整员工池)
        // ==========================================
        debug!("阶段5: 下一轮预计算");
        let mut next = PhaseState::new(RotationType::Next, &snapshot.workers);
        self.run_fill_phases(
            &filter,
            &priority_stations,
            &normal_stations,
            session.id,
            &mut next,
        );

        info!(
            assignments = next.assignments.len(),
            unfilled = next.unfilled.len(),
            "NEXT 轮换完成"
        );

        // ==========================================
        // 汇总
        // ==========================================
        let mut assignments = current.assignments;
        assignments.extend(next.assignments);
        let mut unfilled = current.unfilled;
        unfilled.extend(next.unfilled);

        for station in &unfilled {
            issues.push(diagnostics::station_understaffed(
                station.workstation_id,
                station.is_priority,
                station.shortfall,
                station.rotation_type,
            ));
        }

        session.activate(now)?;
        session.refresh_counts(&assignments, unfilled.len());

        info!(
            total_assignments = assignments.len(),
            issues = issues.len(),
            "轮换生成完成"
        );

        Ok(RotationOutcome {
            session,
            half,
            assignments,
            unfilled,
            skipped_pairs,
            issues,
            generated_at: now,
        })
    }

    // ==========================================
    // 阶段1: 领导固定
    // ==========================================
    #[allow(clippy::too_many_arguments)]
    fn run_leader_phase<'a>(
        &self,
        snapshot: &'a RotationSnapshot,
        filter: &EligibilityFilter<'_>,
        stations_by_id: &HashMap<WorkstationId, &'a Workstation>,
        half: RotationHalf,
        session_id: Uuid,
        state: &mut PhaseState<'a>,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let allow_overflow = self.config.leader_can_exceed_capacity();
        // 工位 → (冲突领导, 是否已固定)
        let mut conflicts: BTreeMap<WorkstationId, (Vec<WorkerId>, bool)> = BTreeMap::new();

        for leader in snapshot.active_workers() {
            if !leader.leads_during(half) {
                continue;
            }

            let station = match leader.leader_workstation_id {
                None => {
                    issues.push(diagnostics::orphaned_leader(leader, "未指定领导工位"));
                    continue;
                }
                Some(ws_id) => match stations_by_id.get(&ws_id) {
                    None => {
                        issues.push(diagnostics::orphaned_leader(
                            leader,
                            &format!("领导工位 ID {} 不存在", ws_id),
                        ));
                        continue;
                    }
                    Some(station) if !station.is_active => {
                        issues.push(diagnostics::orphaned_leader(
                            leader,
                            &format!("领导工位 ID {} 未启用", ws_id),
                        ));
                        continue;
                    }
                    Some(station) => *station,
                },
            };

            if filter.is_restricted(leader, station) {
                issues.push(diagnostics::leader_restricted(leader, station));
                continue;
            }

            if state.seated(station.id) >= station.required_workers {
                let entry = conflicts.entry(station.id).or_insert((Vec::new(), allow_overflow));
                entry.0.push(leader.id);
                if !allow_overflow {
                    warn!(
                        worker_id = leader.id,
                        workstation_id = station.id,
                        "领导工位已满, 不超额固定"
                    );
                    continue;
                }
                warn!(
                    worker_id = leader.id,
                    workstation_id = station.id,
                    "领导工位已满, 超额固定"
                );
            }

            state.place(RotationAssignment::new(
                leader.id,
                station.id,
                session_id,
                state.rotation_type,
                AssignmentSource::Leader,
            ));
        }

        for (ws_id, (leader_ids, pinned)) in conflicts {
            if let Some(station) = stations_by_id.get(&ws_id) {
                issues.push(diagnostics::leader_capacity_conflict(station, leader_ids, pinned));
            }
        }
    }

    // ==========================================
    // 阶段2: 师徒配对 (原子放置, 失败则整对跳过)
    // ==========================================
    #[allow(clippy::too_many_arguments)]
    fn run_training_phase<'a>(
        &self,
        snapshot: &'a RotationSnapshot,
        filter: &EligibilityFilter<'_>,
        stations_by_id: &HashMap<WorkstationId, &'a Workstation>,
        workers_by_id: &HashMap<WorkerId, &'a Worker>,
        session_id: Uuid,
        state: &mut PhaseState<'a>,
        issues: &mut Vec<ValidationIssue>,
    ) -> Vec<SkippedTrainingPair> {
        let mut skipped = Vec::new();

        for trainee in snapshot
            .active_workers()
            .into_iter()
            .filter(|w| w.is_active_trainee())
        {
            match self.place_training_pair(
                trainee,
                filter,
                stations_by_id,
                workers_by_id,
                session_id,
                state,
            ) {
                Ok(()) => {}
                Err(reason) => {
                    warn!(trainee_id = trainee.id, reason = %reason, "师徒配对跳过");
                    if reason.is_referential() {
                        issues.push(Self::pair_issue(trainee, &reason));
                    }
                    skipped.push(SkippedTrainingPair {
                        trainee_id: trainee.id,
                        trainer_id: trainee.trainer_id,
                        workstation_id: trainee.training_workstation_id,
                        reason,
                    });
                }
            }
        }

        skipped
    }

    fn place_training_pair<'a>(
        &self,
        trainee: &'a Worker,
        filter: &EligibilityFilter<'_>,
        stations_by_id: &HashMap<WorkstationId, &'a Workstation>,
        workers_by_id: &HashMap<WorkerId, &'a Worker>,
        session_id: Uuid,
        state: &mut PhaseState<'a>,
    ) -> Result<(), SkipReason> {
        if !state.pool.contains(trainee.id) {
            return Err(SkipReason::AlreadyAssigned);
        }

        // 师傅
        let trainer_id = trainee.trainer_id.ok_or(SkipReason::MissingTrainer)?;
        let trainer = workers_by_id
            .get(&trainer_id)
            .copied()
            .ok_or(SkipReason::TrainerNotFound { trainer_id })?;
        if !trainer.is_active {
            return Err(SkipReason::TrainerInactive { trainer_id });
        }
        if !trainer.is_trainer {
            return Err(SkipReason::NotATrainer { trainer_id });
        }

        // 培训工位
        let workstation_id = trainee
            .training_workstation_id
            .ok_or(SkipReason::MissingTrainingWorkstation)?;
        let station = stations_by_id
            .get(&workstation_id)
            .copied()
            .ok_or(SkipReason::WorkstationNotFound { workstation_id })?;
        if !station.is_active {
            return Err(SkipReason::WorkstationInactive { workstation_id });
        }

        // 限制
        for worker in [trainee, trainer] {
            if filter.is_restricted(worker, station) {
                return Err(SkipReason::Restricted {
                    worker_id: worker.id,
                });
            }
        }

        // 师傅可用性: 在池中需占位; 已在同一工位则复用; 否则不可用
        let needs_trainer_slot = if state.pool.contains(trainer.id) {
            true
        } else if state.is_placed_at(trainer.id, station.id) {
            false
        } else {
            return Err(SkipReason::TrainerUnavailable { trainer_id });
        };

        let slots = 1 + u32::from(needs_trainer_slot);
        let seated = state.seated(station.id);
        if seated + slots > station.required_workers {
            return Err(SkipReason::StationFull {
                seated,
                required: station.required_workers,
            });
        }

        if needs_trainer_slot {
            state.place(RotationAssignment::new(
                trainer.id,
                station.id,
                session_id,
                state.rotation_type,
                AssignmentSource::TrainingPair,
            ));
        }
        state.place(RotationAssignment::new(
            trainee.id,
            station.id,
            session_id,
            state.rotation_type,
            AssignmentSource::TrainingPair,
        ));

        debug!(
            trainee_id = trainee.id,
            trainer_id = trainer.id,
            workstation_id = station.id,
            "师徒配对完成"
        );
        Ok(())
    }

    fn pair_issue(trainee: &Worker, reason: &SkipReason) -> ValidationIssue {
        match reason {
            SkipReason::MissingTrainingWorkstation
            | SkipReason::WorkstationNotFound { .. }
            | SkipReason::WorkstationInactive { .. } => {
                diagnostics::invalid_training_workstation(trainee, &reason.to_string())
            }
            _ => diagnostics::orphaned_trainee(trainee, &reason.to_string()),
        }
    }

    // ==========================================
    // 阶段3-4 / 5: 优先工位 → 普通工位
    // ==========================================
    fn run_fill_phases(
        &self,
        filter: &EligibilityFilter<'_>,
        priority_stations: &[&Workstation],
        normal_stations: &[&Workstation],
        session_id: Uuid,
        state: &mut PhaseState<'_>,
    ) {
        for stations in [priority_stations, normal_stations] {
            let result = self.filler.fill(
                stations,
                &mut state.pool,
                filter,
                &mut state.seated,
                session_id,
                state.rotation_type,
            );
            state.assignments.extend(result.assignments);
            state.unfilled.extend(result.unfilled);
        }
    }

    /// 可排班工位拆分为 (优先, 普通), 均按 ID 升序
    fn partition_stations(snapshot: &RotationSnapshot) -> (Vec<&Workstation>, Vec<&Workstation>) {
        snapshot
            .active_workstations()
            .into_iter()
            .filter(|s| s.is_staffable())
            .partition(|s| s.is_priority)
    }
}

#[cfg(test)]
mod tests;
