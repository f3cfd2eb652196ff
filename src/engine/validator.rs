// ==========================================
// 工位轮换排班系统 - 轮换校验器
// ==========================================
// 职责: 生成前配置校验 (问题/警告/建议)、自动修复、生成后审计
// 输入: 员工、工位、员工可用工位关联 / 生成结果
// 输出: ValidationResults / AutoFixResults
// ==========================================
// 红线: 不修改输入; 自动修复返回新的修正副本
// 红线: 无在岗员工时仅执行结构性检查
// ==========================================

use crate::config::RotationConfigReader;
use crate::domain::snapshot::RotationSnapshot;
use crate::domain::types::{AssignmentSource, RotationHalf, RotationType, WorkerId, WorkstationId};
use crate::domain::validation::{
    AutoFixAction, AutoFixOutcome, AutoFixResults, ValidationIssue, ValidationResults,
};
use crate::domain::worker::Worker;
use crate::domain::workstation::Workstation;
use crate::engine::diagnostics::{self, codes};
use crate::engine::orchestrator::RotationOutcome;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// 员工 → 可分配工位
pub type AssignmentMap = HashMap<WorkerId, Vec<WorkstationId>>;

// ==========================================
// RotationValidator - 轮换校验器
// ==========================================
pub struct RotationValidator<C>
where
    C: RotationConfigReader,
{
    config: Arc<C>,
}

impl<C> RotationValidator<C>
where
    C: RotationConfigReader,
{
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }

    // ==========================================
    // 生成前校验
    // ==========================================

    /// 校验排班配置 (以当前时刻标记)
    pub fn validate(
        &self,
        workers: &[Worker],
        workstations: &[Workstation],
        assignment_map: &AssignmentMap,
    ) -> ValidationResults {
        self.validate_at(workers, workstations, assignment_map, Utc::now())
    }

    /// 校验排班配置
    ///
    /// # 检查顺序
    /// 1. 结构性: 无在岗员工 / 无启用工位 (CRITICAL)
    /// 2. 领导: 领导工位无效 / 同一工位领导过多
    /// 3. 师徒: 师傅无效 / 培训工位无效
    /// 4. 产能: 总人数不足 / 工位需求人数无效 / 工位无可分配员工
    /// 5. 警告与建议
    #[instrument(skip(self, workers, workstations, assignment_map), fields(
        workers_count = workers.len(),
        workstations_count = workstations.len()
    ))]
    pub fn validate_at(
        &self,
        workers: &[Worker],
        workstations: &[Workstation],
        assignment_map: &AssignmentMap,
        now: DateTime<Utc>,
    ) -> ValidationResults {
        let mut results = ValidationResults::empty(now);

        let mut active_workers: Vec<&Worker> = workers.iter().filter(|w| w.is_active).collect();
        active_workers.sort_by_key(|w| w.id);
        let mut active_stations: Vec<&Workstation> =
            workstations.iter().filter(|s| s.is_active).collect();
        active_stations.sort_by_key(|s| s.id);

        // ===== 结构性检查 =====
        if active_workers.is_empty() {
            results.push_issue(diagnostics::no_active_workers(workers));
            warn!("无在岗员工, 跳过其余检查");
            return results;
        }
        if active_stations.is_empty() {
            results.push_issue(diagnostics::no_active_workstations(workstations));
        }

        let ctx = CheckContext {
            workers_by_id: workers.iter().map(|w| (w.id, w)).collect(),
            stations_by_id: workstations.iter().map(|s| (s.id, s)).collect(),
            active_workers,
            active_stations,
            assignment_map,
        };

        self.check_leaders(&ctx, &mut results);
        self.check_trainees(&ctx, &mut results);
        self.check_capacity(&ctx, &mut results);
        self.collect_warnings(&ctx, &mut results);
        self.collect_suggestions(&ctx, &mut results);

        info!(
            critical = results.critical_issues.len(),
            issues = results.issues.len(),
            warnings = results.warnings.len(),
            suggestions = results.suggestions.len(),
            "配置校验完成"
        );
        results
    }

    fn check_leaders(&self, ctx: &CheckContext<'_>, results: &mut ValidationResults) {
        // 工位 → 有效领导
        let mut leaders_by_station: BTreeMap<WorkstationId, Vec<&Worker>> = BTreeMap::new();

        for leader in ctx.active_workers.iter().copied().filter(|w| w.is_leader) {
            let detail = match leader.leader_workstation_id {
                None => Some("未指定领导工位".to_string()),
                Some(ws_id) => match ctx.stations_by_id.get(&ws_id) {
                    None => Some(format!("领导工位 ID {} 不存在", ws_id)),
                    Some(station) if !station.is_active => {
                        Some(format!("领导工位 ID {} 未启用", ws_id))
                    }
                    Some(_) => {
                        leaders_by_station.entry(ws_id).or_default().push(leader);
                        None
                    }
                },
            };
            if let Some(detail) = detail {
                results.push_issue(diagnostics::orphaned_leader(leader, &detail));
            }
        }

        for (ws_id, leaders) in leaders_by_station {
            let Some(station) = ctx.stations_by_id.get(&ws_id) else {
                continue;
            };
            let over_in = |half: RotationHalf| -> Vec<WorkerId> {
                let ids: Vec<WorkerId> = leaders
                    .iter()
                    .filter(|l| l.leadership_type.applies_to(half))
                    .map(|l| l.id)
                    .collect();
                if ids.len() > station.required_workers as usize {
                    ids
                } else {
                    Vec::new()
                }
            };

            let first = over_in(RotationHalf::First);
            let second = over_in(RotationHalf::Second);
            if !first.is_empty() && first == second {
                results.push_issue(diagnostics::leader_station_conflict(station, first, "全班"));
                continue;
            }
            if !first.is_empty() {
                results.push_issue(diagnostics::leader_station_conflict(station, first, "上半班"));
            }
            if !second.is_empty() {
                results.push_issue(diagnostics::leader_station_conflict(station, second, "下半班"));
            }
        }
    }

    fn check_trainees(&self, ctx: &CheckContext<'_>, results: &mut ValidationResults) {
        for trainee in ctx.active_workers.iter().filter(|w| w.is_trainee) {
            let trainer_problem = match trainee.trainer_id {
                None => Some("未指定师傅".to_string()),
                Some(trainer_id) => match ctx.workers_by_id.get(&trainer_id) {
                    None => Some(format!("师傅 ID {} 不存在", trainer_id)),
                    Some(trainer) if !trainer.is_active => {
                        Some(format!("师傅 ID {} 未在岗", trainer_id))
                    }
                    Some(trainer) if !trainer.is_trainer => {
                        Some(format!("员工 ID {} 不是师傅", trainer_id))
                    }
                    Some(_) => None,
                },
            };
            if let Some(detail) = trainer_problem {
                results.push_issue(diagnostics::orphaned_trainee(trainee, &detail));
            }

            let station_problem = match trainee.training_workstation_id {
                None => Some("未指定培训工位".to_string()),
                Some(ws_id) => match ctx.stations_by_id.get(&ws_id) {
                    None => Some(format!("培训工位 ID {} 不存在", ws_id)),
                    Some(station) if !station.is_active => {
                        Some(format!("培训工位 ID {} 未启用", ws_id))
                    }
                    Some(_) => None,
                },
            };
            if let Some(detail) = station_problem {
                results.push_issue(diagnostics::invalid_training_workstation(trainee, &detail));
            }
        }
    }

    fn check_capacity(&self, ctx: &CheckContext<'_>, results: &mut ValidationResults) {
        let required_total: u64 = ctx
            .active_stations
            .iter()
            .map(|s| u64::from(s.required_workers))
            .sum();
        if !ctx.active_stations.is_empty() && (ctx.active_workers.len() as u64) < required_total {
            results.push_issue(diagnostics::insufficient_capacity(
                ctx.active_workers.len(),
                required_total,
            ));
        }

        for station in &ctx.active_stations {
            if station.required_workers == 0 {
                results.push_issue(diagnostics::invalid_required_workers(station));
                continue;
            }
            if ctx.eligible_count(station.id) == 0 {
                results.push_issue(diagnostics::station_without_eligible_workers(station));
            }
        }
    }

    fn collect_warnings(&self, ctx: &CheckContext<'_>, results: &mut ValidationResults) {
        // ===== 重名 =====
        let mut worker_names: BTreeMap<String, Vec<WorkerId>> = BTreeMap::new();
        for worker in &ctx.active_workers {
            worker_names
                .entry(normalize_name(&worker.name))
                .or_default()
                .push(worker.id);
        }
        for (name, ids) in worker_names.into_iter().filter(|(_, ids)| ids.len() > 1) {
            results.warnings.push(diagnostics::warning(
                codes::DUPLICATE_WORKER_NAME,
                "员工重名",
                format!("{} 名在岗员工使用名称 \"{}\"", ids.len(), name),
                ids,
                Vec::new(),
            ));
        }

        let mut station_names: BTreeMap<String, Vec<WorkstationId>> = BTreeMap::new();
        for station in &ctx.active_stations {
            station_names
                .entry(normalize_name(&station.name))
                .or_default()
                .push(station.id);
        }
        for (name, ids) in station_names.into_iter().filter(|(_, ids)| ids.len() > 1) {
            results.warnings.push(diagnostics::warning(
                codes::DUPLICATE_WORKSTATION_NAME,
                "工位重名",
                format!("{} 个启用工位使用名称 \"{}\"", ids.len(), name),
                Vec::new(),
                ids,
            ));
        }

        // ===== 可用率 =====
        let threshold = self.config.low_availability_threshold();
        for worker in ctx
            .active_workers
            .iter()
            .filter(|w| w.availability_percentage < threshold)
        {
            results.warnings.push(diagnostics::warning(
                codes::LOW_AVAILABILITY,
                "员工可用率低",
                format!(
                    "员工 {} (ID {}) 可用率 {}%, 低于 {}%",
                    worker.name, worker.id, worker.availability_percentage, threshold
                ),
                vec![worker.id],
                Vec::new(),
            ));
        }

        // ===== 超大工位 =====
        let oversized = self.config.oversized_station_threshold();
        for station in ctx
            .active_stations
            .iter()
            .filter(|s| s.required_workers > oversized)
        {
            results.warnings.push(diagnostics::warning(
                codes::OVERSIZED_WORKSTATION,
                "工位需求人数过大",
                format!(
                    "工位 {} (ID {}) 需求 {} 人, 超过 {} 人",
                    station.name, station.id, station.required_workers, oversized
                ),
                Vec::new(),
                vec![station.id],
            ));
        }

        // ===== 无可分配工位的员工 =====
        for worker in &ctx.active_workers {
            let has_station = ctx
                .assignment_map
                .get(&worker.id)
                .is_some_and(|ids| {
                    ids.iter()
                        .any(|id| ctx.stations_by_id.get(id).is_some_and(|s| s.is_active))
                });
            if !has_station {
                results.warnings.push(diagnostics::warning(
                    codes::WORKER_WITHOUT_STATIONS,
                    "员工无可分配工位",
                    format!("员工 {} (ID {}) 没有任何启用的可分配工位", worker.name, worker.id),
                    vec![worker.id],
                    Vec::new(),
                ));
            }
        }
    }

    fn collect_suggestions(&self, ctx: &CheckContext<'_>, results: &mut ValidationResults) {
        for trainer in ctx.active_workers.iter().filter(|w| w.is_active_trainer()) {
            let has_trainee = ctx
                .active_workers
                .iter()
                .any(|w| w.is_active_trainee() && w.trainer_id == Some(trainer.id));
            if !has_trainee {
                results.suggestions.push(diagnostics::suggestion(
                    codes::UNUSED_TRAINER,
                    "师傅未带学徒",
                    format!("师傅 {} (ID {}) 当前没有学徒", trainer.name, trainer.id),
                    vec![trainer.id],
                    Vec::new(),
                ));
            }
        }

        for station in ctx.active_stations.iter().filter(|s| s.is_priority) {
            let has_leader = ctx
                .active_workers
                .iter()
                .any(|w| w.is_leader && w.leader_workstation_id == Some(station.id));
            if !has_leader {
                results.suggestions.push(diagnostics::suggestion(
                    codes::STATION_WITHOUT_LEADER,
                    "优先工位无领导",
                    format!("优先工位 {} (ID {}) 未指定领导", station.name, station.id),
                    Vec::new(),
                    vec![station.id],
                ));
            }
        }

        for station in ctx.active_stations.iter().filter(|s| s.is_staffable()) {
            let eligible = ctx.eligible_count(station.id);
            if eligible == station.required_workers as usize {
                results.suggestions.push(diagnostics::suggestion(
                    codes::NO_BACKUP_WORKERS,
                    "工位无替补员工",
                    format!(
                        "工位 {} (ID {}) 可分配员工 {} 人, 恰好等于需求人数",
                        station.name, station.id, eligible
                    ),
                    Vec::new(),
                    vec![station.id],
                ));
            }
        }
    }

    // ==========================================
    // 自动修复
    // ==========================================

    /// 逐项应用自动修复
    ///
    /// 每项修复在副本上执行, 成功才提交; 失败项不影响其他项。
    /// 输入不变, 返回修正后的新副本。
    #[instrument(skip(self, workers, workstations, issues), fields(issues_count = issues.len()))]
    pub fn auto_fix(
        &self,
        workers: &[Worker],
        workstations: &[Workstation],
        issues: &[ValidationIssue],
    ) -> AutoFixResults {
        let mut fixed_workers = workers.to_vec();
        let mut fixed_stations = workstations.to_vec();
        let mut outcomes = Vec::with_capacity(issues.len());

        for issue in issues {
            let Some(action) = issue.fix_action.as_ref() else {
                outcomes.push(AutoFixOutcome {
                    issue_id: issue.id.clone(),
                    success: false,
                    message: "该问题无可用自动修复".to_string(),
                });
                continue;
            };

            let mut scratch_workers = fixed_workers.clone();
            let mut scratch_stations = fixed_stations.clone();
            match apply_fix(action, &mut scratch_workers, &mut scratch_stations) {
                Ok(message) => {
                    debug!(issue_id = %issue.id, "自动修复成功");
                    fixed_workers = scratch_workers;
                    fixed_stations = scratch_stations;
                    outcomes.push(AutoFixOutcome {
                        issue_id: issue.id.clone(),
                        success: true,
                        message,
                    });
                }
                Err(message) => {
                    warn!(issue_id = %issue.id, reason = %message, "自动修复失败");
                    outcomes.push(AutoFixOutcome {
                        issue_id: issue.id.clone(),
                        success: false,
                        message,
                    });
                }
            }
        }

        let results = AutoFixResults {
            workers: fixed_workers,
            workstations: fixed_stations,
            outcomes,
        };
        info!(
            fixed = results.fixed_count(),
            failed = results.failed_count(),
            "自动修复完成"
        );
        results
    }

    // ==========================================
    // 生成后审计
    // ==========================================

    /// 审计生成结果
    ///
    /// # 检查
    /// - 同一轮换类型下员工重复分配 (CRITICAL)
    /// - 非领导固定导致的工位超员 (HIGH)
    /// - 生效领导未在领导工位 (HIGH)
    /// - 师徒配对分离 (HIGH)
    #[instrument(skip(self, outcome, snapshot), fields(
        session_id = %outcome.session.id,
        assignments = outcome.assignments.len()
    ))]
    pub fn audit(&self, outcome: &RotationOutcome, snapshot: &RotationSnapshot) -> ValidationResults {
        let mut results = ValidationResults::empty(outcome.generated_at);
        let active: Vec<_> = outcome.assignments.iter().filter(|a| a.is_active).collect();

        // ===== 重复分配 =====
        let mut placements: BTreeMap<(RotationType, WorkerId), Vec<WorkstationId>> = BTreeMap::new();
        for a in &active {
            placements
                .entry((a.rotation_type, a.worker_id))
                .or_default()
                .push(a.workstation_id);
        }
        for ((rotation_type, worker_id), stations) in placements {
            if stations.len() > 1 {
                results.push_issue(diagnostics::duplicate_assignment(
                    worker_id,
                    rotation_type,
                    stations,
                ));
            }
        }

        // ===== 超员 =====
        for rotation_type in [RotationType::Current, RotationType::Next] {
            for station in snapshot.active_workstations() {
                let seated: Vec<_> = active
                    .iter()
                    .filter(|a| a.rotation_type == rotation_type && a.workstation_id == station.id)
                    .collect();
                let leaders = seated
                    .iter()
                    .filter(|a| a.source == AssignmentSource::Leader)
                    .count();
                let others = seated.len() - leaders;
                let required = station.required_workers as usize;
                if seated.len() > required && others > required.saturating_sub(leaders) {
                    results.push_issue(diagnostics::capacity_exceeded(
                        station,
                        seated.len(),
                        rotation_type,
                    ));
                }
            }
        }

        let current_station = |worker_id: WorkerId| {
            active
                .iter()
                .find(|a| a.rotation_type == RotationType::Current && a.worker_id == worker_id)
                .map(|a| a.workstation_id)
        };

        // ===== 领导位置 =====
        for leader in snapshot
            .active_workers()
            .into_iter()
            .filter(|w| w.leads_during(outcome.half))
        {
            if let (Some(expected), Some(actual)) =
                (leader.leader_workstation_id, current_station(leader.id))
            {
                if expected != actual {
                    results.push_issue(diagnostics::leader_not_at_station(leader, expected, actual));
                }
            }
        }

        // ===== 师徒分离 =====
        for a in active.iter().filter(|a| {
            a.rotation_type == RotationType::Current && a.source == AssignmentSource::TrainingPair
        }) {
            let Some(trainee) = snapshot.find_worker(a.worker_id).filter(|w| w.is_trainee) else {
                continue;
            };
            let Some(trainer_id) = trainee.trainer_id else {
                continue;
            };
            let trainer_station = current_station(trainer_id);
            if trainer_station != Some(a.workstation_id) {
                results.push_issue(diagnostics::training_pair_split(
                    trainee,
                    trainer_id,
                    a.workstation_id,
                    trainer_station,
                ));
            }
        }

        info!(
            critical = results.critical_issues.len(),
            issues = results.issues.len(),
            "生成结果审计完成"
        );
        results
    }
}

// ==========================================
// CheckContext - 单次校验的索引
// ==========================================
struct CheckContext<'a> {
    workers_by_id: HashMap<WorkerId, &'a Worker>,
    stations_by_id: HashMap<WorkstationId, &'a Workstation>,
    active_workers: Vec<&'a Worker>,
    active_stations: Vec<&'a Workstation>,
    assignment_map: &'a AssignmentMap,
}

impl CheckContext<'_> {
    /// 可分配到该工位的在岗员工数
    fn eligible_count(&self, workstation_id: WorkstationId) -> usize {
        self.active_workers
            .iter()
            .filter(|w| {
                self.assignment_map
                    .get(&w.id)
                    .is_some_and(|ids| ids.contains(&workstation_id))
            })
            .count()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// 在副本上执行单项修复, 返回结果说明
fn apply_fix(
    action: &AutoFixAction,
    workers: &mut [Worker],
    workstations: &mut [Workstation],
) -> Result<String, String> {
    match action {
        AutoFixAction::ActivateWorker { worker_id } => {
            let worker = find_worker_mut(workers, *worker_id)?;
            worker.is_active = true;
            Ok(format!("已启用员工 {} (ID {})", worker.name, worker.id))
        }
        AutoFixAction::ActivateWorkstation { workstation_id } => {
            let station = find_station_mut(workstations, *workstation_id)?;
            station.is_active = true;
            if station.required_workers == 0 {
                station.required_workers = 1;
            }
            Ok(format!("已启用工位 {} (ID {})", station.name, station.id))
        }
        AutoFixAction::ClearLeaderAssignment { worker_id } => {
            let worker = find_worker_mut(workers, *worker_id)?;
            worker.is_leader = false;
            worker.leader_workstation_id = None;
            Ok(format!("已取消 {} 的领导指定", worker.name))
        }
        AutoFixAction::UnlinkTrainee { worker_id } => {
            let worker = find_worker_mut(workers, *worker_id)?;
            worker.is_trainee = false;
            worker.trainer_id = None;
            worker.training_workstation_id = None;
            Ok(format!("已解除 {} 的学徒关联", worker.name))
        }
        AutoFixAction::SetRequiredWorkers {
            workstation_id,
            required_workers,
        } => {
            if *required_workers == 0 {
                return Err("需求人数必须大于 0".to_string());
            }
            let station = find_station_mut(workstations, *workstation_id)?;
            station.required_workers = *required_workers;
            Ok(format!(
                "已将 {} 的需求人数设为 {}",
                station.name, required_workers
            ))
        }
    }
}

fn find_worker_mut(workers: &mut [Worker], id: WorkerId) -> Result<&mut Worker, String> {
    workers
        .iter_mut()
        .find(|w| w.id == id)
        .ok_or_else(|| format!("员工 ID {} 不存在", id))
}

fn find_station_mut(
    workstations: &mut [Workstation],
    id: WorkstationId,
) -> Result<&mut Workstation, String> {
    workstations
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| format!("工位 ID {} 不存在", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RotationConfig;
    use crate::domain::types::Severity;

    fn validator() -> RotationValidator<RotationConfig> {
        RotationValidator::new(Arc::new(RotationConfig::default()))
    }

    fn everyone_everywhere(workers: &[Worker], stations: &[Workstation]) -> AssignmentMap {
        workers
            .iter()
            .map(|w| (w.id, stations.iter().map(|s| s.id).collect()))
            .collect()
    }

    #[test]
    fn test_no_active_workers_only_structural() {
        let mut w = Worker::new(1, "张三");
        w.is_active = false;
        w.is_trainee = true;
        let workers = vec![w];
        let mut station = Workstation::new(10, "装配", 1);
        station.is_active = false;
        let stations = vec![station];

        let results = validator().validate(&workers, &stations, &AssignmentMap::new());

        assert!(!results.is_valid());
        assert_eq!(results.critical_issues.len(), 1);
        assert_eq!(results.critical_issues[0].id, codes::NO_ACTIVE_WORKERS);
        assert!(results.issues.is_empty());
        assert!(results.warnings.is_empty());
        assert!(results.suggestions.is_empty());
    }

    #[test]
    fn test_healthy_configuration_is_valid() {
        let workers = vec![Worker::new(1, "张三"), Worker::new(2, "李四")];
        let stations = vec![Workstation::new(10, "装配", 1)];
        let map = everyone_everywhere(&workers, &stations);

        let results = validator().validate(&workers, &stations, &map);

        assert!(results.is_valid());
        assert!(results.issues.is_empty());
        assert!(results.warnings.is_empty());
    }

    #[test]
    fn test_zero_required_workers_fixable() {
        let workers = vec![Worker::new(1, "张三")];
        let stations = vec![Workstation::new(10, "装配", 0)];
        let map = everyone_everywhere(&workers, &stations);

        let v = validator();
        let results = v.validate(&workers, &stations, &map);
        let issue = results
            .issues
            .iter()
            .find(|i| i.id == codes::INVALID_REQUIRED_WORKERS)
            .unwrap();
        assert_eq!(issue.severity, Severity::Medium);

        let fixed = v.auto_fix(&workers, &stations, &results.fixable_issues());
        assert_eq!(fixed.fixed_count(), 1);
        assert_eq!(fixed.workstations[0].required_workers, 1);
        // 原输入不变
        assert_eq!(stations[0].required_workers, 0);
    }

    #[test]
    fn test_huge_required_workers_reported_without_overflow() {
        let workers = vec![Worker::new(1, "张三")];
        let stations = vec![
            Workstation::new(10, "装配", u32::MAX),
            Workstation::new(11, "质检", 2),
        ];
        let map = everyone_everywhere(&workers, &stations);

        let results = validator().validate(&workers, &stations, &map);

        assert!(results.has_issue(codes::INSUFFICIENT_CAPACITY));
        assert!(results.has_warning(codes::OVERSIZED_WORKSTATION));
    }

    #[test]
    fn test_fix_failure_does_not_commit() {
        let workers = vec![Worker::new(1, "张三")];
        let stations = vec![Workstation::new(10, "装配", 1)];
        let issues = vec![
            diagnostics::orphaned_leader(&Worker::new(99, "幽灵"), "未指定领导工位"),
            diagnostics::insufficient_capacity(1, 3),
        ];

        let fixed = validator().auto_fix(&workers, &stations, &issues);

        assert_eq!(fixed.fixed_count(), 0);
        assert_eq!(fixed.failed_count(), 2);
        assert_eq!(fixed.workers, workers);
    }

    #[test]
    fn test_leader_station_conflict_reported_once_for_full_shift() {
        let mut l1 = Worker::new(1, "A");
        l1.is_leader = true;
        l1.leader_workstation_id = Some(10);
        let mut l2 = l1.clone();
        l2.id = 2;
        l2.name = "B".to_string();
        let workers = vec![l1, l2];
        let stations = vec![Workstation::new(10, "装配", 1)];
        let map = everyone_everywhere(&workers, &stations);

        let results = validator().validate(&workers, &stations, &map);
        let conflicts: Vec<_> = results
            .issues
            .iter()
            .filter(|i| i.id == codes::LEADER_STATION_CONFLICT)
            .collect();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].affected_workers, vec![1, 2]);
    }
}
