// ==========================================
// 工位轮换排班系统 - 资格过滤器
// ==========================================
// 职责: 基于快照索引的员工×工位资格判定与适配度评分
// 输入: RotationSnapshot + 配置
// 输出: EligibilityDecision / 候选评分
// ==========================================
// 红线: 不修改快照, 只计算和返回判定结果
// ==========================================

use crate::config::{RotationConfigReader, SuitabilityWeights};
use crate::domain::capability::{Capability, Restriction};
use crate::domain::snapshot::RotationSnapshot;
use crate::domain::types::{WorkerId, WorkstationId};
use crate::domain::worker::Worker;
use crate::domain::workstation::Workstation;
use crate::engine::eligibility_core::{CapabilityThreshold, EligibilityCore, EligibilityDecision};
use crate::engine::station_filler::{CandidateScore, CandidateScorer};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

type PairKey = (WorkerId, WorkstationId);

// ==========================================
// EligibilityFilter - 资格过滤器
// ==========================================
pub struct EligibilityFilter<'a> {
    now: DateTime<Utc>,
    weights: SuitabilityWeights,
    limited_penalty_factor: f64,
    default_min_competency_level: Option<u8>,
    default_require_certification: bool,

    // ===== 快照索引 =====
    capabilities: Option<HashMap<PairKey, &'a Capability>>,
    restrictions: HashMap<PairKey, Vec<&'a Restriction>>,
    eligible_workstations: Option<HashMap<WorkerId, HashSet<WorkstationId>>>,

    /// 为 false 时忽略能力门槛 (均衡轮换使用)
    check_capabilities: bool,
}

impl<'a> EligibilityFilter<'a> {
    /// 从快照构建过滤器
    ///
    /// # 参数
    /// - config: 配置读取器
    /// - snapshot: 输入快照
    /// - now: 判定时刻
    pub fn from_snapshot<C>(config: &C, snapshot: &'a RotationSnapshot, now: DateTime<Utc>) -> Self
    where
        C: RotationConfigReader + ?Sized,
    {
        let capabilities = snapshot.capabilities.as_ref().map(|caps| {
            caps.iter()
                .filter(|c| c.is_active)
                .map(|c| ((c.worker_id, c.workstation_id), c))
                .collect::<HashMap<_, _>>()
        });

        let mut restrictions: HashMap<PairKey, Vec<&Restriction>> = HashMap::new();
        for restriction in &snapshot.restrictions {
            restrictions
                .entry((restriction.worker_id, restriction.workstation_id))
                .or_default()
                .push(restriction);
        }

        let eligible_workstations = snapshot.eligible_workstations.as_ref().map(|map| {
            map.iter()
                .map(|(worker_id, stations)| (*worker_id, stations.iter().copied().collect()))
                .collect::<HashMap<_, HashSet<_>>>()
        });

        Self {
            now,
            weights: config.suitability_weights(),
            limited_penalty_factor: config.limited_penalty_factor(),
            default_min_competency_level: config.default_min_competency_level(),
            default_require_certification: config.require_certification(),
            capabilities,
            restrictions,
            eligible_workstations,
            check_capabilities: true,
        }
    }

    /// 忽略能力门槛 (仍然遵守限制与可用工位关联)
    pub fn without_capability_check(mut self) -> Self {
        self.check_capabilities = false;
        self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 判定员工×工位资格
    pub fn evaluate(&self, worker: &Worker, workstation: &Workstation) -> EligibilityDecision {
        if let Some(map) = &self.eligible_workstations {
            let listed = map
                .get(&worker.id)
                .is_some_and(|stations| stations.contains(&workstation.id));
            if !listed {
                return EligibilityDecision::blocked(format!(
                    "NOT_ASSIGNABLE: workstation_id={} not in worker {} eligible list",
                    workstation.id, worker.id
                ));
            }
        }

        let pair_restrictions = self.pair_restrictions(worker.id, workstation.id);
        let capability = if self.check_capabilities {
            self.capabilities
                .as_ref()
                .map(|caps| caps.get(&(worker.id, workstation.id)).copied())
        } else {
            None
        };

        EligibilityCore::evaluate(
            worker,
            workstation,
            capability,
            &pair_restrictions,
            self.threshold_for(workstation),
            self.now,
        )
    }

    pub fn is_eligible(&self, worker: &Worker, workstation: &Workstation) -> bool {
        self.evaluate(worker, workstation).eligible
    }

    /// 仅检查限制是否阻断 (领导固定使用: 跳过评分与能力门槛)
    pub fn is_restricted(&self, worker: &Worker, workstation: &Workstation) -> bool {
        let pair_restrictions = self.pair_restrictions(worker.id, workstation.id);
        pair_restrictions.iter().any(|r| r.blocks_at(self.now))
    }

    /// 适配度评分 (不判定资格)
    pub fn suitability(&self, worker: &Worker, workstation: &Workstation, limited: bool) -> f64 {
        let capability = self
            .capabilities
            .as_ref()
            .and_then(|caps| caps.get(&(worker.id, workstation.id)).copied());
        EligibilityCore::suitability_score(
            capability,
            &self.weights,
            limited,
            self.limited_penalty_factor,
        )
    }

    fn threshold_for(&self, workstation: &Workstation) -> CapabilityThreshold {
        EligibilityCore::resolve_threshold(
            workstation,
            self.default_min_competency_level,
            self.default_require_certification,
        )
    }

    fn pair_restrictions(&self, worker_id: WorkerId, workstation_id: WorkstationId) -> Vec<&Restriction> {
        self.restrictions
            .get(&(worker_id, workstation_id))
            .map(|list| list.to_vec())
            .unwrap_or_default()
    }
}

// ==========================================
// CandidateScorer trait 实现
// ==========================================
impl CandidateScorer for EligibilityFilter<'_> {
    fn score(&self, worker: &Worker, workstation: &Workstation) -> Option<CandidateScore> {
        let decision = self.evaluate(worker, workstation);
        if !decision.eligible {
            return None;
        }
        Some(CandidateScore {
            suitability: self.suitability(worker, workstation, decision.limited),
            limited: decision.limited,
        })
    }
}
