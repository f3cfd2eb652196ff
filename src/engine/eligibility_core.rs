// ==========================================
// 工位轮换排班系统 - Eligibility Core 纯函数库
// ==========================================
// 职责: 提供资格判定、限制判定、能力门槛与适配度评分的纯逻辑
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::config::SuitabilityWeights;
use crate::domain::capability::{Capability, Restriction};
use crate::domain::types::RestrictionType;
use crate::domain::worker::Worker;
use crate::domain::workstation::Workstation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// CapabilityThreshold - 工位能力门槛
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapabilityThreshold {
    pub min_competency_level: Option<u8>,
    pub requires_certification: bool,
}

// ==========================================
// EligibilityDecision - 资格判定结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub eligible: bool,
    /// 存在 LIMITED 限制 (允许但降权)
    pub limited: bool,
    pub reasons: Vec<String>,
}

impl EligibilityDecision {
    pub fn blocked(reason: String) -> Self {
        Self {
            eligible: false,
            limited: false,
            reasons: vec![reason],
        }
    }
}

// ==========================================
// RestrictionCheck - 限制判定结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestrictionCheck {
    Clear,
    Limited,
    Blocked(String),
}

// ==========================================
// EligibilityCore - 纯函数工具类
// ==========================================
pub struct EligibilityCore;

impl EligibilityCore {
    /// 资格判定（默认门槛: 任意有效能力记录即可）
    ///
    /// # 参数
    /// - worker / workstation: 员工与工位
    /// - capabilities: 能力记录 (None: 未提供, 跳过能力检查)
    /// - restrictions: 限制记录 (会按员工×工位过滤)
    /// - now: 判定时刻 (用于 TEMPORARY 过期判断)
    pub fn is_eligible(
        worker: &Worker,
        workstation: &Workstation,
        capabilities: Option<&[Capability]>,
        restrictions: &[Restriction],
        now: DateTime<Utc>,
    ) -> bool {
        let capability = capabilities.map(|caps| Self::find_capability(caps, worker, workstation));
        let pair_restrictions: Vec<&Restriction> = restrictions
            .iter()
            .filter(|r| r.worker_id == worker.id && r.workstation_id == workstation.id)
            .collect();

        Self::evaluate(
            worker,
            workstation,
            capability,
            &pair_restrictions,
            CapabilityThreshold::default(),
            now,
        )
        .eligible
    }

    /// 完整资格判定
    ///
    /// # 规则
    /// 1. 员工或工位未启用 → 不合格
    /// 2. PROHIBITED / 未过期 TEMPORARY → 不合格
    /// 3. 提供能力记录时: 需有效能力记录且满足门槛
    /// 4. LIMITED → 合格但标记降权
    ///
    /// # 参数
    /// - capability: None=未提供能力数据; Some(None)=已提供但无记录
    /// - restrictions: 已按员工×工位过滤的限制
    pub fn evaluate(
        worker: &Worker,
        workstation: &Workstation,
        capability: Option<Option<&Capability>>,
        restrictions: &[&Restriction],
        threshold: CapabilityThreshold,
        now: DateTime<Utc>,
    ) -> EligibilityDecision {
        // 规则 1: 启用状态
        if let Some(reason) = Self::check_activity(worker, workstation) {
            return EligibilityDecision::blocked(reason);
        }

        // 规则 2: 限制
        let limited = match Self::check_restrictions(restrictions, now) {
            RestrictionCheck::Blocked(reason) => return EligibilityDecision::blocked(reason),
            RestrictionCheck::Limited => true,
            RestrictionCheck::Clear => false,
        };

        // 规则 3: 能力门槛
        if let Some(capability) = capability {
            if let Err(reason) = Self::check_capability(capability, threshold) {
                return EligibilityDecision::blocked(reason);
            }
        }

        let mut reasons = Vec::new();
        if limited {
            reasons.push(format!(
                "LIMITED: worker_id={}, workstation_id={}",
                worker.id, workstation.id
            ));
        }
        reasons.push("ELIGIBLE".to_string());

        EligibilityDecision {
            eligible: true,
            limited,
            reasons,
        }
    }

    /// 启用状态检查
    pub fn check_activity(worker: &Worker, workstation: &Workstation) -> Option<String> {
        if !worker.is_active {
            return Some(format!("WORKER_INACTIVE: worker_id={}", worker.id));
        }
        if !workstation.is_active {
            return Some(format!("WORKSTATION_INACTIVE: workstation_id={}", workstation.id));
        }
        None
    }

    /// 限制检查（阻断优先于 LIMITED）
    pub fn check_restrictions(restrictions: &[&Restriction], now: DateTime<Utc>) -> RestrictionCheck {
        if let Some(blocking) = restrictions.iter().find(|r| r.blocks_at(now)) {
            let reason = match blocking.restriction_type {
                RestrictionType::Temporary => match blocking.expires_at {
                    Some(expires_at) => format!("RESTRICTED_TEMPORARY: expires_at={}", expires_at),
                    None => "RESTRICTED_TEMPORARY: no expiry".to_string(),
                },
                other => format!("RESTRICTED_{}", other),
            };
            return RestrictionCheck::Blocked(reason);
        }

        if restrictions.iter().any(|r| r.is_limiting()) {
            RestrictionCheck::Limited
        } else {
            RestrictionCheck::Clear
        }
    }

    /// 能力门槛检查
    pub fn check_capability(
        capability: Option<&Capability>,
        threshold: CapabilityThreshold,
    ) -> Result<(), String> {
        let capability = match capability {
            Some(c) if c.is_active => c,
            _ => return Err("NO_CAPABILITY: no active capability record".to_string()),
        };

        if let Some(min_level) = threshold.min_competency_level {
            if capability.competency_level < min_level {
                return Err(format!(
                    "COMPETENCY_TOO_LOW: level={} < required={}",
                    capability.competency_level, min_level
                ));
            }
        }

        if threshold.requires_certification && !capability.is_certified {
            return Err("NOT_CERTIFIED: certification required".to_string());
        }

        Ok(())
    }

    /// 解析工位门槛（工位设置优先, 否则取全局配置）
    pub fn resolve_threshold(
        workstation: &Workstation,
        default_min_competency_level: Option<u8>,
        default_require_certification: bool,
    ) -> CapabilityThreshold {
        CapabilityThreshold {
            min_competency_level: workstation
                .min_competency_level
                .or(default_min_competency_level),
            requires_certification: workstation
                .requires_certification
                .unwrap_or(default_require_certification),
        }
    }

    /// 适配度评分 [0, 1]
    ///
    /// # 规则
    /// - score = (w_c·level/5 + w_cert·certified + w_lead·can_be_leader + w_train·can_train) / Σw
    /// - 无能力记录 → 0.0
    /// - LIMITED → score × penalty_factor
    pub fn suitability_score(
        capability: Option<&Capability>,
        weights: &SuitabilityWeights,
        limited: bool,
        penalty_factor: f64,
    ) -> f64 {
        let capability = match capability {
            Some(c) if c.is_active => c,
            _ => return 0.0,
        };

        let total = weights.competency + weights.certification + weights.leadership + weights.training;
        if total <= 0.0 {
            return 0.0;
        }

        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let raw = weights.competency * capability.competency_ratio()
            + weights.certification * flag(capability.is_certified)
            + weights.leadership * flag(capability.can_be_leader)
            + weights.training * flag(capability.can_train);

        let score = (raw / total).clamp(0.0, 1.0);
        if limited {
            (score * penalty_factor).clamp(0.0, 1.0)
        } else {
            score
        }
    }

    /// 在能力列表中查找员工×工位的记录
    pub fn find_capability<'a>(
        capabilities: &'a [Capability],
        worker: &Worker,
        workstation: &Workstation,
    ) -> Option<&'a Capability> {
        capabilities
            .iter()
            .find(|c| c.worker_id == worker.id && c.workstation_id == workstation.id && c.is_active)
    }
}
