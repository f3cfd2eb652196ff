// ==========================================
// 工位轮换排班系统 - 能力与限制领域模型
// ==========================================
// 职责: 员工×工位 的能力记录与限制记录
// ==========================================

use crate::domain::types::{RestrictionType, WorkerId, WorkstationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Capability - 员工工位能力
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub worker_id: WorkerId,
    pub workstation_id: WorkstationId,
    pub competency_level: u8, // 1-5
    #[serde(default)]
    pub is_certified: bool,
    #[serde(default)]
    pub can_be_leader: bool,
    #[serde(default)]
    pub can_train: bool,
    pub is_active: bool,
}

impl Capability {
    pub fn new(worker_id: WorkerId, workstation_id: WorkstationId, competency_level: u8) -> Self {
        Self {
            worker_id,
            workstation_id,
            competency_level,
            is_certified: false,
            can_be_leader: false,
            can_train: false,
            is_active: true,
        }
    }

    /// 能力分量 (level / 5, 限制在 [0.2, 1.0])
    pub fn competency_ratio(&self) -> f64 {
        f64::from(self.competency_level.clamp(1, 5)) / 5.0
    }
}

// ==========================================
// Restriction - 员工工位限制
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restriction {
    pub worker_id: WorkerId,
    pub workstation_id: WorkstationId,
    pub restriction_type: RestrictionType,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Restriction {
    pub fn new(
        worker_id: WorkerId,
        workstation_id: WorkstationId,
        restriction_type: RestrictionType,
    ) -> Self {
        Self {
            worker_id,
            workstation_id,
            restriction_type,
            expires_at: None,
            is_active: true,
            reason: None,
        }
    }

    /// 该限制在 now 时刻是否构成硬阻断
    ///
    /// # 规则
    /// - PROHIBITED → 阻断
    /// - TEMPORARY 且 expires_at > now 或未设置过期时间 → 阻断
    /// - LIMITED / 已过期 TEMPORARY / 未启用 → 不阻断
    pub fn blocks_at(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        match self.restriction_type {
            RestrictionType::Prohibited => true,
            RestrictionType::Temporary => self.expires_at.map_or(true, |exp| exp > now),
            RestrictionType::Limited => false,
        }
    }

    /// 是否为生效中的 LIMITED 限制 (允许但降权)
    pub fn is_limiting(&self) -> bool {
        self.is_active && self.restriction_type == RestrictionType::Limited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_temporary_restriction_expiry() {
        let now = Utc::now();
        let mut restriction = Restriction::new(1, 10, RestrictionType::Temporary);

        // 无过期时间视为长期
        assert!(restriction.blocks_at(now));

        restriction.expires_at = Some(now + Duration::hours(2));
        assert!(restriction.blocks_at(now));

        restriction.expires_at = Some(now - Duration::hours(2));
        assert!(!restriction.blocks_at(now));
    }

    #[test]
    fn test_limited_never_blocks() {
        let restriction = Restriction::new(1, 10, RestrictionType::Limited);
        assert!(!restriction.blocks_at(Utc::now()));
        assert!(restriction.is_limiting());
    }

    #[test]
    fn test_inactive_prohibited_does_not_block() {
        let mut restriction = Restriction::new(1, 10, RestrictionType::Prohibited);
        restriction.is_active = false;
        assert!(!restriction.blocks_at(Utc::now()));
    }

    #[test]
    fn test_competency_ratio_clamped() {
        assert_eq!(Capability::new(1, 1, 5).competency_ratio(), 1.0);
        assert_eq!(Capability::new(1, 1, 0).competency_ratio(), 0.2);
        assert_eq!(Capability::new(1, 1, 9).competency_ratio(), 1.0);
    }
}
