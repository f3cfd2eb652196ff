// ==========================================
// 工位轮换排班系统 - 领域类型定义
// ==========================================
// 职责: 领域枚举 (领导类型/限制类型/会话状态/轮换类型/严重级别)
// 序列化格式: SCREAMING_SNAKE_CASE (与持久化层一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 员工 ID (由持久化层分配)
pub type WorkerId = i64;

/// 工位 ID (由持久化层分配)
pub type WorkstationId = i64;

// ==========================================
// 领导类型 (Leadership Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadershipType {
    Both,       // 全班次
    FirstHalf,  // 仅前半班
    SecondHalf, // 仅后半班
}

impl LeadershipType {
    /// 判断该领导类型在指定半班是否生效
    pub fn applies_to(&self, half: RotationHalf) -> bool {
        match self {
            LeadershipType::Both => true,
            LeadershipType::FirstHalf => half == RotationHalf::First,
            LeadershipType::SecondHalf => half == RotationHalf::Second,
        }
    }
}

impl Default for LeadershipType {
    fn default() -> Self {
        LeadershipType::Both
    }
}

impl fmt::Display for LeadershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadershipType::Both => write!(f, "BOTH"),
            LeadershipType::FirstHalf => write!(f, "FIRST_HALF"),
            LeadershipType::SecondHalf => write!(f, "SECOND_HALF"),
        }
    }
}

// ==========================================
// 半班 (Rotation Half)
// ==========================================
// 生成轮换时指定当前生成的是哪个半班
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RotationHalf {
    First,
    Second,
}

impl fmt::Display for RotationHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationHalf::First => write!(f, "FIRST"),
            RotationHalf::Second => write!(f, "SECOND"),
        }
    }
}

// ==========================================
// 限制类型 (Restriction Type)
// ==========================================
// PROHIBITED / 未过期 TEMPORARY: 硬阻断
// LIMITED: 允许但降权
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestrictionType {
    Prohibited,
    Limited,
    Temporary,
}

impl fmt::Display for RestrictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestrictionType::Prohibited => write!(f, "PROHIBITED"),
            RestrictionType::Limited => write!(f, "LIMITED"),
            RestrictionType::Temporary => write!(f, "TEMPORARY"),
        }
    }
}

// ==========================================
// 会话状态 (Session Status)
// ==========================================
// DRAFT → ACTIVE → COMPLETED / CANCELLED (终态)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Cancelled)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Draft => write!(f, "DRAFT"),
            SessionStatus::Active => write!(f, "ACTIVE"),
            SessionStatus::Completed => write!(f, "COMPLETED"),
            SessionStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// ==========================================
// 轮换类型 (Rotation Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RotationType {
    Current, // 本轮
    Next,    // 下一轮 (预计算)
}

impl fmt::Display for RotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationType::Current => write!(f, "CURRENT"),
            RotationType::Next => write!(f, "NEXT"),
        }
    }
}

// ==========================================
// 分配来源 (Assignment Source)
// ==========================================
// 红线: 每条分配必须能解释其来源阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentSource {
    Leader,          // 阶段1: 领导固定
    TrainingPair,    // 阶段2: 师徒配对
    PriorityStation, // 阶段3: 优先工位填充
    NormalStation,   // 阶段4: 普通工位填充
    Balanced,        // 均衡轮换
}

impl AssignmentSource {
    /// 分配优先级 (1=高 … 5=低)
    pub fn base_priority(&self) -> u8 {
        match self {
            AssignmentSource::Leader => 1,
            AssignmentSource::TrainingPair => 2,
            AssignmentSource::PriorityStation => 2,
            AssignmentSource::NormalStation => 3,
            AssignmentSource::Balanced => 3,
        }
    }
}

impl fmt::Display for AssignmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentSource::Leader => write!(f, "LEADER"),
            AssignmentSource::TrainingPair => write!(f, "TRAINING_PAIR"),
            AssignmentSource::PriorityStation => write!(f, "PRIORITY_STATION"),
            AssignmentSource::NormalStation => write!(f, "NORMAL_STATION"),
            AssignmentSource::Balanced => write!(f, "BALANCED"),
        }
    }
}

// ==========================================
// 严重级别 (Severity)
// ==========================================
// 顺序: Low < Medium < High < Critical
// CRITICAL 阻断生成, 其余为建议性
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leadership_type_applies_to_half() {
        assert!(LeadershipType::Both.applies_to(RotationHalf::First));
        assert!(LeadershipType::Both.applies_to(RotationHalf::Second));
        assert!(LeadershipType::FirstHalf.applies_to(RotationHalf::First));
        assert!(!LeadershipType::FirstHalf.applies_to(RotationHalf::Second));
        assert!(!LeadershipType::SecondHalf.applies_to(RotationHalf::First));
        assert!(LeadershipType::SecondHalf.applies_to(RotationHalf::Second));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_serde_screaming_snake_case() {
        let json = serde_json::to_string(&LeadershipType::FirstHalf).unwrap();
        assert_eq!(json, "\"FIRST_HALF\"");

        let parsed: RestrictionType = serde_json::from_str("\"TEMPORARY\"").unwrap();
        assert_eq!(parsed, RestrictionType::Temporary);
    }
}
