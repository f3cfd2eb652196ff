// ==========================================
// 工位轮换排班系统 - 校验结果领域模型
// ==========================================
// 职责: 问题/警告/建议 + 自动修复动作与结果
// 说明: 每次校验临时产生, 引擎不持久化
// ==========================================

use crate::domain::types::{Severity, WorkerId, WorkstationId};
use crate::domain::worker::Worker;
use crate::domain::workstation::Workstation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// AutoFixAction - 自动修复动作
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoFixAction {
    /// 启用员工
    ActivateWorker { worker_id: WorkerId },
    /// 启用工位
    ActivateWorkstation { workstation_id: WorkstationId },
    /// 取消领导指定
    ClearLeaderAssignment { worker_id: WorkerId },
    /// 解除学徒与师傅的关联
    UnlinkTrainee { worker_id: WorkerId },
    /// 修正工位需求人数
    SetRequiredWorkers {
        workstation_id: WorkstationId,
        required_workers: u32,
    },
}

// ==========================================
// ValidationIssue - 校验问题
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub auto_fix_available: bool,
    pub fix_description: Option<String>,
    pub fix_action: Option<AutoFixAction>,
    #[serde(default)]
    pub affected_workers: Vec<WorkerId>,
    #[serde(default)]
    pub affected_workstations: Vec<WorkstationId>,
}

impl ValidationIssue {
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            severity,
            auto_fix_available: false,
            fix_description: None,
            fix_action: None,
            affected_workers: Vec::new(),
            affected_workstations: Vec::new(),
        }
    }

    /// 附加自动修复动作
    pub fn with_fix(mut self, description: impl Into<String>, action: AutoFixAction) -> Self {
        self.auto_fix_available = true;
        self.fix_description = Some(description.into());
        self.fix_action = Some(action);
        self
    }

    pub fn with_workers(mut self, workers: Vec<WorkerId>) -> Self {
        self.affected_workers = workers;
        self
    }

    pub fn with_workstations(mut self, workstations: Vec<WorkstationId>) -> Self {
        self.affected_workstations = workstations;
        self
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

// ==========================================
// ValidationWarning / ValidationSuggestion
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub affected_workers: Vec<WorkerId>,
    #[serde(default)]
    pub affected_workstations: Vec<WorkstationId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSuggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub affected_workers: Vec<WorkerId>,
    #[serde(default)]
    pub affected_workstations: Vec<WorkstationId>,
}

// ==========================================
// ValidationResults - 校验结果汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResults {
    pub critical_issues: Vec<ValidationIssue>,
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationWarning>,
    pub suggestions: Vec<ValidationSuggestion>,
    pub validated_at: DateTime<Utc>,
}

impl ValidationResults {
    pub fn empty(validated_at: DateTime<Utc>) -> Self {
        Self {
            critical_issues: Vec::new(),
            issues: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
            validated_at,
        }
    }

    /// 按严重级别归入 critical_issues 或 issues
    pub fn push_issue(&mut self, issue: ValidationIssue) {
        if issue.is_critical() {
            self.critical_issues.push(issue);
        } else {
            self.issues.push(issue);
        }
    }

    /// 无 CRITICAL 问题即可生成
    pub fn is_valid(&self) -> bool {
        self.critical_issues.is_empty()
    }

    /// 全部问题 (CRITICAL 在前)
    pub fn all_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.critical_issues.iter().chain(self.issues.iter())
    }

    /// 可自动修复的问题
    pub fn fixable_issues(&self) -> Vec<ValidationIssue> {
        self.all_issues()
            .filter(|issue| issue.auto_fix_available)
            .cloned()
            .collect()
    }

    pub fn has_issue(&self, id: &str) -> bool {
        self.all_issues().any(|issue| issue.id == id)
    }

    pub fn has_warning(&self, id: &str) -> bool {
        self.warnings.iter().any(|w| w.id == id)
    }

    pub fn has_suggestion(&self, id: &str) -> bool {
        self.suggestions.iter().any(|s| s.id == id)
    }
}

// ==========================================
// AutoFixResults - 自动修复结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoFixOutcome {
    pub issue_id: String,
    pub success: bool,
    pub message: String,
}

/// 修复后的新快照 (原快照不变) + 逐项结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoFixResults {
    pub workers: Vec<Worker>,
    pub workstations: Vec<Workstation>,
    pub outcomes: Vec<AutoFixOutcome>,
}

impl AutoFixResults {
    pub fn fixed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }
}
