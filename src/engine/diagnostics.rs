// ==========================================
// 工位轮换排班系统 - 诊断问题目录
// ==========================================
// 职责: 编排器与校验器共用的问题编码与构造函数
// 红线: 所有问题必须输出明确原因
// ==========================================

use crate::domain::types::{RotationType, Severity, WorkerId, WorkstationId};
use crate::domain::validation::{
    AutoFixAction, ValidationIssue, ValidationSuggestion, ValidationWarning,
};
use crate::domain::worker::Worker;
use crate::domain::workstation::Workstation;

// ==========================================
// 问题编码
// ==========================================
pub mod codes {
    // ===== 结构性 (CRITICAL) =====
    pub const NO_ACTIVE_WORKERS: &str = "NO_ACTIVE_WORKERS";
    pub const NO_ACTIVE_WORKSTATIONS: &str = "NO_ACTIVE_WORKSTATIONS";

    // ===== 引用性 (HIGH) =====
    pub const ORPHANED_LEADER: &str = "ORPHANED_LEADER";
    pub const LEADER_RESTRICTED: &str = "LEADER_RESTRICTED";
    pub const LEADER_CAPACITY_CONFLICT: &str = "LEADER_CAPACITY_CONFLICT";
    pub const LEADER_STATION_CONFLICT: &str = "LEADER_STATION_CONFLICT";
    pub const ORPHANED_TRAINEE: &str = "ORPHANED_TRAINEE";
    pub const INVALID_TRAINING_WORKSTATION: &str = "INVALID_TRAINING_WORKSTATION";

    // ===== 产能 =====
    pub const INSUFFICIENT_CAPACITY: &str = "INSUFFICIENT_CAPACITY";
    pub const STATION_WITHOUT_ELIGIBLE_WORKERS: &str = "STATION_WITHOUT_ELIGIBLE_WORKERS";
    pub const STATION_UNDERSTAFFED: &str = "STATION_UNDERSTAFFED";
    pub const INVALID_REQUIRED_WORKERS: &str = "INVALID_REQUIRED_WORKERS";

    // ===== 生成后审计 =====
    pub const DUPLICATE_ASSIGNMENT: &str = "DUPLICATE_ASSIGNMENT";
    pub const CAPACITY_EXCEEDED: &str = "CAPACITY_EXCEEDED";
    pub const LEADER_NOT_AT_STATION: &str = "LEADER_NOT_AT_STATION";
    pub const TRAINING_PAIR_SPLIT: &str = "TRAINING_PAIR_SPLIT";

    // ===== 警告 =====
    pub const DUPLICATE_WORKER_NAME: &str = "DUPLICATE_WORKER_NAME";
    pub const DUPLICATE_WORKSTATION_NAME: &str = "DUPLICATE_WORKSTATION_NAME";
    pub const LOW_AVAILABILITY: &str = "LOW_AVAILABILITY";
    pub const OVERSIZED_WORKSTATION: &str = "OVERSIZED_WORKSTATION";
    pub const WORKER_WITHOUT_STATIONS: &str = "WORKER_WITHOUT_STATIONS";

    // ===== 建议 =====
    pub const UNUSED_TRAINER: &str = "UNUSED_TRAINER";
    pub const STATION_WITHOUT_LEADER: &str = "STATION_WITHOUT_LEADER";
    pub const NO_BACKUP_WORKERS: &str = "NO_BACKUP_WORKERS";
}

// ==========================================
// 结构性问题
// ==========================================

/// 无在岗员工 (若存在停用员工, 可自动启用第一个)
pub fn no_active_workers(workers: &[Worker]) -> ValidationIssue {
    let issue = ValidationIssue::new(
        codes::NO_ACTIVE_WORKERS,
        Severity::Critical,
        "没有在岗员工",
        format!("系统中共 {} 名员工, 均未启用, 无法生成轮换", workers.len()),
    );

    match workers.iter().filter(|w| !w.is_active).min_by_key(|w| w.id) {
        Some(first) => issue
            .with_fix(
                format!("启用第一个可用员工: {} (ID {})", first.name, first.id),
                AutoFixAction::ActivateWorker { worker_id: first.id },
            )
            .with_workers(vec![first.id]),
        None => issue,
    }
}

/// 无启用工位 (若存在停用工位, 可自动启用第一个)
pub fn no_active_workstations(workstations: &[Workstation]) -> ValidationIssue {
    let issue = ValidationIssue::new(
        codes::NO_ACTIVE_WORKSTATIONS,
        Severity::Critical,
        "没有启用的工位",
        format!("系统中共 {} 个工位, 均未启用, 无法生成轮换", workstations.len()),
    );

    match workstations.iter().filter(|s| !s.is_active).min_by_key(|s| s.id) {
        Some(first) => issue
            .with_fix(
                format!("启用第一个可用工位: {} (ID {})", first.name, first.id),
                AutoFixAction::ActivateWorkstation {
                    workstation_id: first.id,
                },
            )
            .with_workstations(vec![first.id]),
        None => issue,
    }
}

// ==========================================
// 引用性问题
// ==========================================

/// 领导未指向有效工位
pub fn orphaned_leader(leader: &Worker, detail: &str) -> ValidationIssue {
    let mut issue = ValidationIssue::new(
        codes::ORPHANED_LEADER,
        Severity::High,
        "领导工位无效",
        format!("领导 {} (ID {}) {}", leader.name, leader.id, detail),
    )
    .with_fix(
        format!("取消 {} 的领导指定", leader.name),
        AutoFixAction::ClearLeaderAssignment {
            worker_id: leader.id,
        },
    )
    .with_workers(vec![leader.id]);

    if let Some(ws) = leader.leader_workstation_id {
        issue.affected_workstations = vec![ws];
    }
    issue
}

/// 领导被限制在其领导工位
pub fn leader_restricted(leader: &Worker, workstation: &Workstation) -> ValidationIssue {
    ValidationIssue::new(
        codes::LEADER_RESTRICTED,
        Severity::High,
        "领导被限制在领导工位",
        format!(
            "领导 {} (ID {}) 在工位 {} (ID {}) 存在生效限制, 本轮不固定",
            leader.name, leader.id, workstation.name, workstation.id
        ),
    )
    .with_workers(vec![leader.id])
    .with_workstations(vec![workstation.id])
}

/// 领导固定超过工位需求人数
pub fn leader_capacity_conflict(
    workstation: &Workstation,
    leader_ids: Vec<WorkerId>,
    pinned: bool,
) -> ValidationIssue {
    let outcome = if pinned {
        "已超额固定以保证领导连续性"
    } else {
        "超出部分领导未固定"
    };
    ValidationIssue::new(
        codes::LEADER_CAPACITY_CONFLICT,
        Severity::High,
        "领导固定超出工位需求",
        format!(
            "工位 {} (ID {}) 需求 {} 人, 领导固定冲突: {}",
            workstation.name, workstation.id, workstation.required_workers, outcome
        ),
    )
    .with_workers(leader_ids)
    .with_workstations(vec![workstation.id])
}

/// 学徒的师傅无效
pub fn orphaned_trainee(trainee: &Worker, detail: &str) -> ValidationIssue {
    ValidationIssue::new(
        codes::ORPHANED_TRAINEE,
        Severity::High,
        "学徒的师傅无效",
        format!("学徒 {} (ID {}) {}", trainee.name, trainee.id, detail),
    )
    .with_fix(
        format!("解除 {} 的学徒关联", trainee.name),
        AutoFixAction::UnlinkTrainee {
            worker_id: trainee.id,
        },
    )
    .with_workers(vec![trainee.id])
}

/// 学徒的培训工位无效
pub fn invalid_training_workstation(trainee: &Worker, detail: &str) -> ValidationIssue {
    let mut issue = ValidationIssue::new(
        codes::INVALID_TRAINING_WORKSTATION,
        Severity::High,
        "培训工位无效",
        format!("学徒 {} (ID {}) {}", trainee.name, trainee.id, detail),
    )
    .with_workers(vec![trainee.id]);

    if let Some(ws) = trainee.training_workstation_id {
        issue.affected_workstations = vec![ws];
    }
    issue
}

// ==========================================
// 产能问题
// ==========================================

/// 工位未满员 (优先工位 HIGH, 普通工位 MEDIUM)
pub fn station_understaffed(
    workstation_id: WorkstationId,
    is_priority: bool,
    shortfall: u32,
    rotation_type: RotationType,
) -> ValidationIssue {
    let severity = if is_priority {
        Severity::High
    } else {
        Severity::Medium
    };
    ValidationIssue::new(
        codes::STATION_UNDERSTAFFED,
        severity,
        "工位未满员",
        format!(
            "工位 ID {} 在 {} 轮换中缺员 {} 人",
            workstation_id, rotation_type, shortfall
        ),
    )
    .with_workstations(vec![workstation_id])
}

/// 同一工位的领导数超过需求人数
pub fn leader_station_conflict(
    workstation: &Workstation,
    leader_ids: Vec<WorkerId>,
    half_label: &str,
) -> ValidationIssue {
    ValidationIssue::new(
        codes::LEADER_STATION_CONFLICT,
        Severity::High,
        "工位领导过多",
        format!(
            "工位 {} (ID {}) 需求 {} 人, {}有 {} 名领导",
            workstation.name,
            workstation.id,
            workstation.required_workers,
            half_label,
            leader_ids.len()
        ),
    )
    .with_workers(leader_ids)
    .with_workstations(vec![workstation.id])
}

/// 在岗员工不足以满足全部工位需求
pub fn insufficient_capacity(active_workers: usize, required_total: u64) -> ValidationIssue {
    ValidationIssue::new(
        codes::INSUFFICIENT_CAPACITY,
        Severity::High,
        "在岗员工不足",
        format!(
            "在岗员工 {} 人, 启用工位共需 {} 人",
            active_workers, required_total
        ),
    )
}

/// 工位没有任何可分配员工 (优先工位 HIGH, 普通工位 MEDIUM)
pub fn station_without_eligible_workers(workstation: &Workstation) -> ValidationIssue {
    let severity = if workstation.is_priority {
        Severity::High
    } else {
        Severity::Medium
    };
    ValidationIssue::new(
        codes::STATION_WITHOUT_ELIGIBLE_WORKERS,
        severity,
        "工位无可分配员工",
        format!(
            "工位 {} (ID {}) 没有任何在岗员工可分配",
            workstation.name, workstation.id
        ),
    )
    .with_workstations(vec![workstation.id])
}

/// 启用工位需求人数为 0
pub fn invalid_required_workers(workstation: &Workstation) -> ValidationIssue {
    ValidationIssue::new(
        codes::INVALID_REQUIRED_WORKERS,
        Severity::Medium,
        "工位需求人数无效",
        format!(
            "工位 {} (ID {}) 已启用但需求人数为 {}",
            workstation.name, workstation.id, workstation.required_workers
        ),
    )
    .with_fix(
        format!("将 {} 的需求人数设为 1", workstation.name),
        AutoFixAction::SetRequiredWorkers {
            workstation_id: workstation.id,
            required_workers: 1,
        },
    )
    .with_workstations(vec![workstation.id])
}

// ==========================================
// 生成后审计问题
// ==========================================

/// 同一轮换类型下员工被重复分配
pub fn duplicate_assignment(
    worker_id: WorkerId,
    rotation_type: RotationType,
    workstations: Vec<WorkstationId>,
) -> ValidationIssue {
    ValidationIssue::new(
        codes::DUPLICATE_ASSIGNMENT,
        Severity::Critical,
        "员工重复分配",
        format!(
            "员工 ID {} 在 {} 轮换中被分配 {} 次",
            worker_id,
            rotation_type,
            workstations.len()
        ),
    )
    .with_workers(vec![worker_id])
    .with_workstations(workstations)
}

/// 非领导固定导致的工位超员
pub fn capacity_exceeded(
    workstation: &Workstation,
    seated: usize,
    rotation_type: RotationType,
) -> ValidationIssue {
    ValidationIssue::new(
        codes::CAPACITY_EXCEEDED,
        Severity::High,
        "工位超员",
        format!(
            "工位 {} (ID {}) 在 {} 轮换中在岗 {} 人, 需求 {} 人",
            workstation.name, workstation.id, rotation_type, seated, workstation.required_workers
        ),
    )
    .with_workstations(vec![workstation.id])
}

/// 领导未在其领导工位
pub fn leader_not_at_station(
    leader: &Worker,
    expected: WorkstationId,
    actual: WorkstationId,
) -> ValidationIssue {
    ValidationIssue::new(
        codes::LEADER_NOT_AT_STATION,
        Severity::High,
        "领导不在领导工位",
        format!(
            "领导 {} (ID {}) 应在工位 ID {}, 实际分配到工位 ID {}",
            leader.name, leader.id, expected, actual
        ),
    )
    .with_workers(vec![leader.id])
    .with_workstations(vec![expected, actual])
}

/// 师徒未在同一工位
pub fn training_pair_split(
    trainee: &Worker,
    trainer_id: WorkerId,
    trainee_station: WorkstationId,
    trainer_station: Option<WorkstationId>,
) -> ValidationIssue {
    let trainer_place = match trainer_station {
        Some(ws) => format!("工位 ID {}", ws),
        None => "未分配".to_string(),
    };
    ValidationIssue::new(
        codes::TRAINING_PAIR_SPLIT,
        Severity::High,
        "师徒未在同一工位",
        format!(
            "学徒 {} (ID {}) 在工位 ID {}, 师傅 ID {} {}",
            trainee.name, trainee.id, trainee_station, trainer_id, trainer_place
        ),
    )
    .with_workers(vec![trainee.id, trainer_id])
    .with_workstations(vec![trainee_station])
}

// ==========================================
// 警告与建议
// ==========================================

pub fn warning(
    id: &str,
    title: &str,
    description: String,
    affected_workers: Vec<WorkerId>,
    affected_workstations: Vec<WorkstationId>,
) -> ValidationWarning {
    ValidationWarning {
        id: id.to_string(),
        title: title.to_string(),
        description,
        affected_workers,
        affected_workstations,
    }
}

pub fn suggestion(
    id: &str,
    title: &str,
    description: String,
    affected_workers: Vec<WorkerId>,
    affected_workstations: Vec<WorkstationId>,
) -> ValidationSuggestion {
    ValidationSuggestion {
        id: id.to_string(),
        title: title.to_string(),
        description,
        affected_workers,
        affected_workstations,
    }
}
