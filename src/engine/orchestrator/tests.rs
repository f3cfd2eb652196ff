use super::{RotationOrchestrator, SkipReason};
use crate::config::RotationConfig;
use crate::domain::capability::Restriction;
use crate::domain::session::RotationSession;
use crate::domain::snapshot::RotationSnapshot;
use crate::domain::types::{
    AssignmentSource, LeadershipType, RestrictionType, RotationHalf, RotationType,
    SessionStatus, Severity,
};
use crate::domain::worker::Worker;
use crate::domain::workstation::Workstation;
use crate::engine::diagnostics::codes;
use crate::engine::error::EngineError;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

// ==========================================
// 测试辅助函数
// ==========================================

fn orchestrator() -> RotationOrchestrator<RotationConfig> {
    RotationOrchestrator::new(Arc::new(RotationConfig::default()))
}

fn workers(n: i64) -> Vec<Worker> {
    (1..=n).map(|id| Worker::new(id, format!("W{}", id))).collect()
}

fn leader(id: i64, workstation_id: i64) -> Worker {
    let mut w = Worker::new(id, format!("L{}", id));
    w.is_leader = true;
    w.leader_workstation_id = Some(workstation_id);
    w
}

fn trainer(id: i64) -> Worker {
    let mut w = Worker::new(id, format!("T{}", id));
    w.is_trainer = true;
    w
}

fn trainee(id: i64, trainer_id: i64, workstation_id: i64) -> Worker {
    let mut w = Worker::new(id, format!("S{}", id));
    w.is_trainee = true;
    w.trainer_id = Some(trainer_id);
    w.training_workstation_id = Some(workstation_id);
    w
}

fn priority_station(id: i64, required: u32) -> Workstation {
    let mut s = Workstation::new(id, format!("P{}", id), required);
    s.is_priority = true;
    s
}

fn session() -> RotationSession {
    RotationSession::new("早班轮换", Utc::now())
}

// ==========================================
// 基础场景
// ==========================================

#[test]
fn test_three_workers_one_station() {
    let snapshot = RotationSnapshot::new(workers(3), vec![Workstation::new(10, "装配", 2)]);

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    let current: Vec<i64> = outcome
        .assignments_of(RotationType::Current)
        .iter()
        .map(|a| a.worker_id)
        .collect();
    assert_eq!(current, vec![1, 2]);
    assert!(outcome
        .assignments_of(RotationType::Current)
        .iter()
        .all(|a| a.source == AssignmentSource::NormalStation && a.priority == 3));
    assert!(outcome.unfilled.is_empty());
    assert!(outcome.issues.is_empty());
    assert_eq!(outcome.session.status, SessionStatus::Active);
    assert_eq!(outcome.session.current_assignments, 2);
    assert_eq!(outcome.session.next_assignments, 2);
}

#[test]
fn test_worker_assigned_at_most_once_per_rotation_type() {
    let snapshot = RotationSnapshot::new(
        workers(5),
        vec![
            priority_station(10, 2),
            Workstation::new(11, "包装", 2),
            Workstation::new(12, "质检", 3),
        ],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    for rotation_type in [RotationType::Current, RotationType::Next] {
        let mut seen = HashSet::new();
        for a in outcome.assignments_of(rotation_type) {
            assert!(seen.insert(a.worker_id), "worker {} assigned twice", a.worker_id);
        }
        assert_eq!(seen.len(), 5);
    }
    for station in &snapshot.workstations {
        assert!(outcome.seated_count(station.id, RotationType::Current) <= station.required_workers as usize);
    }
}

#[test]
fn test_priority_station_staffed_first() {
    let snapshot = RotationSnapshot::new(
        workers(1),
        vec![Workstation::new(10, "普通", 1), priority_station(20, 1)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    let a = outcome.assignment_for(1, RotationType::Current).unwrap();
    assert_eq!(a.workstation_id, 20);
    assert_eq!(a.source, AssignmentSource::PriorityStation);
    assert_eq!(a.priority, 2);

    let understaffed: Vec<_> = outcome
        .issues
        .iter()
        .filter(|i| i.id == codes::STATION_UNDERSTAFFED)
        .collect();
    // CURRENT 与 NEXT 各一次
    assert_eq!(understaffed.len(), 2);
    assert!(understaffed.iter().all(|i| i.severity == Severity::Medium));
    assert!(understaffed.iter().all(|i| i.affected_workstations == vec![10]));
}

#[test]
fn test_restricted_worker_not_placed() {
    let snapshot = RotationSnapshot::new(workers(2), vec![Workstation::new(10, "装配", 2)])
        .with_restrictions(vec![Restriction::new(1, 10, RestrictionType::Prohibited)]);

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    assert!(outcome.assignment_for(1, RotationType::Current).is_none());
    assert_eq!(outcome.seated_count(10, RotationType::Current), 1);
    assert_eq!(outcome.unfilled.len(), 2);
}

// ==========================================
// 领导固定
// ==========================================

#[test]
fn test_leader_pinned_to_station() {
    let mut staff = workers(2);
    staff.push(leader(3, 10));
    let snapshot = RotationSnapshot::new(
        staff,
        vec![Workstation::new(10, "装配", 1), Workstation::new(11, "包装", 1)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    let pinned = outcome.assignment_for(3, RotationType::Current).unwrap();
    assert_eq!(pinned.workstation_id, 10);
    assert_eq!(pinned.source, AssignmentSource::Leader);
    assert_eq!(pinned.priority, 1);
    assert_eq!(outcome.seated_count(10, RotationType::Current), 1);
    assert_eq!(outcome.assignment_for(1, RotationType::Current).unwrap().workstation_id, 11);
    assert_eq!(outcome.session.leader_assignments, 1);
}

#[test]
fn test_leader_pinned_without_capability_record() {
    let snapshot = RotationSnapshot::new(vec![leader(1, 10)], vec![Workstation::new(10, "装配", 1)])
        .with_capabilities(vec![]);

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    let pinned = outcome.assignment_for(1, RotationType::Current).unwrap();
    assert_eq!(pinned.source, AssignmentSource::Leader);
    // NEXT 不重新固定, 无能力记录则无法普通填充
    assert!(outcome.assignment_for(1, RotationType::Next).is_none());
}

#[test]
fn test_leader_blocked_by_restriction() {
    let snapshot = RotationSnapshot::new(vec![leader(1, 10)], vec![Workstation::new(10, "装配", 1)])
        .with_restrictions(vec![Restriction::new(1, 10, RestrictionType::Prohibited)]);

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    assert!(outcome.assignment_for(1, RotationType::Current).is_none());
    assert!(outcome.issues.iter().any(|i| i.id == codes::LEADER_RESTRICTED));
}

#[test]
fn test_leader_overflow_pins_all_and_reports_once() {
    let snapshot = RotationSnapshot::new(
        vec![leader(1, 10), leader(2, 10), leader(3, 10)],
        vec![Workstation::new(10, "装配", 1)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    assert_eq!(outcome.seated_count(10, RotationType::Current), 3);
    let conflicts: Vec<_> = outcome
        .issues
        .iter()
        .filter(|i| i.id == codes::LEADER_CAPACITY_CONFLICT)
        .collect();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].severity, Severity::High);
    assert_eq!(conflicts[0].affected_workers, vec![2, 3]);
}

#[test]
fn test_leader_overflow_disabled_by_config() {
    let config = RotationConfig {
        leader_can_exceed_capacity: false,
        ..RotationConfig::default()
    };
    let orchestrator = RotationOrchestrator::new(Arc::new(config));
    let snapshot = RotationSnapshot::new(
        vec![leader(1, 10), leader(2, 10)],
        vec![Workstation::new(10, "装配", 1)],
    );

    let outcome = orchestrator
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    assert_eq!(outcome.seated_count(10, RotationType::Current), 1);
    assert_eq!(outcome.assignment_for(1, RotationType::Current).unwrap().source, AssignmentSource::Leader);
    assert!(outcome.assignment_for(2, RotationType::Current).is_none());
    assert!(outcome.issues.iter().any(|i| i.id == codes::LEADER_CAPACITY_CONFLICT));
}

#[test]
fn test_half_specific_leader() {
    let mut first_half = leader(1, 10);
    first_half.leadership_type = LeadershipType::FirstHalf;
    let snapshot = RotationSnapshot::new(
        vec![first_half],
        vec![Workstation::new(10, "装配", 1), Workstation::new(11, "包装", 1)],
    );

    let first = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();
    assert_eq!(first.assignment_for(1, RotationType::Current).unwrap().source, AssignmentSource::Leader);

    let second = orchestrator()
        .generate(session(), &snapshot, RotationHalf::Second, Utc::now())
        .unwrap();
    let a = second.assignment_for(1, RotationType::Current).unwrap();
    assert_eq!(a.source, AssignmentSource::NormalStation);
}

#[test]
fn test_orphaned_leader_reported() {
    let snapshot = RotationSnapshot::new(
        vec![leader(1, 99), Worker::new(2, "W2")],
        vec![Workstation::new(10, "装配", 2)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    let issue = outcome
        .issues
        .iter()
        .find(|i| i.id == codes::ORPHANED_LEADER)
        .unwrap();
    assert!(issue.auto_fix_available);
    // 领导仍可参与普通填充
    assert_eq!(outcome.seated_count(10, RotationType::Current), 2);
}

// ==========================================
// 师徒配对
// ==========================================

#[test]
fn test_training_pair_co_located() {
    let snapshot = RotationSnapshot::new(
        vec![trainer(1), trainee(2, 1, 11), Worker::new(3, "W3")],
        vec![Workstation::new(10, "装配", 1), Workstation::new(11, "焊接", 2)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    for id in [1, 2] {
        let a = outcome.assignment_for(id, RotationType::Current).unwrap();
        assert_eq!(a.workstation_id, 11);
        assert_eq!(a.source, AssignmentSource::TrainingPair);
        assert_eq!(a.priority, 2);
    }
    assert_eq!(outcome.assignment_for(3, RotationType::Current).unwrap().workstation_id, 10);
    assert!(outcome.skipped_pairs.is_empty());
    assert_eq!(outcome.session.training_assignments, 2);
}

#[test]
fn test_training_pair_skipped_atomically_when_station_full() {
    let snapshot = RotationSnapshot::new(
        vec![trainer(1), trainee(2, 1, 11)],
        vec![Workstation::new(11, "焊接", 1)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    assert!(outcome
        .assignments
        .iter()
        .all(|a| a.source != AssignmentSource::TrainingPair));
    assert_eq!(outcome.skipped_pairs.len(), 1);
    assert_eq!(
        outcome.skipped_pairs[0].reason,
        SkipReason::StationFull { seated: 0, required: 1 }
    );
    // 容量跳过不产生问题
    assert!(outcome.issues.is_empty());
    // 普通填充仍占满工位
    assert_eq!(outcome.seated_count(11, RotationType::Current), 1);
}

#[test]
fn test_inactive_trainer_falls_back_to_pool() {
    let mut idle_trainer = trainer(1);
    idle_trainer.is_active = false;
    let snapshot = RotationSnapshot::new(
        vec![idle_trainer, trainee(2, 1, 11)],
        vec![Workstation::new(11, "焊接", 1)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    assert_eq!(
        outcome.skipped_pairs[0].reason,
        SkipReason::TrainerInactive { trainer_id: 1 }
    );
    assert!(outcome.issues.iter().any(|i| i.id == codes::ORPHANED_TRAINEE));
    let a = outcome.assignment_for(2, RotationType::Current).unwrap();
    assert_eq!(a.source, AssignmentSource::NormalStation);
}

#[test]
fn test_missing_training_workstation_reported() {
    let snapshot = RotationSnapshot::new(
        vec![trainer(1), trainee(2, 1, 77)],
        vec![Workstation::new(10, "装配", 2)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    assert_eq!(
        outcome.skipped_pairs[0].reason,
        SkipReason::WorkstationNotFound { workstation_id: 77 }
    );
    assert!(outcome.issues.iter().any(|i| i.id == codes::INVALID_TRAINING_WORKSTATION));
}

#[test]
fn test_trainer_reused_when_already_leading_same_station() {
    let mut lead_trainer = leader(1, 11);
    lead_trainer.is_trainer = true;
    let snapshot = RotationSnapshot::new(
        vec![lead_trainer, trainee(2, 1, 11)],
        vec![Workstation::new(11, "焊接", 2)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    assert_eq!(outcome.assignment_for(1, RotationType::Current).unwrap().source, AssignmentSource::Leader);
    assert_eq!(outcome.assignment_for(2, RotationType::Current).unwrap().source, AssignmentSource::TrainingPair);
    assert_eq!(outcome.seated_count(11, RotationType::Current), 2);
}

#[test]
fn test_trainer_pinned_elsewhere_is_unavailable() {
    let mut lead_trainer = leader(1, 10);
    lead_trainer.is_trainer = true;
    let snapshot = RotationSnapshot::new(
        vec![lead_trainer, trainee(2, 1, 11)],
        vec![Workstation::new(10, "装配", 1), Workstation::new(11, "焊接", 2)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    assert_eq!(
        outcome.skipped_pairs[0].reason,
        SkipReason::TrainerUnavailable { trainer_id: 1 }
    );
}

// ==========================================
// 结构性问题与会话状态
// ==========================================

#[test]
fn test_no_active_workers_is_critical() {
    let mut staff = workers(2);
    for w in &mut staff {
        w.is_active = false;
    }
    let snapshot = RotationSnapshot::new(staff, vec![Workstation::new(10, "装配", 1)]);

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    assert!(outcome.assignments.is_empty());
    assert!(outcome.is_blocked());
    assert_eq!(outcome.issues.len(), 1);
    assert_eq!(outcome.issues[0].id, codes::NO_ACTIVE_WORKERS);
    assert_eq!(outcome.session.status, SessionStatus::Draft);
}

#[test]
fn test_empty_snapshot_reports_both_structural_issues() {
    let outcome = orchestrator()
        .generate(session(), &RotationSnapshot::default(), RotationHalf::First, Utc::now())
        .unwrap();

    assert!(outcome.assignments.is_empty());
    assert_eq!(outcome.issues.len(), 2);
    assert!(outcome.issues.iter().all(|i| i.severity == Severity::Critical));
}

#[test]
fn test_closed_session_rejected() {
    let mut closed = session();
    closed.cancel(Utc::now()).unwrap();
    let snapshot = RotationSnapshot::new(workers(1), vec![Workstation::new(10, "装配", 1)]);

    let err = orchestrator()
        .generate(closed, &snapshot, RotationHalf::First, Utc::now())
        .unwrap_err();
    assert!(matches!(err, EngineError::SessionClosed { .. }));
}

#[test]
fn test_active_session_can_regenerate() {
    let snapshot = RotationSnapshot::new(workers(2), vec![Workstation::new(10, "装配", 2)]);
    let orchestrator = orchestrator();

    let first = orchestrator
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();
    let second = orchestrator
        .generate(first.session.clone(), &snapshot, RotationHalf::Second, Utc::now())
        .unwrap();

    assert_eq!(second.session.id, first.session.id);
    assert_eq!(second.session.status, SessionStatus::Active);
}

// ==========================================
// 确定性与下一轮
// ==========================================

#[test]
fn test_generation_is_deterministic() {
    let mut staff = workers(6);
    staff[2].rotations_in_current_station = 3;
    staff.push(leader(7, 12));
    let snapshot = RotationSnapshot::new(
        staff,
        vec![
            Workstation::new(12, "质检", 2),
            priority_station(10, 2),
            Workstation::new(11, "包装", 2),
        ],
    );
    let orchestrator = orchestrator();
    let base = session();

    let key = |o: &super::RotationOutcome| {
        o.assignments
            .iter()
            .map(|a| (a.worker_id, a.workstation_id, a.rotation_type, a.source))
            .collect::<Vec<_>>()
    };

    let a = orchestrator
        .generate(base.clone(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();
    let b = orchestrator
        .generate(base, &snapshot, RotationHalf::First, Utc::now())
        .unwrap();
    assert_eq!(key(&a), key(&b));
}

#[test]
fn test_next_rotation_uses_full_pool() {
    let snapshot = RotationSnapshot::new(
        vec![leader(1, 10), Worker::new(2, "W2")],
        vec![Workstation::new(10, "装配", 1), Workstation::new(11, "包装", 1)],
    );

    let outcome = orchestrator()
        .generate(session(), &snapshot, RotationHalf::First, Utc::now())
        .unwrap();

    let next = outcome.assignments_of(RotationType::Next);
    assert_eq!(next.len(), 2);
    assert!(next.iter().all(|a| a.source != AssignmentSource::Leader));
    assert!(next.iter().all(|a| a.session_id == outcome.session.id));
}
