// ==========================================
// 工位轮换排班系统 - 引擎层
// ==========================================
// 职责: 资格判定、分阶段分配、均衡轮换、配置校验
// 红线: 引擎只读快照, 所有判定必须输出原因
// ==========================================

pub mod balancer;
pub mod diagnostics;
pub mod eligibility;
pub mod eligibility_core;
pub mod error;
pub mod orchestrator;
pub mod priority;
pub mod station_filler;
pub mod validator;

// 重导出核心引擎
pub use balancer::{BalancedRotation, BalancedSchedule, EquitableBalancer};
pub use eligibility::EligibilityFilter;
pub use eligibility_core::{EligibilityCore, EligibilityDecision};
pub use error::{EngineError, EngineResult};
pub use orchestrator::{RotationOrchestrator, RotationOutcome, SkipReason, SkippedTrainingPair};
pub use priority::PrioritySorter;
pub use station_filler::{CandidatePool, CandidateScore, CandidateScorer, StationFiller, UnfilledStation};
pub use validator::{AssignmentMap, RotationValidator};
