// ==========================================
// 工位轮换排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、校验结果
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod capability;
pub mod session;
pub mod snapshot;
pub mod types;
pub mod validation;
pub mod worker;
pub mod workstation;

// 重导出核心类型
pub use capability::{Capability, Restriction};
pub use session::{RotationAssignment, RotationSession};
pub use snapshot::RotationSnapshot;
pub use types::{
    AssignmentSource, LeadershipType, RestrictionType, RotationHalf, RotationType,
    SessionStatus, Severity, WorkerId, WorkstationId,
};
pub use validation::{
    AutoFixAction, AutoFixOutcome, AutoFixResults, ValidationIssue, ValidationResults,
    ValidationSuggestion, ValidationWarning,
};
pub use worker::Worker;
pub use workstation::Workstation;
