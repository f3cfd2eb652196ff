// ==========================================
// 工位轮换排班系统 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 轮换分配引擎 (持久化与展示由调用方负责)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配规则
pub mod engine;

// 配置层 - 轮换配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AssignmentSource, LeadershipType, RestrictionType, RotationHalf, RotationType,
    SessionStatus, Severity, WorkerId, WorkstationId,
};

// 领域实体
pub use domain::{
    Capability, Restriction, RotationAssignment, RotationSession, RotationSnapshot,
    ValidationIssue, ValidationResults, Worker, Workstation,
};

// 配置
pub use config::{RotationConfig, RotationConfigReader};

// 引擎
pub use engine::{
    EngineError, EngineResult, EquitableBalancer, RotationOrchestrator, RotationOutcome,
    RotationValidator,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工位轮换排班系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
