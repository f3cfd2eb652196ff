// ==========================================
// 工位轮换排班系统 - 配置层
// ==========================================
// 职责: 轮换配置加载与读取接口
// ==========================================

pub mod error;
pub mod rotation_config;
pub mod rotation_config_trait;

// 重导出核心配置
pub use error::{ConfigError, ConfigResult};
pub use rotation_config::{RotationConfig, SuitabilityWeights};
pub use rotation_config_trait::RotationConfigReader;
