// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use workstation_rotation::config::{RotationConfigReader, SuitabilityWeights};

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub weights: SuitabilityWeights,
    pub limited_penalty_factor: f64,
    pub default_min_competency_level: Option<u8>,
    pub require_certification: bool,
    pub low_availability_threshold: u8,
    pub oversized_station_threshold: u32,
    pub leader_can_exceed_capacity: bool,
}

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            weights: SuitabilityWeights::default(),
            limited_penalty_factor: 0.5,
            default_min_competency_level: None,
            require_certification: false,
            low_availability_threshold: 50,
            oversized_station_threshold: 10,
            leader_can_exceed_capacity: true,
        }
    }

    /// 创建带全局能力门槛的配置
    pub fn with_min_competency(level: u8) -> Self {
        let mut config = Self::default();
        config.default_min_competency_level = Some(level);
        config
    }

    /// 创建要求认证的配置
    pub fn certified_only() -> Self {
        let mut config = Self::default();
        config.require_certification = true;
        config
    }

    /// 创建领导不可超额的配置
    pub fn strict_leader_capacity() -> Self {
        let mut config = Self::default();
        config.leader_can_exceed_capacity = false;
        config
    }
}

impl RotationConfigReader for MockConfig {
    fn suitability_weights(&self) -> SuitabilityWeights {
        self.weights.clone()
    }

    fn limited_penalty_factor(&self) -> f64 {
        self.limited_penalty_factor
    }

    fn default_min_competency_level(&self) -> Option<u8> {
        self.default_min_competency_level
    }

    fn require_certification(&self) -> bool {
        self.require_certification
    }

    fn low_availability_threshold(&self) -> u8 {
        self.low_availability_threshold
    }

    fn oversized_station_threshold(&self) -> u32 {
        self.oversized_station_threshold
    }

    fn leader_can_exceed_capacity(&self) -> bool {
        self.leader_can_exceed_capacity
    }
}
