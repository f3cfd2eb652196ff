// ==========================================
// 工位轮换排班系统 - 轮换配置
// ==========================================
// 职责: 配置加载 (JSON 字符串/文件)、默认值、取值校验
// 存储: 由调用方提供的 JSON 配置
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::rotation_config_trait::RotationConfigReader;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

// ==========================================
// SuitabilityWeights - 适配度权重
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuitabilityWeights {
    pub competency: f64,
    pub certification: f64,
    pub leadership: f64,
    pub training: f64,
}

impl Default for SuitabilityWeights {
    fn default() -> Self {
        Self {
            competency: 0.5,
            certification: 0.3,
            leadership: 0.1,
            training: 0.1,
        }
    }
}

// ==========================================
// RotationConfig - 轮换配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// 适配度权重
    pub suitability_weights: SuitabilityWeights,

    /// LIMITED 限制的适配度系数 (0~1)
    pub limited_penalty_factor: f64,

    /// 全局最低能力等级 (工位未设置时使用; None = 任意能力记录即可)
    pub default_min_competency_level: Option<u8>,

    /// 全局是否要求认证 (工位未设置时使用)
    pub require_certification: bool,

    /// 可用率低于该值时给出警告 (百分比)
    pub low_availability_threshold: u8,

    /// 需求人数超过该值视为超大工位
    pub oversized_station_threshold: u32,

    /// 领导固定是否允许超过工位需求人数
    pub leader_can_exceed_capacity: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            suitability_weights: SuitabilityWeights::default(),
            limited_penalty_factor: 0.5,
            default_min_competency_level: None,
            require_certification: false,
            low_availability_threshold: 50,
            oversized_station_threshold: 10,
            leader_can_exceed_capacity: true,
        }
    }
}

impl RotationConfig {
    /// 从 JSON 字符串加载 (缺失字段取默认值)
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: RotationConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "加载轮换配置文件");
        Self::from_json_str(&raw)
    }

    /// 配置快照 (JSON)
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// 校验配置取值
    pub fn validate(&self) -> ConfigResult<()> {
        let w = &self.suitability_weights;
        for (key, value) in [
            ("suitability_weights.competency", w.competency),
            ("suitability_weights.certification", w.certification),
            ("suitability_weights.leadership", w.leadership),
            ("suitability_weights.training", w.training),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(key, format!("权重必须为非负有限数, 实际为 {}", value)));
            }
        }

        let total = w.competency + w.certification + w.leadership + w.training;
        if total <= 0.0 {
            return Err(invalid("suitability_weights", "权重之和必须大于 0"));
        }

        if !(0.0..=1.0).contains(&self.limited_penalty_factor) {
            return Err(invalid(
                "limited_penalty_factor",
                format!("必须在 [0, 1] 区间, 实际为 {}", self.limited_penalty_factor),
            ));
        }

        if let Some(level) = self.default_min_competency_level {
            if !(1..=5).contains(&level) {
                return Err(invalid(
                    "default_min_competency_level",
                    format!("必须在 1-5 之间, 实际为 {}", level),
                ));
            }
        }

        if self.low_availability_threshold > 100 {
            return Err(invalid(
                "low_availability_threshold",
                format!("必须在 0-100 之间, 实际为 {}", self.low_availability_threshold),
            ));
        }

        if self.oversized_station_threshold == 0 {
            return Err(invalid("oversized_station_threshold", "必须大于 0"));
        }

        Ok(())
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

// ==========================================
// RotationConfigReader trait 实现
// ==========================================
impl RotationConfigReader for RotationConfig {
    fn suitability_weights(&self) -> SuitabilityWeights {
        self.suitability_weights.clone()
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
