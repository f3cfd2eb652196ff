// ==========================================
// 工位轮换排班系统 - 轮换配置读取 Trait
// ==========================================
// 职责: 定义引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::rotation_config::SuitabilityWeights;

// ==========================================
// RotationConfigReader Trait
// ==========================================
// 实现者: RotationConfig（JSON 加载）
pub trait RotationConfigReader: Send + Sync {
    // ===== 适配度评分 =====

    /// 获取适配度权重
    ///
    /// # 默认值
    /// - competency=0.5, certification=0.3, leadership=0.1, training=0.1
    fn suitability_weights(&self) -> SuitabilityWeights;

    /// LIMITED 限制的适配度系数
    ///
    /// # 默认值
    /// - 0.5
    fn limited_penalty_factor(&self) -> f64;

    // ===== 能力门槛 =====

    /// 全局最低能力等级（None: 任意有效能力记录即可）
    fn default_min_competency_level(&self) -> Option<u8>;

    /// 全局是否要求认证
    fn require_certification(&self) -> bool;

    // ===== 校验阈值 =====

    /// 低可用率警告阈值
    ///
    /// # 默认值
    /// - 50
    fn low_availability_threshold(&self) -> u8;

    /// 超大工位警告阈值
    ///
    /// # 默认值
    /// - 10
    fn oversized_station_threshold(&self) -> u32;

    // ===== 领导固定 =====

    /// 领导固定是否允许超出工位需求人数
    ///
    /// # 默认值
    /// - true（领导连续性优先）
    fn leader_can_exceed_capacity(&self) -> bool;
}
