// ==========================================
// 工位轮换排班系统 - 工位领域模型
// ==========================================
// 红线: 启用的工位 required_workers 必须 > 0
// ==========================================

use crate::domain::types::WorkstationId;
use serde::{Deserialize, Serialize};

// ==========================================
// Workstation - 工位
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workstation {
    pub id: WorkstationId,
    pub name: String,
    pub required_workers: u32,
    #[serde(default)]
    pub is_priority: bool,
    pub is_active: bool,

    // ===== 能力门槛 (可选, 覆盖全局配置) =====
    #[serde(default)]
    pub min_competency_level: Option<u8>,
    #[serde(default)]
    pub requires_certification: Option<bool>,
}

impl Workstation {
    pub fn new(id: WorkstationId, name: impl Into<String>, required_workers: u32) -> Self {
        Self {
            id,
            name: name.into(),
            required_workers,
            is_priority: false,
            is_active: true,
            min_competency_level: None,
            requires_certification: None,
        }
    }

    /// 是否为可参与排班的工位 (启用且需求人数 > 0)
    pub fn is_staffable(&self) -> bool {
        self.is_active && self.required_workers > 0
    }
}
