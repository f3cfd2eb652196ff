// ==========================================
// 工位轮换排班系统 - 候选排序引擎
// ==========================================
// 职责: 同一工位的候选员工排序
// 输入: 已评分的候选员工列表
// 输出: 排序后的候选员工列表
// ==========================================

use crate::domain::worker::Worker;
use crate::engine::station_filler::CandidateScore;
use std::cmp::Ordering;

// ==========================================
// RankedCandidate - 已评分候选
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct RankedCandidate<'a> {
    pub worker: &'a Worker,
    pub score: CandidateScore,
}

// ==========================================
// PrioritySorter - 候选排序引擎
// ==========================================
pub struct PrioritySorter {
    // 无状态引擎,不需要注入依赖
}

impl PrioritySorter {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 排序候选列表
    ///
    /// 排序键:
    /// 1) suitability 降序 (适配度高者优先)
    /// 2) limited 升序 (受限员工排在同适配度的非受限员工之后)
    /// 3) rotations_in_current_station 升序 (久留同一工位者优先轮出)
    /// 4) worker_id 升序 (确定性兜底)
    ///
    /// # 返回
    /// 排序后的候选列表（按优先级从高到低）
    pub fn sort<'a>(&self, mut candidates: Vec<RankedCandidate<'a>>) -> Vec<RankedCandidate<'a>> {
        candidates.sort_by(|a, b| self.compare(a, b));
        candidates
    }

    /// 比较两个候选的优先级
    ///
    /// # 返回
    /// Ordering::Less 表示 a 优先于 b
    pub fn compare(&self, a: &RankedCandidate<'_>, b: &RankedCandidate<'_>) -> Ordering {
        // 1. 适配度 (降序)
        match b.score.suitability.total_cmp(&a.score.suitability) {
            Ordering::Equal => {}
            other => return other,
        }

        // 2. 受限标记 (非受限优先)
        match a.score.limited.cmp(&b.score.limited) {
            Ordering::Equal => {}
            other => return other,
        }

        // 3. 当前工位轮换次数 (升序)
        match a
            .worker
            .rotations_in_current_station
            .cmp(&b.worker.rotations_in_current_station)
        {
            Ordering::Equal => {}
            other => return other,
        }

        // 4. 员工 ID (升序)
        a.worker.id.cmp(&b.worker.id)
    }
}

impl Default for PrioritySorter {
    fn default() -> Self {
        Self::new()
    }
}
