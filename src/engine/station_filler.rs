// ==========================================
// 工位轮换排班系统 - 工位填充引擎
// ==========================================
// 职责: 按调用方给定的工位顺序, 从候选池贪心填充至 required_workers
// 输入: 工位列表 + 候选池 + 评分器 + 已就座计数
// 输出: 分配列表 + 未满员工位
// ==========================================
// 红线: 同一候选池内员工至多分配一次; 不超过 required_workers
// ==========================================

use crate::domain::session::RotationAssignment;
use crate::domain::types::{AssignmentSource, RotationType, WorkerId, WorkstationId};
use crate::domain::worker::Worker;
use crate::domain::workstation::Workstation;
use crate::engine::priority::{PrioritySorter, RankedCandidate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};
use uuid::Uuid;

// ==========================================
// CandidateScore / CandidateScorer - 候选评分
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub suitability: f64,
    /// LIMITED 限制 (分配优先级降为 5)
    pub limited: bool,
}

/// 候选评分接口: None 表示不合格
pub trait CandidateScorer {
    fn score(&self, worker: &Worker, workstation: &Workstation) -> Option<CandidateScore>;
}

impl<F> CandidateScorer for F
where
    F: Fn(&Worker, &Workstation) -> Option<f64>,
{
    fn score(&self, worker: &Worker, workstation: &Workstation) -> Option<CandidateScore> {
        self(worker, workstation).map(|suitability| CandidateScore {
            suitability,
            limited: false,
        })
    }
}

// ==========================================
// CandidatePool - 候选池 (按 ID 有序, 保证确定性)
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CandidatePool<'a> {
    workers: BTreeMap<WorkerId, &'a Worker>,
}

impl<'a> CandidatePool<'a> {
    /// 由员工列表构建 (仅收录在岗员工)
    pub fn from_workers<I>(workers: I) -> Self
    where
        I: IntoIterator<Item = &'a Worker>,
    {
        Self {
            workers: workers
                .into_iter()
                .filter(|w| w.is_active)
                .map(|w| (w.id, w))
                .collect(),
        }
    }

    pub fn contains(&self, id: WorkerId) -> bool {
        self.workers.contains_key(&id)
    }

    pub fn remove(&mut self, id: WorkerId) -> Option<&'a Worker> {
        self.workers.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Worker> + '_ {
        self.workers.values().copied()
    }
}

// ==========================================
// UnfilledStation - 未满员工位
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfilledStation {
    pub workstation_id: WorkstationId,
    pub rotation_type: RotationType,
    pub is_priority: bool,
    pub required_workers: u32,
    pub assigned_workers: u32,
    pub shortfall: u32,
}

/// 填充结果
#[derive(Debug, Clone, Default)]
pub struct FillResult {
    pub assignments: Vec<RotationAssignment>,
    pub unfilled: Vec<UnfilledStation>,
}

// ==========================================
// StationFiller - 工位填充引擎
// ==========================================
pub struct StationFiller {
    sorter: PrioritySorter,
}

impl StationFiller {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            sorter: PrioritySorter::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 填充工位
    ///
    /// 规则：
    /// 1) 按传入顺序逐个工位处理 (优先/普通顺序由编排器负责)
    /// 2) 每个工位按 PrioritySorter 的排序键挑选候选, 直至满员或无合格候选
    /// 3) 已分配员工移出候选池
    /// 4) 未达 required_workers 的工位记入 unfilled (非错误)
    ///
    /// # 参数
    /// - `stations`: 待填充工位 (按处理顺序)
    /// - `pool`: 候选池（会被修改）
    /// - `scorer`: 候选评分器
    /// - `seated`: 各工位已就座人数（会被修改, 含前序阶段的固定）
    /// - `session_id`: 会话 ID
    /// - `rotation_type`: 轮换类型
    #[instrument(skip(self, stations, pool, scorer, seated), fields(
        stations_count = stations.len(),
        pool_size = pool.len(),
        rotation_type = %rotation_type
    ))]
    pub fn fill<S>(
        &self,
        stations: &[&Workstation],
        pool: &mut CandidatePool<'_>,
        scorer: &S,
        seated: &mut HashMap<WorkstationId, u32>,
        session_id: Uuid,
        rotation_type: RotationType,
    ) -> FillResult
    where
        S: CandidateScorer + ?Sized,
    {
        let mut result = FillResult::default();

        for station in stations {
            let already_seated = seated.get(&station.id).copied().unwrap_or(0);
            let needed = station.required_workers.saturating_sub(already_seated);
            let source = if station.is_priority {
                AssignmentSource::PriorityStation
            } else {
                AssignmentSource::NormalStation
            };

            let mut placed = 0u32;
            // 候选池耗尽后其余工位直接记入 unfilled
            if needed > 0 && !pool.is_empty() {
                let candidates: Vec<RankedCandidate<'_>> = pool
                    .iter()
                    .filter_map(|worker| {
                        scorer
                            .score(worker, station)
                            .map(|score| RankedCandidate { worker, score })
                    })
                    .collect();

                for candidate in self.sorter.sort(candidates).into_iter().take(needed as usize) {
                    result.assignments.push(
                        RotationAssignment::new(
                            candidate.worker.id,
                            station.id,
                            session_id,
                            rotation_type,
                            source,
                        )
                        .with_limited(candidate.score.limited),
                    );
                    pool.remove(candidate.worker.id);
                    placed += 1;
                }
            }

            let total_seated = already_seated + placed;
            seated.insert(station.id, total_seated);

            if total_seated < station.required_workers {
                result.unfilled.push(UnfilledStation {
                    workstation_id: station.id,
                    rotation_type,
                    is_priority: station.is_priority,
                    required_workers: station.required_workers,
                    assigned_workers: total_seated,
                    shortfall: station.required_workers - total_seated,
                });
            }

            debug!(
                workstation_id = station.id,
                placed,
                seated = total_seated,
                required = station.required_workers,
                "工位填充完成"
            );
        }

        result
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for StationFiller {
    fn default() -> Self {
        Self::new()
    }
}
