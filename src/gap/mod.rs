pub mod points;
pub mod stats;
pub mod validity;
pub mod weights;

pub use self::points::PilotScore;
pub use self::stats::{PilotTaskFacts, TaskStatistics};
pub use self::validity::ValidityResult;
pub use self::weights::{PointsAllocation, PointsWeights};

use crate::config::FormulaConstants;
use crate::error::GapResult;
use crate::flight::PilotResult;
use crate::task::TaskInfo;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::info;

/// Scoring outcome for one task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskScore {
    pub task_id: u32,
    pub statistics: TaskStatistics,
    pub validity: ValidityResult,
    pub day_quality: f64,
    pub weights: PointsWeights,
    pub allocation: PointsAllocation,
    /// Sorted by total points, best first.
    pub pilots: Vec<PilotScore>,
}

pub struct TaskScorer {
    pub formula: FormulaConstants,
}

impl TaskScorer {
    pub fn new(formula: FormulaConstants) -> Self {
        Self { formula }
    }

    /// Aggregates `results` and scores the task. Fails only when the totals
    /// cannot be produced; nothing is partially scored in that case.
    pub fn score(&self, task: &TaskInfo, results: &[PilotResult]) -> GapResult<TaskScore> {
        let stats = stats::aggregate(task, self.formula.min_distance, results)?;
        let facts: Vec<PilotTaskFacts> = results.iter().map(PilotTaskFacts::from_result).collect();
        Ok(self.score_statistics(task, stats, &facts))
    }

    pub fn score_statistics(
        &self,
        task: &TaskInfo,
        stats: TaskStatistics,
        facts: &[PilotTaskFacts],
    ) -> TaskScore {
        if task.stopped {
            match self.formula.glide_bonus {
                Some(g) if self.formula.glide_bonus_enabled() => {
                    info!("Task {} stopped, glide bonus {}", task.id, g)
                }
                _ => info!("Task {} stopped, glide bonus disabled", task.id),
            }
        }

        let validity = validity::day_quality(task, &stats, &self.formula);
        let day_quality = weights::combine_day_quality(&validity);
        let weights = weights::points_weight(stats.goal_ratio());
        let allocation = weights::allocate(day_quality, &weights);

        let mut pilots: Vec<PilotScore> = facts
            .iter()
            .map(|f| points::score_pilot(f, &stats, &allocation))
            .collect();
        pilots.sort_by(|a, b| {
            b.total()
                .partial_cmp(&a.total())
                .unwrap_or(Ordering::Equal)
        });

        info!(
            "Task {} ({}): quality={:.4} available={:.1}",
            task.id,
            self.formula.version,
            day_quality,
            allocation.total()
        );

        TaskScore {
            task_id: task.id,
            statistics: stats,
            validity,
            day_quality,
            weights,
            allocation,
            pilots,
        }
    }
}
