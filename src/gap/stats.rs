use crate::error::{GapError, GapResult};
use crate::flight::{PilotResult, PilotStatus};
use crate::matcher::PilotKey;
use crate::task::TaskInfo;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Task-wide totals over all pilot results. Distances in metres, times in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistics {
    pub pilots_present: u32,
    pub launched: u32,
    pub ess: u32,
    pub goal: u32,

    pub total_distance: f64,
    pub distance_stddev: f64,
    pub distance_over_min: f64,
    pub best_distance: f64,

    /// Fastest speed-section time, any ESS finisher.
    pub fastest: Option<f64>,
    pub fastest_in_goal: Option<f64>,

    pub first_start: Option<f64>,
    pub last_start: Option<f64>,
    pub first_ess: Option<f64>,
    pub last_ess: Option<f64>,

    /// Only filled for stopped tasks.
    pub landed_before_stop: Option<u32>,
    /// Smallest positive leading coefficient in the field.
    pub min_leading_coefficient: Option<f64>,
}

impl TaskStatistics {
    pub fn average_distance(&self) -> f64 {
        if self.launched == 0 {
            0.0
        } else {
            self.total_distance / self.launched as f64
        }
    }

    pub fn goal_ratio(&self) -> f64 {
        if self.launched == 0 {
            0.0
        } else {
            self.goal as f64 / self.launched as f64
        }
    }
}

/// Per-pilot inputs to the points functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PilotTaskFacts {
    pub pilot_key: PilotKey,
    pub leading_coefficient: f64,
    /// Speed-section time when the pilot reached ESS.
    pub time: Option<f64>,
    pub goal: bool,
    pub distance: f64,
}

impl PilotTaskFacts {
    pub fn from_result(result: &PilotResult) -> Self {
        match result.flight() {
            Some(f) => Self {
                pilot_key: result.pilot_key,
                leading_coefficient: f.leading_coefficient,
                time: f.speed_section_time(),
                goal: f.goal_reached,
                distance: f.distance_flown.max(0.0),
            },
            None => Self {
                pilot_key: result.pilot_key,
                leading_coefficient: 0.0,
                time: None,
                goal: false,
                distance: 0.0,
            },
        }
    }
}

fn fold_min(acc: Option<f64>, v: f64) -> Option<f64> {
    Some(acc.map_or(v, |a| a.min(v)))
}

fn fold_max(acc: Option<f64>, v: f64) -> Option<f64> {
    Some(acc.map_or(v, |a| a.max(v)))
}

/// Aggregates stored results into task totals.
///
/// An empty result list means the totals cannot be produced at all, which is
/// different from a day where every pilot was absent.
pub fn aggregate(
    task: &TaskInfo,
    min_distance: f64,
    results: &[PilotResult],
) -> GapResult<TaskStatistics> {
    if results.is_empty() {
        return Err(GapError::AggregationUnavailable {
            task_id: task.id,
            reason: "no pilot results recorded".to_string(),
        });
    }

    let mut s = TaskStatistics::default();
    let mut distances = Vec::new();
    let mut landed = 0;

    for r in results {
        if r.status != PilotStatus::Absent {
            s.pilots_present += 1;
        }
        let Some(f) = r.flight() else { continue };

        s.launched += 1;
        let d = f.distance_flown.max(0.0);
        distances.push(d);
        s.total_distance += d;
        s.distance_over_min += (d - min_distance).max(0.0);
        s.best_distance = s.best_distance.max(d);

        if let Some(start) = f.real_start_time {
            s.first_start = fold_min(s.first_start, start);
            s.last_start = fold_max(s.last_start, start);
        }
        if let Some(ess) = f.ess_time {
            s.ess += 1;
            s.first_ess = fold_min(s.first_ess, ess);
            s.last_ess = fold_max(s.last_ess, ess);
        }
        if let Some(t) = f.speed_section_time() {
            s.fastest = fold_min(s.fastest, t);
            if f.goal_reached {
                s.fastest_in_goal = fold_min(s.fastest_in_goal, t);
            }
        }
        if f.goal_reached {
            s.goal += 1;
        }
        if f.leading_coefficient > 0.0 {
            s.min_leading_coefficient = fold_min(s.min_leading_coefficient, f.leading_coefficient);
        }
        if f.landed_before_stop {
            landed += 1;
        }
    }

    if !distances.is_empty() {
        let mean = s.total_distance / distances.len() as f64;
        let var = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / distances.len() as f64;
        s.distance_stddev = var.sqrt();
    }

    if task.stopped {
        s.landed_before_stop = Some(landed);
    }

    debug!(
        "Task {} totals: present={} launched={} ess={} goal={} best={:.0}m",
        task.id, s.pilots_present, s.launched, s.ess, s.goal, s.best_distance
    );

    Ok(s)
}
