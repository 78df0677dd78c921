use super::stats::TaskStatistics;
use crate::config::FormulaConstants;
use crate::task::TaskInfo;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidityResult {
    pub launch: f64,
    pub distance: f64,
    pub time: f64,
    /// Absent unless the task was stopped.
    pub stopped: Option<f64>,
}

impl ValidityResult {
    pub fn stopped_factor(&self) -> f64 {
        self.stopped.unwrap_or(1.0)
    }
}

#[inline(always)]
fn unit(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// LVR = min(1, launched / (present * nomLaunch)).
pub fn launch_validity(stats: &TaskStatistics, formula: &FormulaConstants) -> f64 {
    let denom = stats.pilots_present as f64 * formula.nom_launch;
    if denom <= 0.0 {
        warn!("Launch validity: no pilots present or nominal launch <= 0");
        return 0.0;
    }
    let lvr = (stats.launched as f64 / denom).min(1.0);
    let launch = formula.launch_linear_coefficient * lvr + 2.917 * lvr.powi(2)
        - 1.944 * lvr.powi(3);
    debug!("LVR={:.4} launch={:.4}", lvr, launch);
    unit(launch)
}

pub fn distance_validity(stats: &TaskStatistics, formula: &FormulaConstants) -> f64 {
    if stats.launched == 0 {
        return 0.0;
    }
    let nom_goal = formula.nom_goal;
    let best_over_nom = stats.best_distance - formula.nom_distance;
    let nom_dist_area = ((nom_goal + 1.0) * (formula.nom_distance - formula.min_distance)
        + (nom_goal * best_over_nom).max(0.0))
        / 2.0;
    if nom_dist_area <= 0.0 {
        warn!(
            "Distance validity: nominal distance area is {:.1}, check formula '{}'",
            nom_dist_area, formula.version
        );
        return 0.0;
    }
    let dvr = stats.distance_over_min / (stats.launched as f64 * nom_dist_area);
    debug!("NomDistArea={:.1} DVR={:.4}", nom_dist_area, dvr);
    unit(dvr.min(1.0))
}

pub fn time_validity(stats: &TaskStatistics, formula: &FormulaConstants) -> f64 {
    let tvr = match stats.fastest {
        Some(fastest) if stats.ess > 0 => ratio_or_full(fastest, formula.nom_time),
        _ => ratio_or_full(stats.best_distance, formula.nom_distance),
    };
    let time = -0.271 + 2.912 * tvr - 2.098 * tvr.powi(2) + 0.457 * tvr.powi(3);
    debug!("TVR={:.4} time={:.4}", tvr, time);
    unit(time)
}

// min(1, value / nominal); a missing nominal never penalizes the day.
fn ratio_or_full(value: f64, nominal: f64) -> f64 {
    if nominal <= 0.0 {
        1.0
    } else {
        (value / nominal).clamp(0.0, 1.0)
    }
}

/// Stopped-task validity. `ess_distance` is launch-to-ESS distance in metres.
pub fn stopped_validity(stats: &TaskStatistics, ess_distance: f64) -> f64 {
    if stats.fastest.is_some_and(|t| t.is_finite() && t > 0.0) {
        return 1.0;
    }
    if stats.launched == 0 {
        return 0.0;
    }
    let launched = stats.launched as f64;
    let avg = stats.average_distance();
    let best = stats.best_distance;

    let spread = (best - avg) / (ess_distance - best + 1.0) * (stats.distance_stddev / 5.0).sqrt();
    let landed = stats.landed_before_stop.unwrap_or(0) as f64;
    let stopv = spread.max(0.0).sqrt() + (landed / launched).powi(3);
    unit(stopv.min(1.0))
}

/// All validities for the day, with the two documented floors.
pub fn day_quality(
    task: &TaskInfo,
    stats: &TaskStatistics,
    formula: &FormulaConstants,
) -> ValidityResult {
    if !task.launch_valid {
        info!("Task {}: launch invalid, day quality set to 0", task.id);
        return ValidityResult {
            launch: 0.0,
            distance: 0.0,
            time: 0.0,
            stopped: None,
        };
    }

    if stats.pilots_present == 0 {
        warn!("Task {}: no pilots present", task.id);
        return ValidityResult {
            launch: 0.0,
            distance: 0.0,
            time: 0.1,
            stopped: None,
        };
    }

    let stopped = task
        .stopped
        .then(|| stopped_validity(stats, task.ess_distance));

    ValidityResult {
        launch: launch_validity(stats, formula),
        distance: distance_validity(stats, formula),
        time: time_validity(stats, formula),
        stopped,
    }
}
