use super::stats::{PilotTaskFacts, TaskStatistics};
use super::weights::PointsAllocation;
use crate::matcher::PilotKey;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PilotScore {
    pub pilot_key: PilotKey,
    pub leading: f64,
    pub speed: f64,
    pub distance: f64,
}

impl PilotScore {
    pub fn total(&self) -> f64 {
        self.leading + self.speed + self.distance
    }
}

#[inline(always)]
fn sane(points: f64) -> f64 {
    if points.is_finite() {
        points.max(0.0)
    } else {
        0.0
    }
}

/// Leading points from the pilot's leading coefficient `lc` against the field
/// minimum `lc_min`. Lower coefficients are better.
pub fn pilot_departure_leadout(lc: f64, lc_min: Option<f64>, available: f64) -> f64 {
    if lc.is_nan() || lc <= 0.0 {
        return 0.0;
    }
    let Some(lc_min) = lc_min else {
        return 0.0;
    };

    let points = if lc <= lc_min {
        available
    } else if lc_min <= 0.0 {
        warn!("Leading coefficient minimum is {} (expected > 0)", lc_min);
        0.0
    } else {
        let factor = 1.0 - ((lc - lc_min).powi(2) / lc_min.sqrt()).powf(1.0 / 3.0);
        available * factor
    };
    sane(points)
}

/// Speed points; only goal pilots with a speed-section time are eligible.
/// `fastest` is the fastest speed-section time of the task, seconds.
pub fn pilot_speed(facts: &PilotTaskFacts, fastest: Option<f64>, available: f64) -> f64 {
    let (Some(t_min), Some(t)) = (fastest, facts.time) else {
        return 0.0;
    };
    if !facts.goal || !t_min.is_finite() || t_min <= 0.0 {
        return 0.0;
    }

    let behind = (t - t_min).max(0.0) / 3600.0;
    let factor = 1.0 - (behind / (t_min / 3600.0).sqrt()).powf(5.0 / 6.0);
    if factor > 0.0 {
        sane(available * factor)
    } else {
        0.0
    }
}

pub fn pilot_distance(distance: f64, best_distance: f64, available: f64) -> f64 {
    if best_distance.is_nan() || best_distance <= 0.0 {
        return 0.0;
    }
    sane(available * (distance / best_distance).min(1.0))
}

pub fn score_pilot(
    facts: &PilotTaskFacts,
    stats: &TaskStatistics,
    allocation: &PointsAllocation,
) -> PilotScore {
    PilotScore {
        pilot_key: facts.pilot_key,
        leading: pilot_departure_leadout(
            facts.leading_coefficient,
            stats.min_leading_coefficient,
            allocation.leading,
        ),
        speed: pilot_speed(facts, stats.fastest, allocation.speed),
        distance: pilot_distance(facts.distance, stats.best_distance, allocation.distance),
    }
}
