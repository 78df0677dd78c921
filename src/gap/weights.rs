use super::validity::ValidityResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const TOTAL_POINTS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointsWeights {
    pub distance: f64,
    pub speed: f64,
    pub leading: f64,
    pub arrival: f64,
}

/// Points available in each category for one task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PointsAllocation {
    pub distance: f64,
    pub speed: f64,
    pub leading: f64,
    /// No arrival points in this formula version.
    pub arrival: f64,
}

impl PointsAllocation {
    pub fn total(&self) -> f64 {
        self.distance + self.speed + self.leading + self.arrival
    }
}

/// Day quality: product of the validities (stopped counts as 1 when absent).
pub fn combine_day_quality(v: &ValidityResult) -> f64 {
    let q = v.launch * v.distance * v.time * v.stopped_factor();
    if q.is_finite() {
        q.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn points_weight(goal_ratio: f64) -> PointsWeights {
    let x = goal_ratio;
    let distance = 0.9 - 1.665 * x + 1.713 * x.powi(2) - 0.587 * x.powi(3);
    if !(0.0..=1.0).contains(&distance) {
        warn!(
            "Degenerate goal ratio {:.4}: distance weight {:.4} outside [0,1]",
            x, distance
        );
    }
    let leading = (1.0 - distance) / 8.0 * 1.4;
    let speed = 1.0 - distance - leading;
    PointsWeights {
        distance,
        speed,
        leading,
        arrival: 0.0,
    }
}

/// Splits `1000 * quality` across the categories. Speed takes the residual so the
/// parts always add up to the total.
pub fn allocate(quality: f64, weights: &PointsWeights) -> PointsAllocation {
    let total = TOTAL_POINTS * quality;
    let distance = total * weights.distance;
    let leading = total * weights.leading;
    let arrival = total * weights.arrival;
    let speed = total - distance - leading - arrival;

    debug!(
        "Available points: dist={:.1} speed={:.1} lead={:.1} arrival={:.1}",
        distance, speed, leading, arrival
    );

    PointsAllocation {
        distance,
        speed,
        leading,
        arrival,
    }
}
