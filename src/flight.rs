use crate::matcher::PilotKey;
use serde::{Deserialize, Serialize};

/// Pilot status on the day. Absent pilots do not count as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PilotStatus {
    Absent,
    /// Present on take-off but did not fly.
    Dnf,
    Flown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointAchieved {
    pub name: String,
    /// Seconds since midnight, task local time.
    pub time: f64,
    pub altitude: f64,
}

/// What the external flight validation reports for one track.
///
/// Times are seconds since midnight, distances metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightResult {
    pub distance_flown: f64,
    pub best_waypoint_achieved: Option<String>,
    pub waypoints_achieved: Vec<WaypointAchieved>,
    pub sss_time: Option<f64>,
    pub real_start_time: Option<f64>,
    pub ess_time: Option<f64>,
    pub ess_altitude: Option<f64>,
    pub flight_time: f64,
    pub goal_reached: bool,
    pub leading_coefficient: f64,
    pub landed_before_stop: bool,
}

impl FlightResult {
    /// Speed-section time: ESS crossing minus the pilot's start.
    pub fn speed_section_time(&self) -> Option<f64> {
        let ess = self.ess_time?;
        let start = self.real_start_time.or(self.sss_time)?;
        let t = ess - start;
        (t.is_finite() && t > 0.0).then_some(t)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PilotResult {
    pub pilot_key: PilotKey,
    pub status: PilotStatus,
    #[serde(default)]
    pub flight: Option<FlightResult>,
}

impl PilotResult {
    pub fn flown(pilot_key: PilotKey, flight: FlightResult) -> Self {
        Self {
            pilot_key,
            status: PilotStatus::Flown,
            flight: Some(flight),
        }
    }

    pub fn flight(&self) -> Option<&FlightResult> {
        match self.status {
            PilotStatus::Flown => self.flight.as_ref(),
            _ => None,
        }
    }
}
