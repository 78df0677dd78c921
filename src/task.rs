use crate::error::GapResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One competition task (day) as seen by import and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub id: u32,
    pub comp_id: u32,
    pub date: NaiveDate,
    /// Folder that receives imported track copies.
    pub target_dir: PathBuf,
    #[serde(default)]
    pub airspace_check: bool,
    #[serde(default = "default_true")]
    pub launch_valid: bool,
    #[serde(default)]
    pub stopped: bool,
    /// Distance from launch to end of speed section, metres.
    #[serde(default)]
    pub ess_distance: f64,
}

fn default_true() -> bool {
    true
}

impl TaskInfo {
    pub fn new(id: u32, date: NaiveDate, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            id,
            comp_id: 0,
            date,
            target_dir: target_dir.into(),
            airspace_check: false,
            launch_valid: true,
            stopped: false,
            ess_distance: 0.0,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GapResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
