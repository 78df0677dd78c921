use crate::error::{GapResult, StoreError};
use crate::flight::PilotResult;
use crate::import::types::TrackAssignment;
use crate::matcher::{PilotCandidate, PilotKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for pilots, imported tracks and validated results.
pub trait ResultStore {
    fn registered_pilots(&self, comp_id: u32) -> StoreResult<Vec<PilotCandidate>>;

    /// Registered pilots without a track for the task.
    fn unscored_pilots(&self, comp_id: u32, task_id: u32) -> StoreResult<Vec<PilotCandidate>>;

    fn has_track(&self, task_id: u32, pilot: PilotKey) -> StoreResult<bool>;

    fn save_track(&mut self, task_id: u32, assignment: &TrackAssignment) -> StoreResult<()>;

    /// Drops a track record, used to undo a half-finished import.
    fn remove_track(&mut self, task_id: u32, pilot: PilotKey) -> StoreResult<()>;

    fn save_result(&mut self, task_id: u32, result: PilotResult) -> StoreResult<()>;

    fn task_results(&self, task_id: u32) -> StoreResult<Vec<PilotResult>>;
}

/// Single-competition store kept in memory, optionally snapshotted to JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemoryStore {
    pub pilots: Vec<PilotCandidate>,
    pub tracks: BTreeMap<u32, BTreeMap<PilotKey, TrackAssignment>>,
    pub results: BTreeMap<u32, BTreeMap<PilotKey, PilotResult>>,
}

impl MemoryStore {
    pub fn with_pilots(pilots: Vec<PilotCandidate>) -> Self {
        Self {
            pilots,
            ..Default::default()
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GapResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GapResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn is_registered(&self, pilot: PilotKey) -> bool {
        self.pilots.iter().any(|p| p.key == pilot)
    }
}

impl ResultStore for MemoryStore {
    fn registered_pilots(&self, _comp_id: u32) -> StoreResult<Vec<PilotCandidate>> {
        Ok(self.pilots.clone())
    }

    fn unscored_pilots(&self, _comp_id: u32, task_id: u32) -> StoreResult<Vec<PilotCandidate>> {
        let tracks = self.tracks.get(&task_id);
        Ok(self
            .pilots
            .iter()
            .filter(|p| tracks.map_or(true, |t| !t.contains_key(&p.key)))
            .cloned()
            .collect())
    }

    fn has_track(&self, task_id: u32, pilot: PilotKey) -> StoreResult<bool> {
        Ok(self
            .tracks
            .get(&task_id)
            .is_some_and(|t| t.contains_key(&pilot)))
    }

    fn save_track(&mut self, task_id: u32, assignment: &TrackAssignment) -> StoreResult<()> {
        if !self.is_registered(assignment.pilot_key) {
            return Err(StoreError::Integrity(format!(
                "pilot {} is not registered",
                assignment.pilot_key
            )));
        }
        let tracks = self.tracks.entry(task_id).or_default();
        if tracks.contains_key(&assignment.pilot_key) {
            return Err(StoreError::Integrity(format!(
                "pilot {} already has a track for task {}",
                assignment.pilot_key, task_id
            )));
        }
        tracks.insert(assignment.pilot_key, assignment.clone());
        Ok(())
    }

    fn remove_track(&mut self, task_id: u32, pilot: PilotKey) -> StoreResult<()> {
        if let Some(tracks) = self.tracks.get_mut(&task_id) {
            tracks.remove(&pilot);
            if tracks.is_empty() {
                self.tracks.remove(&task_id);
            }
        }
        Ok(())
    }

    fn save_result(&mut self, task_id: u32, result: PilotResult) -> StoreResult<()> {
        if !self.is_registered(result.pilot_key) {
            return Err(StoreError::Integrity(format!(
                "pilot {} is not registered",
                result.pilot_key
            )));
        }
        self.results
            .entry(task_id)
            .or_default()
            .insert(result.pilot_key, result);
        Ok(())
    }

    fn task_results(&self, task_id: u32) -> StoreResult<Vec<PilotResult>> {
        Ok(self
            .results
            .get(&task_id)
            .map(|r| r.values().cloned().collect())
            .unwrap_or_default())
    }
}
