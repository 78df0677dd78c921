use crate::matcher::{PilotKey, WorkingSet};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A track file bound to a pilot. Never changes once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackAssignment {
    pub pilot_key: PilotKey,
    pub source: PathBuf,
    /// Normalized filename of the copy, extension included.
    pub target_name: String,
    pub target: PathBuf,
}

/// The slice of a decoded track the import needs.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTrack {
    pub path: PathBuf,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GRecordStatus {
    Passed,
    Failed,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoPilotFound,
    AlreadyScored(PilotKey),
    WrongDate { track: NaiveDate, task: NaiveDate },
    NotDecodable(String),
    GRecordFailed(PilotKey),
    GRecordError(PilotKey),
    ValidationFailed(String),
    CopyFailed(String),
    Store(String),
    /// Every pilot already has a track; the file was not examined.
    NoPilotsRemaining,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoPilotFound => write!(f, "no pilot found"),
            SkipReason::AlreadyScored(k) => write!(f, "pilot {} already has a track", k),
            SkipReason::WrongDate { track, task } => {
                write!(f, "track date {} differs from task date {}", track, task)
            }
            SkipReason::NotDecodable(e) => write!(f, "not a valid track file: {}", e),
            SkipReason::GRecordFailed(k) => write!(f, "G-record not valid (pilot {})", k),
            SkipReason::GRecordError(k) => write!(f, "G-record check error (pilot {})", k),
            SkipReason::ValidationFailed(e) => write!(f, "flight validation failed: {}", e),
            SkipReason::CopyFailed(e) => write!(f, "copy to task folder failed: {}", e),
            SkipReason::Store(e) => write!(f, "store error: {}", e),
            SkipReason::NoPilotsRemaining => write!(f, "no unscored pilots left"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Imported(PilotKey),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileDiagnostic {
    pub source: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub assignments: Vec<TrackAssignment>,
    /// One entry per input file, in input order.
    pub diagnostics: Vec<FileDiagnostic>,
    /// Pilots still without a track after this run.
    pub remaining: WorkingSet,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.assignments.len()
    }

    pub fn skipped(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.outcome, FileOutcome::Skipped(_)))
            .count()
    }
}
