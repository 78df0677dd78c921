use super::events::{EventSink, ImportEvent};
use super::igc::TrackReader;
use super::types::{
    DecodedTrack, FileDiagnostic, FileOutcome, GRecordStatus, ImportReport, SkipReason,
    TrackAssignment,
};
use crate::config::ImportParams;
use crate::error::{GapError, GapResult, StoreError};
use crate::flight::{FlightResult, PilotResult};
use crate::matcher::{PilotResolver, Resolution, WorkingSet};
use crate::store::ResultStore;
use crate::task::TaskInfo;
use serde_json::json;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// External check of a flight against the task.
pub trait FlightValidator {
    fn check_flight(&self, track: &DecodedTrack, task: &TaskInfo) -> GapResult<FlightResult>;
}

pub trait GRecordValidator {
    fn validate(&self, path: &Path) -> GRecordStatus;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    pub require_registration: bool,
    pub check_g_record: bool,
    pub xcontest: bool,
}

impl From<&ImportParams> for ImportOptions {
    fn from(p: &ImportParams) -> Self {
        Self {
            require_registration: p.require_registration,
            check_g_record: p.check_g_record,
            xcontest: p.xcontest,
        }
    }
}

/// The collaborators an import run talks to.
pub struct ImportContext<'a> {
    pub reader: &'a dyn TrackReader,
    /// When absent, assignments are recorded and validation happens later.
    pub validator: Option<&'a dyn FlightValidator>,
    pub g_record: Option<&'a dyn GRecordValidator>,
    pub sink: &'a dyn EventSink,
}

pub struct TrackImportCoordinator {
    resolver: PilotResolver,
    options: ImportOptions,
}

// Per-file outcome before it is folded into the report.
enum Step {
    Imported(TrackAssignment),
    Skipped(SkipReason),
}

impl TrackImportCoordinator {
    pub fn new(resolver: PilotResolver, options: ImportOptions) -> Self {
        Self { resolver, options }
    }

    /// Loads the working set from `store` and imports `files`.
    pub fn run(
        &self,
        files: &[PathBuf],
        task: &TaskInfo,
        store: &mut dyn ResultStore,
        ctx: &ImportContext,
    ) -> GapResult<ImportReport> {
        let working = self.working_set(task, &*store, ctx)?;
        self.run_with(files, task, working, store, ctx)
    }

    fn working_set(
        &self,
        task: &TaskInfo,
        store: &dyn ResultStore,
        ctx: &ImportContext,
    ) -> GapResult<WorkingSet> {
        let mut pilots = if self.options.require_registration {
            ctx.sink.emit(ImportEvent::message(
                "Comp with registration: files will be checked against registered pilots not yet scored",
            ));
            store.unscored_pilots(task.comp_id, task.id)?
        } else {
            store.registered_pilots(task.comp_id)?
        };

        if self.options.xcontest {
            pilots.retain(|p| p.live.is_some());
        }

        ctx.sink.emit(ImportEvent::message(format!(
            "We have {} pilots to find tracks for",
            pilots.len()
        )));
        Ok(WorkingSet::new(pilots))
    }

    /// Imports `files` against an explicit working set, which comes back updated
    /// in the report.
    pub fn run_with(
        &self,
        files: &[PathBuf],
        task: &TaskInfo,
        mut working: WorkingSet,
        store: &mut dyn ResultStore,
        ctx: &ImportContext,
    ) -> GapResult<ImportReport> {
        let mut report = ImportReport::default();

        for file in files {
            let step = if self.options.require_registration && working.is_empty() {
                Step::Skipped(SkipReason::NoPilotsRemaining)
            } else {
                self.import_file(file, task, &mut working, store, ctx)?
            };

            let outcome = match step {
                Step::Imported(assignment) => {
                    let key = assignment.pilot_key;
                    report.assignments.push(assignment);
                    ctx.sink.emit(ImportEvent::status(
                        "counter",
                        json!(report.assignments.len()),
                    ));
                    FileOutcome::Imported(key)
                }
                Step::Skipped(reason) => {
                    if reason != SkipReason::NoPilotsRemaining {
                        ctx.sink
                            .emit(ImportEvent::message(format!("{}: {}", display_name(file), reason)));
                    }
                    FileOutcome::Skipped(reason)
                }
            };
            report.diagnostics.push(FileDiagnostic {
                source: file.clone(),
                outcome,
            });
        }

        report.remaining = working;
        info!(
            "Task {}: imported {} tracks, skipped {}",
            task.id,
            report.imported(),
            report.skipped()
        );
        ctx.sink.emit(ImportEvent::message(format!(
            "Processed all tracks: {} imported, {} skipped",
            report.imported(),
            report.skipped()
        )));
        Ok(report)
    }

    fn import_file(
        &self,
        file: &Path,
        task: &TaskInfo,
        working: &mut WorkingSet,
        store: &mut dyn ResultStore,
        ctx: &ImportContext,
    ) -> GapResult<Step> {
        let filename = display_name(file);
        debug!("Checking {} against {} pilots", filename, working.len());

        let Some(Resolution {
            pilot, target_name, ..
        }) = self.resolver.resolve(&filename, working)
        else {
            return Ok(Step::Skipped(SkipReason::NoPilotFound));
        };
        let key = pilot.key;

        match store.has_track(task.id, key) {
            Ok(true) => return Ok(Step::Skipped(SkipReason::AlreadyScored(key))),
            Ok(false) => {}
            Err(e) => return store_failure(e),
        }

        let track = match ctx.reader.read_track(file) {
            Ok(t) => t,
            Err(e) => return Ok(Step::Skipped(SkipReason::NotDecodable(e.to_string()))),
        };
        if track.date != task.date {
            return Ok(Step::Skipped(SkipReason::WrongDate {
                track: track.date,
                task: task.date,
            }));
        }

        let ext = file
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        let candidates = [target_name.clone(), format!("{}_{}", target_name, key)].map(|stem| {
            match &ext {
                Some(ext) => format!("{}.{}", stem, ext),
                None => stem,
            }
        });
        let (target, copied) = match stage_copy(file, &task.target_dir, &candidates) {
            Ok(staged) => staged,
            Err(e) => return Ok(Step::Skipped(SkipReason::CopyFailed(e.to_string()))),
        };
        let target_name = display_name(&target);
        let discard = || {
            if copied {
                discard_copy(&target)
            }
        };
        ctx.sink
            .emit(ImportEvent::pilot_message(key, format!("processing {} {}:", key, pilot.name)));

        let assignment = TrackAssignment {
            pilot_key: key,
            source: file.to_path_buf(),
            target_name,
            target: target.clone(),
        };

        if let Some(reason) = self.check_g_record(&assignment, ctx) {
            discard();
            return Ok(Step::Skipped(reason));
        }

        let result = match ctx.validator {
            Some(validator) => {
                let staged = DecodedTrack {
                    path: target.clone(),
                    date: track.date,
                };
                match validator.check_flight(&staged, task) {
                    Ok(r) => Some(r),
                    Err(e) => {
                        discard();
                        return Ok(Step::Skipped(SkipReason::ValidationFailed(e.to_string())));
                    }
                }
            }
            None => None,
        };

        if let Err(e) = store.save_track(task.id, &assignment) {
            discard();
            return store_failure(e);
        }
        if let Some(flight) = result {
            if let Err(e) = store.save_result(task.id, PilotResult::flown(key, flight)) {
                store.remove_track(task.id, key)?;
                discard();
                return store_failure(e);
            }
        }

        Ok(Step::Imported(assignment))
    }

    fn check_g_record(&self, a: &TrackAssignment, ctx: &ImportContext) -> Option<SkipReason> {
        if !self.options.check_g_record {
            return None;
        }
        let Some(checker) = ctx.g_record else {
            warn!("G-record check requested but no validator configured");
            return None;
        };

        ctx.sink.emit(ImportEvent::message("Checking G-Record..."));
        match checker.validate(&a.target) {
            GRecordStatus::Passed => {
                ctx.sink.emit(ImportEvent::message("G-Record is valid"));
                None
            }
            GRecordStatus::Failed => {
                ctx.sink.emit(ImportEvent::status(
                    "g_record_fail",
                    json!({ "par_id": a.pilot_key, "track_id": null, "Result": "" }),
                ));
                Some(SkipReason::GRecordFailed(a.pilot_key))
            }
            GRecordStatus::Error => Some(SkipReason::GRecordError(a.pilot_key)),
        }
    }
}

fn display_name(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string_lossy().into_owned())
}

/// Copies `file` into the task folder under the first free name in `names`.
/// Existing files are never overwritten. The flag is false when `file` already
/// lives at the chosen path.
fn stage_copy(file: &Path, dir: &Path, names: &[String]) -> io::Result<(PathBuf, bool)> {
    fs::create_dir_all(dir)?;
    let source = fs::canonicalize(file)?;
    for name in names {
        let target = dir.join(name);
        if target.exists() {
            if fs::canonicalize(&target)? == source {
                return Ok((target, false));
            }
            debug!("{:?} is taken, trying the next name", target);
            continue;
        }
        let mut out = match OpenOptions::new().write(true).create_new(true).open(&target) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        };
        let copied = File::open(file).and_then(|mut input| io::copy(&mut input, &mut out));
        if let Err(e) = copied {
            drop(out);
            discard_copy(&target);
            return Err(e);
        }
        return Ok((target, true));
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free target name in {:?}", dir),
    ))
}

fn discard_copy(target: &Path) {
    if let Err(e) = fs::remove_file(target) {
        warn!("Could not remove rejected copy {:?}: {}", target, e);
    }
}

// Transient and integrity failures stay with the file; anything else aborts the run.
fn store_failure(e: StoreError) -> GapResult<Step> {
    match e {
        StoreError::Transient(_) | StoreError::Integrity(_) => {
            warn!("{}", e);
            Ok(Step::Skipped(SkipReason::Store(e.to_string())))
        }
        StoreError::Unexpected(_) => Err(GapError::Store(e)),
    }
}
