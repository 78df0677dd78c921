use chrono::NaiveDate;
use gapscore::config::ImportParams;
use gapscore::error::{GapError, GapResult, StoreError};
use gapscore::flight::{FlightResult, PilotResult};
use gapscore::import::igc::parse_flight_date;
use gapscore::import::{
    fetcher, ChannelSink, DecodedTrack, EventSink, FileOutcome, FlightValidator, GRecordStatus,
    GRecordValidator, IgcHeaderReader, ImportContext, ImportEvent, ImportOptions, SkipReason,
    TrackAssignment, TrackImportCoordinator, TrackReader, TrackSource,
};
use gapscore::matcher::{FormatMatcher, PilotCandidate, PilotKey, PilotResolver, WorkingSet};
use gapscore::store::{MemoryStore, ResultStore, StoreResult};
use gapscore::task::TaskInfo;
use rstest::rstest;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tempfile::TempDir;

const IGC_2019_03_09: &str = "AXXX001\nHFDTE090319\nHFPLTPILOT:Test\nB1101355206343N00006198WA0058700558\n";
const IGC_2019_03_10: &str = "AXXX001\nHFDTEDATE:100319,01\nB1101355206343N00006198WA0058700558\n";
const IGC_NO_DATE: &str = "AXXX001\nHFPLTPILOT:Test\nB1101355206343N00006198WA0058700558\n";

struct Fixture {
    _dir: TempDir,
    source: PathBuf,
    task: TaskInfo,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let source = dir.path().join("upload");
        fs::create_dir_all(&source).unwrap();
        let task = TaskInfo::new(
            7,
            NaiveDate::from_ymd_opt(2019, 3, 9).unwrap(),
            dir.path().join("task7"),
        );
        Self {
            _dir: dir,
            source,
            task,
        }
    }

    fn track(&self, name: &str, content: &str) -> PathBuf {
        let path = self.source.join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

fn pilots() -> Vec<PilotCandidate> {
    vec![
        PilotCandidate {
            id: Some(123),
            ..PilotCandidate::new(1, "John Doe")
        },
        PilotCandidate {
            id: Some(7),
            live: Some("4411".to_string()),
            ..PilotCandidate::new(2, "Gaëtan Müller")
        },
        PilotCandidate::new(3, "Jane Smith"),
    ]
}

fn coordinator(options: ImportOptions) -> TrackImportCoordinator {
    let shapes = ImportParams::default().get_filename_shapes().unwrap();
    TrackImportCoordinator::new(PilotResolver::new(FormatMatcher::new(shapes)), options)
}

struct Silent;

impl EventSink for Silent {
    fn emit(&self, _event: ImportEvent) {}
}

fn ctx<'a>(sink: &'a dyn EventSink) -> ImportContext<'a> {
    ImportContext {
        reader: &IgcHeaderReader,
        validator: None,
        g_record: None,
        sink,
    }
}

fn skip_reasons(outcomes: &[FileOutcome]) -> Vec<Option<&SkipReason>> {
    outcomes
        .iter()
        .map(|o| match o {
            FileOutcome::Skipped(r) => Some(r),
            FileOutcome::Imported(_) => None,
        })
        .collect()
}

// --- HAPPY PATH ---

#[test]
fn test_import_copies_and_records() {
    let fx = Fixture::new();
    let files = vec![
        fx.track("123_Doe.igc", IGC_2019_03_09),
        fx.track("muller_gaetan.IGC", IGC_2019_03_09),
        fx.track("nobody_here.igc", IGC_2019_03_09),
    ];
    let mut store = MemoryStore::with_pilots(pilots());

    let report = coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &ctx(&Silent))
        .unwrap();

    assert_eq!(report.imported(), 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.diagnostics.len(), 3);
    assert_eq!(report.diagnostics[0].outcome, FileOutcome::Imported(1));
    assert_eq!(report.diagnostics[1].outcome, FileOutcome::Imported(2));
    assert_eq!(
        report.diagnostics[2].outcome,
        FileOutcome::Skipped(SkipReason::NoPilotFound)
    );

    assert_eq!(report.assignments[1].target_name, "gaetan_muller.igc");
    assert!(fx.task.target_dir.join("john_doe.igc").exists());
    assert!(fx.task.target_dir.join("gaetan_muller.igc").exists());
    assert!(files[0].exists(), "source files stay in place");

    assert!(store.has_track(7, 1).unwrap());
    assert!(store.has_track(7, 2).unwrap());
    let remaining: Vec<PilotKey> = report.remaining.iter().map(|p| p.key).collect();
    assert_eq!(remaining, vec![3]);
}

#[test]
fn test_namesakes_get_separate_copies() {
    let fx = Fixture::new();
    let files = vec![
        fx.track("1_smith.igc", &format!("{}LXXXA-TRACK\n", IGC_2019_03_09)),
        fx.track("2_smith.igc", &format!("{}LXXXB-TRACK\n", IGC_2019_03_09)),
    ];
    let namesakes = vec![
        PilotCandidate {
            id: Some(1),
            ..PilotCandidate::new(10, "John Smith")
        },
        PilotCandidate {
            id: Some(2),
            ..PilotCandidate::new(20, "John Smith")
        },
    ];
    let mut store = MemoryStore::with_pilots(namesakes);

    let report = coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &ctx(&Silent))
        .unwrap();

    assert_eq!(report.imported(), 2);
    let first = &report.assignments[0];
    let second = &report.assignments[1];
    assert_eq!(first.pilot_key, 10);
    assert_eq!(first.target_name, "john_smith.igc");
    assert_eq!(second.pilot_key, 20);
    assert_eq!(second.target_name, "john_smith_20.igc");

    let first_content = fs::read_to_string(&first.target).unwrap();
    let second_content = fs::read_to_string(&second.target).unwrap();
    assert!(first_content.contains("A-TRACK") && !first_content.contains("B-TRACK"));
    assert!(second_content.contains("B-TRACK") && !second_content.contains("A-TRACK"));
}

#[test]
fn test_existing_target_is_never_overwritten() {
    let fx = Fixture::new();
    fs::create_dir_all(&fx.task.target_dir).unwrap();
    fs::write(fx.task.target_dir.join("john_doe.igc"), "KEEP").unwrap();
    let files = vec![fx.track("123_Doe.igc", IGC_2019_03_09)];
    let mut store = MemoryStore::with_pilots(pilots());

    let report = coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &ctx(&Silent))
        .unwrap();

    assert_eq!(report.assignments[0].target_name, "john_doe_1.igc");
    let kept = fs::read_to_string(fx.task.target_dir.join("john_doe.igc")).unwrap();
    assert_eq!(kept, "KEEP");
}

#[test]
fn test_second_run_reports_already_scored() {
    let fx = Fixture::new();
    let files = vec![fx.track("123_Doe.igc", IGC_2019_03_09)];
    let mut store = MemoryStore::with_pilots(pilots());
    let coord = coordinator(ImportOptions::default());

    let first = coord.run(&files, &fx.task, &mut store, &ctx(&Silent)).unwrap();
    assert_eq!(first.imported(), 1);

    let second = coord.run(&files, &fx.task, &mut store, &ctx(&Silent)).unwrap();
    assert_eq!(second.imported(), 0);
    assert_eq!(
        second.diagnostics[0].outcome,
        FileOutcome::Skipped(SkipReason::AlreadyScored(1))
    );
    assert_eq!(store.tracks[&7].len(), 1);
}

#[test]
fn test_each_pilot_assigned_once_per_run() {
    let fx = Fixture::new();
    let files = vec![
        fx.track("123_Doe.igc", IGC_2019_03_09),
        fx.track("Doe_John.igc", IGC_2019_03_09),
        fx.track("john_doe.igc", IGC_2019_03_09),
    ];
    let mut store = MemoryStore::with_pilots(pilots());

    let report = coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &ctx(&Silent))
        .unwrap();

    assert_eq!(report.imported(), 1);
    let mut keys: Vec<PilotKey> = report.assignments.iter().map(|a| a.pilot_key).collect();
    keys.dedup();
    assert_eq!(keys, vec![1]);
}

// --- REJECTIONS ---

#[test]
fn test_wrong_date_and_undecodable_are_diagnosed() {
    let fx = Fixture::new();
    let files = vec![
        fx.track("123_Doe.igc", IGC_2019_03_10),
        fx.track("smith_jane.igc", IGC_NO_DATE),
    ];
    let mut store = MemoryStore::with_pilots(pilots());

    let report = coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &ctx(&Silent))
        .unwrap();

    let outcomes: Vec<FileOutcome> = report.diagnostics.iter().map(|d| d.outcome.clone()).collect();
    let reasons = skip_reasons(&outcomes);
    assert!(matches!(
        reasons[0],
        Some(SkipReason::WrongDate { track, task })
            if *track == NaiveDate::from_ymd_opt(2019, 3, 10).unwrap()
            && *task == NaiveDate::from_ymd_opt(2019, 3, 9).unwrap()
    ));
    assert!(matches!(reasons[1], Some(SkipReason::NotDecodable(_))));

    assert_eq!(report.imported(), 0);
    assert!(!fx.task.target_dir.join("john_doe.igc").exists());
    assert!(!store.has_track(7, 1).unwrap());
    // Resolved pilots are consumed even when the file is rejected.
    assert!(!report.remaining.contains(1));
    assert!(!report.remaining.contains(3));
}

// --- REGISTRATION ---

#[test]
fn test_registration_stops_once_everyone_has_a_track() {
    let fx = Fixture::new();
    let pilot_list = vec![PilotCandidate {
        id: Some(123),
        ..PilotCandidate::new(1, "John Doe")
    }];
    let files = vec![
        fx.track("123_Doe.igc", IGC_2019_03_09),
        fx.track("smith_jane.igc", IGC_2019_03_09),
        fx.track("zzz.igc", IGC_2019_03_09),
    ];
    let mut store = MemoryStore::with_pilots(pilot_list);
    let options = ImportOptions {
        require_registration: true,
        ..Default::default()
    };

    let report = coordinator(options)
        .run(&files, &fx.task, &mut store, &ctx(&Silent))
        .unwrap();

    assert_eq!(report.imported(), 1);
    assert_eq!(report.diagnostics.len(), 3);
    for d in &report.diagnostics[1..] {
        assert_eq!(d.outcome, FileOutcome::Skipped(SkipReason::NoPilotsRemaining));
    }
    assert!(report.remaining.is_empty());
}

#[test]
fn test_registration_skips_pilots_already_scored() {
    let fx = Fixture::new();
    let mut store = MemoryStore::with_pilots(pilots());
    store
        .save_track(
            7,
            &TrackAssignment {
                pilot_key: 1,
                source: PathBuf::from("old.igc"),
                target_name: "john_doe.igc".to_string(),
                target: PathBuf::from("john_doe.igc"),
            },
        )
        .unwrap();
    let files = vec![fx.track("123_Doe.igc", IGC_2019_03_09)];
    let options = ImportOptions {
        require_registration: true,
        ..Default::default()
    };

    let report = coordinator(options)
        .run(&files, &fx.task, &mut store, &ctx(&Silent))
        .unwrap();

    // Pilot 1 is not in the working set at all.
    assert_eq!(
        report.diagnostics[0].outcome,
        FileOutcome::Skipped(SkipReason::NoPilotFound)
    );
    assert_eq!(report.remaining.len(), 2);
}

#[test]
fn test_xcontest_limits_to_live_pilots() {
    let fx = Fixture::new();
    let files = vec![
        fx.track("4411.igc", IGC_2019_03_09),
        fx.track("123_Doe.igc", IGC_2019_03_09),
    ];
    let mut store = MemoryStore::with_pilots(pilots());
    let options = ImportOptions {
        xcontest: true,
        ..Default::default()
    };

    let report = coordinator(options)
        .run(&files, &fx.task, &mut store, &ctx(&Silent))
        .unwrap();

    assert_eq!(report.diagnostics[0].outcome, FileOutcome::Imported(2));
    assert_eq!(
        report.diagnostics[1].outcome,
        FileOutcome::Skipped(SkipReason::NoPilotFound)
    );
}

#[test]
fn test_run_with_explicit_working_set() {
    let fx = Fixture::new();
    let files = vec![fx.track("smith_jane.igc", IGC_2019_03_09)];
    let mut store = MemoryStore::with_pilots(pilots());
    let working = WorkingSet::new(vec![PilotCandidate::new(3, "Jane Smith")]);

    let report = coordinator(ImportOptions::default())
        .run_with(&files, &fx.task, working, &mut store, &ctx(&Silent))
        .unwrap();

    assert_eq!(report.assignments[0].pilot_key, 3);
    assert!(report.remaining.is_empty());
}

// --- COLLABORATORS ---

struct FixedGRecord(GRecordStatus);

impl GRecordValidator for FixedGRecord {
    fn validate(&self, _path: &Path) -> GRecordStatus {
        self.0
    }
}

struct FixedDistance(f64);

impl FlightValidator for FixedDistance {
    fn check_flight(&self, track: &DecodedTrack, _task: &TaskInfo) -> GapResult<FlightResult> {
        assert!(track.path.exists(), "validator sees the staged copy");
        Ok(FlightResult {
            distance_flown: self.0,
            ..Default::default()
        })
    }
}

struct Rejecting;

impl FlightValidator for Rejecting {
    fn check_flight(&self, _track: &DecodedTrack, _task: &TaskInfo) -> GapResult<FlightResult> {
        Err(GapError::Validation("track outside task window".to_string()))
    }
}

#[test]
fn test_failed_g_record_emits_status_and_discards_copy() {
    let fx = Fixture::new();
    let files = vec![fx.track("123_Doe.igc", IGC_2019_03_09)];
    let mut store = MemoryStore::with_pilots(pilots());
    let (tx, rx) = mpsc::channel();
    let sink = ChannelSink::new(tx);
    let g_record = FixedGRecord(GRecordStatus::Failed);
    let context = ImportContext {
        g_record: Some(&g_record),
        ..ctx(&sink)
    };
    let options = ImportOptions {
        check_g_record: true,
        ..Default::default()
    };

    let report = coordinator(options)
        .run(&files, &fx.task, &mut store, &context)
        .unwrap();

    assert_eq!(
        report.diagnostics[0].outcome,
        FileOutcome::Skipped(SkipReason::GRecordFailed(1))
    );
    assert!(!fx.task.target_dir.join("john_doe.igc").exists());
    assert!(!store.has_track(7, 1).unwrap());

    drop(context);
    drop(sink);
    let events: Vec<ImportEvent> = rx.iter().collect();
    let status = events
        .iter()
        .find_map(|e| match e {
            ImportEvent::Status { kind, payload } if kind == "g_record_fail" => Some(payload),
            _ => None,
        })
        .expect("g_record_fail status emitted");
    assert_eq!(status["par_id"], 1);
    assert!(status["track_id"].is_null());
}

#[rstest]
#[case(GRecordStatus::Passed, true)]
#[case(GRecordStatus::Error, false)]
fn test_g_record_outcomes(#[case] status: GRecordStatus, #[case] imported: bool) {
    let fx = Fixture::new();
    let files = vec![fx.track("123_Doe.igc", IGC_2019_03_09)];
    let mut store = MemoryStore::with_pilots(pilots());
    let g_record = FixedGRecord(status);
    let context = ImportContext {
        g_record: Some(&g_record),
        ..ctx(&Silent)
    };
    let options = ImportOptions {
        check_g_record: true,
        ..Default::default()
    };

    let report = coordinator(options)
        .run(&files, &fx.task, &mut store, &context)
        .unwrap();
    assert_eq!(report.imported() == 1, imported);
}

#[test]
fn test_validator_results_are_stored() {
    let fx = Fixture::new();
    let files = vec![fx.track("123_Doe.igc", IGC_2019_03_09)];
    let mut store = MemoryStore::with_pilots(pilots());
    let validator = FixedDistance(42_000.0);
    let context = ImportContext {
        validator: Some(&validator),
        ..ctx(&Silent)
    };

    coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &context)
        .unwrap();

    let results = store.task_results(7).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].flight().unwrap().distance_flown, 42_000.0);
}

#[test]
fn test_validator_rejection_is_a_skip() {
    let fx = Fixture::new();
    let files = vec![fx.track("123_Doe.igc", IGC_2019_03_09)];
    let mut store = MemoryStore::with_pilots(pilots());
    let context = ImportContext {
        validator: Some(&Rejecting),
        ..ctx(&Silent)
    };

    let report = coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &context)
        .unwrap();

    assert!(matches!(
        &report.diagnostics[0].outcome,
        FileOutcome::Skipped(SkipReason::ValidationFailed(msg)) if msg.contains("task window")
    ));
    assert!(!fx.task.target_dir.join("john_doe.igc").exists());
}

#[test]
fn test_events_include_counter() {
    let fx = Fixture::new();
    let files = vec![
        fx.track("123_Doe.igc", IGC_2019_03_09),
        fx.track("smith_jane.igc", IGC_2019_03_09),
    ];
    let mut store = MemoryStore::with_pilots(pilots());
    let (tx, rx) = mpsc::channel();
    let sink = ChannelSink::new(tx);

    coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &ctx(&sink))
        .unwrap();
    drop(sink);

    let counters: Vec<u64> = rx
        .iter()
        .filter_map(|e| match e {
            ImportEvent::Status { kind, payload } if kind == "counter" => payload.as_u64(),
            _ => None,
        })
        .collect();
    assert_eq!(counters, vec![1, 2]);
}

#[test]
fn test_status_event_display() {
    let e = ImportEvent::status("counter", serde_json::json!(3));
    assert_eq!(e.to_string(), "3|counter");
}

// --- STORE FAILURES ---

/// Wraps a MemoryStore and fails every track save, or every result save when
/// `on_result` is set, with the given error.
struct FailingStore {
    inner: MemoryStore,
    error: StoreError,
    on_result: bool,
}

impl ResultStore for FailingStore {
    fn registered_pilots(&self, comp_id: u32) -> StoreResult<Vec<PilotCandidate>> {
        self.inner.registered_pilots(comp_id)
    }
    fn unscored_pilots(&self, comp_id: u32, task_id: u32) -> StoreResult<Vec<PilotCandidate>> {
        self.inner.unscored_pilots(comp_id, task_id)
    }
    fn has_track(&self, task_id: u32, pilot: PilotKey) -> StoreResult<bool> {
        self.inner.has_track(task_id, pilot)
    }
    fn save_track(&mut self, task_id: u32, assignment: &TrackAssignment) -> StoreResult<()> {
        if self.on_result {
            return self.inner.save_track(task_id, assignment);
        }
        Err(self.error.clone())
    }
    fn remove_track(&mut self, task_id: u32, pilot: PilotKey) -> StoreResult<()> {
        self.inner.remove_track(task_id, pilot)
    }
    fn save_result(&mut self, task_id: u32, result: PilotResult) -> StoreResult<()> {
        if self.on_result {
            return Err(self.error.clone());
        }
        self.inner.save_result(task_id, result)
    }
    fn task_results(&self, task_id: u32) -> StoreResult<Vec<PilotResult>> {
        self.inner.task_results(task_id)
    }
}

#[test]
fn test_transient_store_error_skips_file() {
    let fx = Fixture::new();
    let files = vec![fx.track("123_Doe.igc", IGC_2019_03_09)];
    let mut store = FailingStore {
        inner: MemoryStore::with_pilots(pilots()),
        error: StoreError::Transient("connection reset".to_string()),
        on_result: false,
    };

    let report = coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &ctx(&Silent))
        .unwrap();

    assert!(matches!(
        report.diagnostics[0].outcome,
        FileOutcome::Skipped(SkipReason::Store(_))
    ));
    assert!(!fx.task.target_dir.join("john_doe.igc").exists());
}

#[test]
fn test_unexpected_store_error_aborts() {
    let fx = Fixture::new();
    let files = vec![fx.track("123_Doe.igc", IGC_2019_03_09)];
    let mut store = FailingStore {
        inner: MemoryStore::with_pilots(pilots()),
        error: StoreError::Unexpected("disk on fire".to_string()),
        on_result: false,
    };

    let err = coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &ctx(&Silent))
        .unwrap_err();
    assert!(matches!(err, GapError::Store(StoreError::Unexpected(_))));
}

#[test]
fn test_failed_result_save_rolls_back_track() {
    let fx = Fixture::new();
    let files = vec![fx.track("123_Doe.igc", IGC_2019_03_09)];
    let mut store = FailingStore {
        inner: MemoryStore::with_pilots(pilots()),
        error: StoreError::Transient("reset".to_string()),
        on_result: true,
    };
    let validator = FixedDistance(30_000.0);
    let context = ImportContext {
        validator: Some(&validator),
        ..ctx(&Silent)
    };

    let report = coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut store, &context)
        .unwrap();
    assert!(matches!(
        report.diagnostics[0].outcome,
        FileOutcome::Skipped(SkipReason::Store(_))
    ));
    assert!(!store.has_track(7, 1).unwrap());
    assert!(!fx.task.target_dir.join("john_doe.igc").exists());

    let mut recovered = store.inner;
    let retry = coordinator(ImportOptions::default())
        .run(&files, &fx.task, &mut recovered, &context)
        .unwrap();
    assert_eq!(retry.diagnostics[0].outcome, FileOutcome::Imported(1));
    assert_eq!(recovered.task_results(7).unwrap().len(), 1);
}

// --- IGC HEADER ---

#[rstest]
#[case("HFDTE090319\n", Some((2019, 3, 9)))]
#[case("HFDTEDATE:311220,02\n", Some((2020, 12, 31)))]
#[case("AXXX\nB1101355206343N\nHFDTE090319\n", None)]
#[case("HFDTE0903\n", None)]
#[case("HFDTE320119\n", None)]
fn test_parse_flight_date(#[case] content: &str, #[case] expected: Option<(i32, u32, u32)>) {
    let expected = expected.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
    assert_eq!(parse_flight_date(content), expected);
}

#[test]
fn test_igc_reader_errors_without_date() {
    let fx = Fixture::new();
    let path = fx.track("x.igc", IGC_NO_DATE);
    assert!(IgcHeaderReader.read_track(&path).is_err());
    assert!(IgcHeaderReader.read_track(&fx.source.join("missing.igc")).is_err());
}

// --- SOURCES ---

#[test]
fn test_directory_fetcher_filters_and_sorts() {
    let fx = Fixture::new();
    fx.track("b_pilot.igc", IGC_2019_03_09);
    fx.track("a_pilot.IGC", IGC_2019_03_09);
    fx.track("_excluded.igc", IGC_2019_03_09);
    fx.track(".hidden.igc", IGC_2019_03_09);
    fx.track("notes.txt", "hello");
    fs::create_dir_all(fx.source.join("sub")).unwrap();
    fs::write(fx.source.join("sub").join("c_pilot.igc"), IGC_2019_03_09).unwrap();

    let formats = vec!["igc".to_string()];
    let files = fetcher(TrackSource::Directory)
        .fetch(&fx.source, &fx.task.target_dir, &formats)
        .unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_pilot.IGC", "b_pilot.igc"]);
}

#[test]
fn test_nested_fetcher_flattens_into_staging() {
    let fx = Fixture::new();
    let deep = fx.source.join("comp").join("day1");
    fs::create_dir_all(&deep).unwrap();
    fs::write(deep.join("123_Doe.igc"), IGC_2019_03_09).unwrap();
    fs::write(fx.source.join("comp").join("readme.md"), "x").unwrap();

    let staging = fx.task.target_dir.join("_staging");
    let formats = vec!["igc".to_string()];
    let files = fetcher(TrackSource::Nested)
        .fetch(&fx.source, &staging, &formats)
        .unwrap();

    assert_eq!(files, vec![staging.join("123_Doe.igc")]);
    assert!(files[0].exists());
}

#[test]
fn test_track_source_from_str() {
    assert_eq!("nested".parse::<TrackSource>().unwrap(), TrackSource::Nested);
    assert!("zip".parse::<TrackSource>().is_err());
}
