use crate::reports;
use clap::Args;
use gapscore::config::Config;
use gapscore::error::{GapError, GapResult};
use gapscore::import::{
    fetcher, ConsoleSink, EventSink, IgcHeaderReader, ImportContext, ImportOptions,
    TrackImportCoordinator, TrackSource, TracingSink,
};
use gapscore::loader::load_pilots_from_file;
use gapscore::matcher::{FormatMatcher, PilotResolver};
use gapscore::store::MemoryStore;
use gapscore::task::TaskInfo;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[command(flatten)]
    pub config: Config,

    /// Task description (JSON).
    #[arg(short, long)]
    pub task: PathBuf,

    /// Folder holding the submitted track files.
    #[arg(short, long)]
    pub source: PathBuf,

    #[arg(long, default_value_t = TrackSource::Directory)]
    pub source_kind: TrackSource,

    /// Where nested sources are flattened before matching.
    #[arg(long)]
    pub staging: Option<PathBuf>,

    /// Pilot list (CSV). Replaces the pilots held in the store.
    #[arg(short, long)]
    pub pilots: Option<PathBuf>,

    /// Store snapshot (JSON), read if present and written back afterwards.
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Send progress to the log instead of stdout.
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

pub fn run(args: ImportArgs, config: Config) -> GapResult<()> {
    let task = TaskInfo::load_from_file(&args.task)?;
    info!("📂 Task {} on {}", task.id, task.date);

    let mut store = match &args.store {
        Some(path) if path.exists() => MemoryStore::load_from_file(path)?,
        _ => MemoryStore::default(),
    };
    if let Some(path) = &args.pilots {
        store.pilots = load_pilots_from_file(path)?;
    }
    if store.pilots.is_empty() {
        return Err(GapError::Validation(
            "No pilots available: pass --pilots or a populated --store".to_string(),
        ));
    }

    let formats = config.import.get_track_formats();
    let shapes = config.import.get_filename_shapes()?;
    let coordinator = TrackImportCoordinator::new(
        PilotResolver::new(FormatMatcher::new(shapes)),
        ImportOptions::from(&config.import),
    );

    let staging = args
        .staging
        .clone()
        .unwrap_or_else(|| task.target_dir.join("_staging"));
    let files = fetcher(args.source_kind).fetch(&args.source, &staging, &formats)?;
    info!("Found {} candidate files", files.len());

    let sink: &dyn EventSink = if args.quiet {
        &TracingSink
    } else {
        &ConsoleSink
    };
    let ctx = ImportContext {
        reader: &IgcHeaderReader,
        validator: None,
        g_record: None,
        sink,
    };
    let report = coordinator.run(&files, &task, &mut store, &ctx)?;

    reports::print_import_report(&report);

    if let Some(path) = &args.store {
        store.save_to_file(path)?;
        info!("💾 Store saved to {:?}", path);
    }
    Ok(())
}
