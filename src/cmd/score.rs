use crate::reports;
use clap::Args;
use gapscore::config::Config;
use gapscore::error::{GapError, GapResult};
use gapscore::gap::TaskScorer;
use gapscore::loader::load_results_from_file;
use gapscore::store::{MemoryStore, ResultStore};
use gapscore::task::TaskInfo;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// Task description (JSON).
    #[arg(short, long)]
    pub task: PathBuf,

    /// Pilot results (JSON array). Takes precedence over --store.
    #[arg(short, long)]
    pub results: Option<PathBuf>,

    /// Store snapshot (JSON) to read the task's results from.
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Also write the full score as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

pub fn run(args: ScoreArgs, config: Config) -> GapResult<()> {
    let task = TaskInfo::load_from_file(&args.task)?;
    config.formula.validate()?;

    let results = match (&args.results, &args.store) {
        (Some(path), _) => load_results_from_file(path)?,
        (None, Some(path)) => MemoryStore::load_from_file(path)?.task_results(task.id)?,
        (None, None) => {
            return Err(GapError::Validation(
                "Nothing to score: pass --results or --store".to_string(),
            ))
        }
    };
    info!("Scoring task {} with {} results", task.id, results.len());

    let scorer = TaskScorer::new(config.formula);
    let score = scorer.score(&task, &results)?;

    reports::print_validity_report(&score);
    reports::print_pilot_scores(&score);

    if let Some(path) = &args.json {
        fs::write(path, serde_json::to_string_pretty(&score)?)?;
        info!("💾 Score written to {:?}", path);
    }
    Ok(())
}
