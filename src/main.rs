use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use gapscore::config::Config;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with `formula` and `import` sections. Flags override it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Match track files to pilots and copy them into the task folder.
    Import(cmd::import::ImportArgs),
    /// Compute validities, weights and pilot points for a task.
    Score(cmd::score::ScoreArgs),
}

fn main() {
    // Raw matches tell user-typed flags apart from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let (cli_config, sub_matches) = match &cli.command {
        Commands::Import(args) => (&args.config, matches.subcommand_matches("import")),
        Commands::Score(args) => (&args.config, matches.subcommand_matches("score")),
    };

    let config = match &cli.config {
        Some(path) => {
            info!("⚖️  Loading configuration from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            if let Some(sub) = sub_matches {
                file_config.merge_from_cli(cli_config, sub);
            }
            file_config
        }
        None => {
            warn!("No configuration file given. Using defaults and flags.");
            cli_config.clone()
        }
    };

    let outcome = match cli.command {
        Commands::Import(args) => cmd::import::run(args, config),
        Commands::Score(args) => cmd::score::run(args, config),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        process::exit(1);
    }
}
