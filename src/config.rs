use crate::error::{GapError, GapResult};
use crate::matcher::format::FilenameShape;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Everything a run can be configured with. The JSON form has `formula` and
/// `import` sections; either may be omitted.
#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub formula: FormulaConstants,
    #[command(flatten)]
    pub import: ImportParams,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GapResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.formula.validate()?;
        Ok(config)
    }

    /// Applies only the flags the user actually typed on top of `self`.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        self.formula.merge_from_cli(&cli.formula, matches);
        self.import.merge_from_cli(&cli.import, matches);
    }
}

/// Constants of one GAP formula version. Distances in metres, times in seconds.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormulaConstants {
    #[arg(long = "formula-version", default_value = "pwc2016")]
    pub version: String,

    #[arg(long, default_value_t = 5_000.0)]
    pub min_distance: f64,
    #[arg(long, default_value_t = 70_000.0)]
    pub nom_distance: f64,
    /// Ratio of launched pilots expected in goal (0..1).
    #[arg(long, default_value_t = 0.3)]
    pub nom_goal: f64,
    #[arg(long, default_value_t = 0.96)]
    pub nom_launch: f64,
    #[arg(long, default_value_t = 5_400.0)]
    pub nom_time: f64,

    /// Glide bonus for stopped tasks; absent means disabled.
    #[arg(long)]
    pub glide_bonus: Option<f64>,

    // Published excerpts disagree on this term (0.027 vs 0.028).
    #[arg(long, default_value_t = 0.028)]
    pub launch_linear_coefficient: f64,
}

impl Default for FormulaConstants {
    fn default() -> Self {
        Self {
            version: "pwc2016".to_string(),
            min_distance: 5_000.0,
            nom_distance: 70_000.0,
            nom_goal: 0.3,
            nom_launch: 0.96,
            nom_time: 5_400.0,
            glide_bonus: None,
            launch_linear_coefficient: 0.028,
        }
    }
}

impl FormulaConstants {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GapResult<Self> {
        let content = fs::read_to_string(path)?;
        let formula: Self = serde_json::from_str(&content)?;
        formula.validate()?;
        Ok(formula)
    }

    pub fn validate(&self) -> GapResult<()> {
        let finite = [
            self.min_distance,
            self.nom_distance,
            self.nom_goal,
            self.nom_launch,
            self.nom_time,
            self.launch_linear_coefficient,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(GapError::Config(format!(
                "formula '{}' contains a non-finite constant",
                self.version
            )));
        }
        if !(0.0..=1.0).contains(&self.nom_goal) {
            return Err(GapError::Config(format!(
                "nomGoal must be a ratio in [0,1], got {}",
                self.nom_goal
            )));
        }
        if self.min_distance > self.nom_distance {
            return Err(GapError::Config(format!(
                "minDistance ({}) exceeds nomDistance ({})",
                self.min_distance, self.nom_distance
            )));
        }
        Ok(())
    }

    pub fn glide_bonus_enabled(&self) -> bool {
        self.glide_bonus.is_some_and(|g| g > 0.0)
    }

    pub fn merge_from_cli(&mut self, cli: &FormulaConstants, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(version);
        update_if_present!(min_distance);
        update_if_present!(nom_distance);
        update_if_present!(nom_goal);
        update_if_present!(nom_launch);
        update_if_present!(nom_time);
        update_if_present!(glide_bonus);
        update_if_present!(launch_linear_coefficient);
    }
}

pub const DEFAULT_FILENAME_FORMATS: &str = "id_name_name,name_name_id,id_name,name_id,\
civl_name_name,name_name_civl,fai_name_name,live,name_name,name_name_name";

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportParams {
    /// Accepted filename shapes, tried in order.
    #[arg(long, default_value = DEFAULT_FILENAME_FORMATS)]
    pub filename_formats: String,

    #[arg(long, default_value = "igc")]
    pub track_formats: String,

    #[arg(long, default_value_t = false)]
    pub require_registration: bool,

    #[arg(long, default_value_t = false)]
    pub check_g_record: bool,

    /// Tracks come from a cross-platform tracking service.
    #[arg(long, default_value_t = false)]
    pub xcontest: bool,
}

impl Default for ImportParams {
    fn default() -> Self {
        Self {
            filename_formats: DEFAULT_FILENAME_FORMATS.to_string(),
            track_formats: "igc".to_string(),
            require_registration: false,
            check_g_record: false,
            xcontest: false,
        }
    }
}

impl ImportParams {
    pub fn get_filename_shapes(&self) -> GapResult<Vec<FilenameShape>> {
        self.filename_formats
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(FilenameShape::from_str)
            .collect()
    }

    pub fn get_track_formats(&self) -> Vec<String> {
        self.track_formats
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn merge_from_cli(&mut self, cli: &ImportParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(filename_formats);
        update_if_present!(track_formats);
        update_if_present!(require_registration);
        update_if_present!(check_g_record);
        update_if_present!(xcontest);
    }
}
