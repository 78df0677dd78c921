use crate::error::{GapError, GapResult};
use crate::flight::PilotResult;
use crate::matcher::PilotCandidate;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Reads a pilot list with header `key,name,id,fai,civl,live`; only `key` and
/// `name` are required per row.
pub fn load_pilots<R: Read>(reader: R) -> GapResult<Vec<PilotCandidate>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .has_headers(true)
        .from_reader(reader);

    let mut pilots = Vec::new();
    let mut seen = HashSet::new();

    for (line, row) in rdr.deserialize::<PilotCandidate>().enumerate() {
        let pilot = match row {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping pilot row {}: {}", line + 2, e);
                continue;
            }
        };
        if pilot.name.trim().is_empty() {
            warn!("Skipping pilot {} without a name", pilot.key);
            continue;
        }
        if !seen.insert(pilot.key) {
            return Err(GapError::Validation(format!(
                "Duplicate pilot key {} in pilot list",
                pilot.key
            )));
        }
        pilots.push(pilot);
    }

    debug!("Loaded {} pilots", pilots.len());
    Ok(pilots)
}

pub fn load_pilots_from_file<P: AsRef<Path>>(path: P) -> GapResult<Vec<PilotCandidate>> {
    info!("📂 Loading pilots: {:?}", path.as_ref());
    load_pilots(File::open(path)?)
}

/// Reads validated pilot results (a JSON array).
pub fn load_results_from_file<P: AsRef<Path>>(path: P) -> GapResult<Vec<PilotResult>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
