use crate::error::GapResult;
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Where candidate track files come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TrackSource {
    /// Files directly inside one folder, used in place.
    Directory,
    /// A folder tree (an extracted archive); tracks are copied flat into staging.
    Nested,
}

pub trait TrackFetcher {
    /// Returns the candidate files, in the order they should be processed.
    fn fetch(&self, location: &Path, staging: &Path, formats: &[String]) -> GapResult<Vec<PathBuf>>;
}

pub struct DirectoryFetcher;
pub struct NestedFetcher;

pub fn fetcher(source: TrackSource) -> &'static dyn TrackFetcher {
    match source {
        TrackSource::Directory => &DirectoryFetcher,
        TrackSource::Nested => &NestedFetcher,
    }
}

/// Hidden (`.`) and excluded (`_`) names are ignored, as are unknown extensions.
pub fn is_track_file(path: &Path, formats: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('_') || name.starts_with('.') {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| formats.iter().any(|f| f.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

impl TrackFetcher for DirectoryFetcher {
    fn fetch(&self, location: &Path, _staging: &Path, formats: &[String]) -> GapResult<Vec<PathBuf>> {
        info!("Looking for tracks in {:?}", location);
        let mut files = Vec::new();
        for entry in WalkDir::new(location)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && is_track_file(entry.path(), formats) {
                files.push(entry.into_path());
            } else {
                debug!("Ignoring {:?}", entry.path());
            }
        }
        Ok(files)
    }
}

impl TrackFetcher for NestedFetcher {
    fn fetch(&self, location: &Path, staging: &Path, formats: &[String]) -> GapResult<Vec<PathBuf>> {
        info!("Staging tracks from {:?} into {:?}", location, staging);
        fs::create_dir_all(staging)?;

        let mut files = Vec::new();
        for entry in WalkDir::new(location).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() || !is_track_file(entry.path(), formats) {
                continue;
            }
            let target = staging.join(entry.file_name());
            if target.exists() {
                debug!("Duplicate file name {:?}, keeping the first", entry.file_name());
                continue;
            }
            fs::copy(entry.path(), &target)?;
            files.push(target);
        }
        Ok(files)
    }
}
