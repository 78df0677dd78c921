use super::types::DecodedTrack;
use crate::error::{GapError, GapResult};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

pub trait TrackReader {
    fn read_track(&self, path: &Path) -> GapResult<DecodedTrack>;
}

/// Reads only the IGC header fields the import needs (the flight date).
pub struct IgcHeaderReader;

impl TrackReader for IgcHeaderReader {
    fn read_track(&self, path: &Path) -> GapResult<DecodedTrack> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let date = parse_flight_date(&content).ok_or_else(|| {
            GapError::Validation(format!("{:?} has no usable HFDTE header", path))
        })?;
        Ok(DecodedTrack {
            path: path.to_path_buf(),
            date,
        })
    }
}

/// Accepts both `HFDTE090319` and `HFDTEDATE:090319,01`.
pub fn parse_flight_date(content: &str) -> Option<NaiveDate> {
    for line in content.lines() {
        let line = line.trim();
        // Header records come before the first fix.
        if line.starts_with('B') {
            break;
        }
        let Some(rest) = line.strip_prefix("HFDTE") else {
            continue;
        };
        let digits: String = rest
            .trim_start_matches("DATE")
            .trim_start_matches(':')
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.len() < 6 {
            return None;
        }
        return NaiveDate::parse_from_str(&digits[..6], "%d%m%y").ok();
    }
    None
}
