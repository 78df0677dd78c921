use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+|[\p{L}']+").expect("token pattern compiles"))
}

/// Splits a filename stem into digit runs and letter/apostrophe runs, left to right.
/// Separators (`_`, `-`, `.`, spaces, ...) are dropped.
pub fn tokenize(stem: &str) -> Vec<&str> {
    token_pattern().find_iter(stem).map(|m| m.as_str()).collect()
}

/// Tokenizes the stem of a file name or path (`/a/b/123_doe.igc` -> `["123", "doe"]`).
///
/// The stem is NFC-composed first so decomposed accents stay inside their word.
pub fn tokenize_filename(filename: &str) -> Vec<String> {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let composed: String = stem.nfc().collect();
    tokenize(&composed).into_iter().map(str::to_owned).collect()
}
