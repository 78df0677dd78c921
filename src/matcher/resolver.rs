use super::format::{FieldKind, FilenameShape, FormatMatcher};
use super::normalize::{fold_accents, name_tokens, target_filename};
use super::tokenizer::tokenize_filename;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub type PilotKey = u32;

/// A registered pilot still eligible for a track in this pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotCandidate {
    pub key: PilotKey,
    pub name: String,
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub fai: Option<String>,
    #[serde(default)]
    pub civl: Option<u64>,
    #[serde(default)]
    pub live: Option<String>,
}

impl PilotCandidate {
    pub fn new(key: PilotKey, name: &str) -> Self {
        Self {
            key,
            name: name.to_string(),
            id: None,
            fai: None,
            civl: None,
            live: None,
        }
    }

    fn matches_unique(&self, kind: FieldKind, token: &str) -> bool {
        match kind {
            FieldKind::Id => match token.parse::<u32>() {
                Ok(v) => self.id == Some(v),
                Err(_) => false,
            },
            FieldKind::CivlId => match token.parse::<u64>() {
                Ok(v) => self.civl == Some(v),
                Err(_) => false,
            },
            FieldKind::FaiCode => self.fai.as_deref() == Some(token),
            FieldKind::LiveId => self.live.as_deref() == Some(token),
            FieldKind::Name | FieldKind::Other => false,
        }
    }
}

/// Pilots not yet matched in the current pass. Only ever shrinks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet {
    pilots: Vec<PilotCandidate>,
}

impl WorkingSet {
    pub fn new(pilots: Vec<PilotCandidate>) -> Self {
        Self { pilots }
    }

    pub fn len(&self) -> usize {
        self.pilots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pilots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PilotCandidate> {
        self.pilots.iter()
    }

    pub fn contains(&self, key: PilotKey) -> bool {
        self.pilots.iter().any(|p| p.key == key)
    }

    pub fn remove(&mut self, key: PilotKey) -> Option<PilotCandidate> {
        let idx = self.pilots.iter().position(|p| p.key == key)?;
        Some(self.pilots.remove(idx))
    }
}

impl From<Vec<PilotCandidate>> for WorkingSet {
    fn from(pilots: Vec<PilotCandidate>) -> Self {
        Self::new(pilots)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub pilot: PilotCandidate,
    pub shape: FilenameShape,
    /// Normalized stem for the imported copy.
    pub target_name: String,
}

pub struct PilotResolver {
    matcher: FormatMatcher,
}

impl PilotResolver {
    pub fn new(matcher: FormatMatcher) -> Self {
        Self { matcher }
    }

    /// Finds the pilot a track filename belongs to and takes it out of `working`.
    ///
    /// Shapes are tried in configured order; the first shape yielding a pilot wins.
    pub fn resolve(&self, filename: &str, working: &mut WorkingSet) -> Option<Resolution> {
        let owned = tokenize_filename(filename);
        let tokens: Vec<&str> = owned.iter().map(String::as_str).collect();
        if tokens.is_empty() {
            return None;
        }

        for shape in self.matcher.matching_shapes(&tokens) {
            let found = if shape.has_unique_field() {
                find_by_unique(shape, &tokens, working)
            } else {
                find_by_name(shape, &tokens, working)
            };

            if let Some(key) = found {
                let pilot = working.remove(key)?;
                debug!("{} matched {} via '{}'", filename, pilot.name, shape);
                let target_name = target_filename(&pilot.name);
                return Some(Resolution {
                    pilot,
                    shape: shape.clone(),
                    target_name,
                });
            }
        }
        None
    }
}

fn find_by_unique(shape: &FilenameShape, tokens: &[&str], working: &WorkingSet) -> Option<PilotKey> {
    shape
        .fields()
        .iter()
        .zip(tokens)
        .filter(|(kind, _)| kind.is_unique())
        .find_map(|(&kind, token)| {
            working
                .iter()
                .find(|p| p.matches_unique(kind, token))
                .map(|p| p.key)
        })
}

fn find_by_name(shape: &FilenameShape, tokens: &[&str], working: &WorkingSet) -> Option<PilotKey> {
    // A shape with neither names nor ids would accept anyone.
    if !shape.has_name_field() {
        return None;
    }

    let names: Vec<String> = shape
        .fields()
        .iter()
        .zip(tokens)
        .filter(|(kind, _)| **kind == FieldKind::Name)
        .map(|(_, token)| fold_accents(token).to_lowercase())
        .collect();

    working
        .iter()
        .find(|p| {
            let pilot_names = name_tokens(&p.name);
            names.iter().all(|n| pilot_names.contains(n))
        })
        .map(|p| p.key)
}
