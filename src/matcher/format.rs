use crate::error::{GapError, GapResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Name,
    Id,
    #[strum(to_string = "fai")]
    #[serde(rename = "fai")]
    FaiCode,
    #[strum(to_string = "civl")]
    #[serde(rename = "civl")]
    CivlId,
    #[strum(to_string = "live")]
    #[serde(rename = "live")]
    LiveId,
    Other,
}

impl FieldKind {
    /// Kinds that identify exactly one pilot.
    pub fn is_unique(self) -> bool {
        matches!(
            self,
            FieldKind::Id | FieldKind::CivlId | FieldKind::FaiCode | FieldKind::LiveId
        )
    }

    /// Whether `token` belongs to this kind's character class.
    pub fn accepts(self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        match self {
            FieldKind::Name => token.chars().all(|c| c.is_alphabetic() || c == '\''),
            FieldKind::Other => token.chars().all(|c| c.is_alphanumeric() || c == '\''),
            FieldKind::Id | FieldKind::CivlId => token.chars().all(|c| c.is_ascii_digit()),
            FieldKind::FaiCode | FieldKind::LiveId => token.chars().all(char::is_alphanumeric),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// An accepted filename layout, e.g. `id_name_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameShape {
    fields: Vec<FieldKind>,
}

impl FilenameShape {
    pub fn new(fields: Vec<FieldKind>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldKind] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has_unique_field(&self) -> bool {
        self.fields.iter().any(|k| k.is_unique())
    }

    pub fn has_name_field(&self) -> bool {
        self.fields.contains(&FieldKind::Name)
    }

    /// Same field count and every token inside its field's character class.
    pub fn matches(&self, tokens: &[&str]) -> bool {
        self.fields.len() == tokens.len()
            && self
                .fields
                .iter()
                .zip(tokens)
                .all(|(kind, token)| kind.accepts(token))
    }
}

impl FromStr for FilenameShape {
    type Err = GapError;

    fn from_str(s: &str) -> GapResult<Self> {
        let fields = s
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|p| !p.is_empty())
            .map(|p| {
                FieldKind::from_str(&p.to_lowercase()).map_err(|_| {
                    let known: Vec<String> = FieldKind::iter().map(|k| k.to_string()).collect();
                    GapError::Config(format!(
                        "Unknown field '{}' in filename format '{}' (expected one of: {})",
                        p,
                        s,
                        known.join(", ")
                    ))
                })
            })
            .collect::<GapResult<Vec<_>>>()?;

        if fields.is_empty() {
            return Err(GapError::Config(format!("Empty filename format '{}'", s)));
        }
        Ok(Self { fields })
    }
}

impl fmt::Display for FilenameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.fields.iter().map(|k| k.as_ref()).collect();
        f.write_str(&parts.join("_"))
    }
}

/// The configured library of filename shapes, in priority order.
#[derive(Debug, Clone)]
pub struct FormatMatcher {
    shapes: Vec<FilenameShape>,
}

impl FormatMatcher {
    pub fn new(shapes: Vec<FilenameShape>) -> Self {
        Self { shapes }
    }

    /// Shapes accepting `tokens`, in configured order.
    pub fn matching_shapes<'a>(
        &'a self,
        tokens: &'a [&'a str],
    ) -> impl Iterator<Item = &'a FilenameShape> + 'a {
        self.shapes.iter().filter(move |shape| shape.matches(tokens))
    }
}
