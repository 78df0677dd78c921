pub mod format;
pub mod normalize;
pub mod resolver;
pub mod tokenizer;

pub use self::format::{FieldKind, FilenameShape, FormatMatcher};
pub use self::resolver::{PilotCandidate, PilotKey, PilotResolver, Resolution, WorkingSet};
pub use self::tokenizer::tokenize;
