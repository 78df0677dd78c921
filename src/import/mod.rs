pub mod coordinator;
pub mod events;
pub mod igc;
pub mod sources;
pub mod types;

pub use self::coordinator::{
    FlightValidator, GRecordValidator, ImportContext, ImportOptions, TrackImportCoordinator,
};
pub use self::events::{ChannelSink, ConsoleSink, EventSink, ImportEvent, TracingSink};
pub use self::igc::{IgcHeaderReader, TrackReader};
pub use self::sources::{fetcher, TrackFetcher, TrackSource};
pub use self::types::{
    DecodedTrack, FileDiagnostic, FileOutcome, GRecordStatus, ImportReport, SkipReason,
    TrackAssignment,
};
