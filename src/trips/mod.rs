// src/trips/mod.rs
pub mod hour;
pub mod ingest;
pub mod rank;
pub mod split;
pub mod tally;

pub use hour::{extract_hour, HOURS_PER_DAY};
pub use ingest::{
    ingest_path, ingest_paths, ingest_reader, HeaderRule, IngestOptions, IngestOutcome,
    IngestStats, LineOutcome, TripIngest,
};
pub use rank::{top_slots, top_zones, SlotCount, ZoneCount};
pub use split::{split_auto, split_fields, split_line, Delimiter, DelimiterMode, FIELD_COUNT};
pub use tally::{HourlyCounts, TripTally};
