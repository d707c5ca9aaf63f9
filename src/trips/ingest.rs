// src/trips/ingest.rs
use anyhow::{Context, Result};
use clap::ValueEnum;
use rayon::prelude::*;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{debug, info, instrument, trace};

use super::{
    hour::extract_hour,
    split::{split_line, DelimiterMode, FIELD_COUNT},
    tally::TripTally,
};

const ZONE_COL: usize = 1;
const PICKUP_TIME_COL: usize = 3;

/// Token in column 0 of a trip file header.
pub const TRIP_ID_HEADER: &str = "TripID";
/// Token in column 1 of a trip file header.
pub const PICKUP_ZONE_HEADER: &str = "PickupZoneID";

const READ_BUFFER_BYTES: usize = 1 << 20;

/// How the first successfully split line is recognised as a header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderRule {
    /// Header iff column 0 is `TripID`.
    TripId,
    /// Header iff column 0 is `TripID` or column 1 is `PickupZoneID`.
    #[default]
    TripIdOrPickupZone,
}

impl HeaderRule {
    pub fn is_header(self, cols: &[&str; FIELD_COUNT]) -> bool {
        match self {
            HeaderRule::TripId => cols[0] == TRIP_ID_HEADER,
            HeaderRule::TripIdOrPickupZone => {
                cols[0] == TRIP_ID_HEADER || cols[ZONE_COL] == PICKUP_ZONE_HEADER
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestOptions {
    pub delimiter: DelimiterMode,
    pub header_rule: HeaderRule,
}

/// Per-pass line accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub lines: u64,
    pub accepted: u64,
    /// Lines that did not split into six fields.
    pub structural_rejects: u64,
    /// Rows with an empty zone or an unusable pickup timestamp.
    pub semantic_rejects: u64,
    /// Header lines skipped (at most one per source).
    pub headers_skipped: u64,
}

impl IngestStats {
    /// Add another pass's counts into `self`, saturating on overflow.
    pub fn add(&mut self, other: IngestStats) {
        self.lines = self.lines.saturating_add(other.lines);
        self.accepted = self.accepted.saturating_add(other.accepted);
        self.structural_rejects = self
            .structural_rejects
            .saturating_add(other.structural_rejects);
        self.semantic_rejects = self.semantic_rejects.saturating_add(other.semantic_rejects);
        self.headers_skipped = self.headers_skipped.saturating_add(other.headers_skipped);
    }
}

/// What happened to a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Accepted,
    Header,
    StructuralReject,
    SemanticReject,
}

/// Header detection is one-shot: it applies to the first line that splits
/// into six fields and never again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    AwaitingFirstRow,
    Data,
}

/// Tallies and line accounting produced by one or more passes.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub tally: TripTally,
    pub stats: IngestStats,
}

impl IngestOutcome {
    pub fn merge(&mut self, other: IngestOutcome) {
        self.tally.merge(other.tally);
        self.stats.add(other.stats);
    }
}

/// Line-at-a-time driver of one ingestion pass over one source.
pub struct TripIngest {
    options: IngestOptions,
    header: HeaderState,
    tally: TripTally,
    stats: IngestStats,
}

impl TripIngest {
    pub fn new(options: IngestOptions) -> Self {
        Self {
            options,
            header: HeaderState::AwaitingFirstRow,
            tally: TripTally::new(),
            stats: IngestStats::default(),
        }
    }

    /// Feed one line (terminator optional). Bad lines are counted and
    /// skipped; nothing here can fail.
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        self.stats.lines += 1;

        let Some((_, cols)) = split_line(line, self.options.delimiter) else {
            self.stats.structural_rejects += 1;
            trace!(line = self.stats.lines, "structural reject");
            return LineOutcome::StructuralReject;
        };

        if self.header == HeaderState::AwaitingFirstRow {
            self.header = HeaderState::Data;
            if self.options.header_rule.is_header(&cols) {
                self.stats.headers_skipped += 1;
                debug!(line = self.stats.lines, "skipping header row");
                return LineOutcome::Header;
            }
        }

        let zone = cols[ZONE_COL];
        let pickup_time = cols[PICKUP_TIME_COL];
        let hour = if zone.is_empty() || pickup_time.is_empty() {
            None
        } else {
            extract_hour(pickup_time)
        };
        let Some(hour) = hour else {
            self.stats.semantic_rejects += 1;
            trace!(line = self.stats.lines, zone, "semantic reject");
            return LineOutcome::SemanticReject;
        };

        self.tally.record(zone, hour);
        self.stats.accepted += 1;
        LineOutcome::Accepted
    }

    /// Feed one raw line. Bytes that are not valid UTF-8 make the line a
    /// structural reject; zone keys are never rewritten.
    pub fn process_bytes(&mut self, line: &[u8]) -> LineOutcome {
        match std::str::from_utf8(line) {
            Ok(line) => self.process_line(line),
            Err(e) => {
                self.stats.lines += 1;
                self.stats.structural_rejects += 1;
                trace!(line = self.stats.lines, error = %e, "undecodable line");
                LineOutcome::StructuralReject
            }
        }
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    pub fn tally(&self) -> &TripTally {
        &self.tally
    }

    pub fn finish(self) -> IngestOutcome {
        IngestOutcome {
            tally: self.tally,
            stats: self.stats,
        }
    }
}

/// Run a full pass over `reader` until end of input.
///
/// Lines with invalid UTF-8 are skipped like any other malformed line; only
/// real read errors are returned.
pub fn ingest_reader<R: BufRead>(mut reader: R, options: IngestOptions) -> Result<IngestOutcome> {
    let mut ingest = TripIngest::new(options);
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("reading line {}", ingest.stats().lines + 1))?;
        if n == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        ingest.process_bytes(&buf);
    }

    Ok(ingest.finish())
}

/// Open `path` and run a full pass over it. The file is closed when the
/// pass returns.
#[instrument(level = "info", skip(path, options), fields(path = %path.as_ref().display()))]
pub fn ingest_path<P: AsRef<Path>>(path: P, options: IngestOptions) -> Result<IngestOutcome> {
    let start = Instant::now();
    let file = File::open(&path)
        .with_context(|| format!("Failed to open trip file: {:?}", path.as_ref()))?;
    let reader = BufReader::with_capacity(READ_BUFFER_BYTES, file);

    let outcome = ingest_reader(reader, options)
        .with_context(|| format!("Failed to read trip file: {:?}", path.as_ref()))?;

    let s = &outcome.stats;
    info!(
        lines = s.lines,
        accepted = s.accepted,
        structural_rejects = s.structural_rejects,
        semantic_rejects = s.semantic_rejects,
        headers_skipped = s.headers_skipped,
        zones = outcome.tally.zone_count(),
        elapsed = ?start.elapsed(),
        "ingested"
    );
    Ok(outcome)
}

/// Ingest several files in parallel, one independent pass per file (each
/// with its own header check), then sum the results.
#[instrument(level = "info", skip(paths, options), fields(files = paths.len()))]
pub fn ingest_paths(paths: &[PathBuf], options: IngestOptions) -> Result<IngestOutcome> {
    let outcomes: Vec<IngestOutcome> = paths
        .par_iter()
        .map(|p| ingest_path(p, options))
        .collect::<Result<_>>()?;

    let mut total = IngestOutcome::default();
    for outcome in outcomes {
        total.merge(outcome);
    }
    debug!(
        accepted = total.stats.accepted,
        zones = total.tally.zone_count(),
        "merged passes"
    );
    Ok(total)
}
