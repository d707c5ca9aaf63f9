// src/report.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::{fmt, time::Duration};

use crate::trips::{top_slots, top_zones, IngestOutcome, IngestStats, SlotCount, ZoneCount};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Both rankings for one run, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct TripReport {
    pub generated_at: DateTime<Utc>,
    pub elapsed_seconds: f64,
    pub top: usize,
    pub stats: IngestStats,
    pub top_zones: Vec<ZoneCount>,
    pub top_slots: Vec<SlotCount>,
}

impl TripReport {
    pub fn build(outcome: &IngestOutcome, top: usize, elapsed: Duration) -> Self {
        Self {
            generated_at: Utc::now(),
            elapsed_seconds: elapsed.as_secs_f64(),
            top,
            stats: outcome.stats,
            top_zones: top_zones(&outcome.tally, top),
            top_slots: top_slots(&outcome.tally, top),
        }
    }

    /// Report for a run whose source could not be opened at all.
    pub fn empty(top: usize, elapsed: Duration) -> Self {
        Self::build(&IngestOutcome::default(), top, elapsed)
    }

    /// Console layout, see the [`fmt::Display`] impl.
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    pub fn render_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing trip report")
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => self.render_json(),
        }
    }
}

/// Console layout:
///
/// ```text
/// Top 10 Pickup Zones:
/// ZoneA => 2
///
/// Top 10 Busy Slots:
/// ZoneA @ 8 => 2
///
/// Execution time (seconds): 0.0123
/// ```
impl fmt::Display for TripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Top {} Pickup Zones:", self.top)?;
        for z in &self.top_zones {
            writeln!(f, "{} => {}", z.zone, z.count)?;
        }
        writeln!(f)?;

        writeln!(f, "Top {} Busy Slots:", self.top)?;
        for s in &self.top_slots {
            writeln!(f, "{} @ {} => {}", s.zone, s.hour, s.count)?;
        }
        writeln!(f)?;

        writeln!(f, "Execution time (seconds): {}", self.elapsed_seconds)
    }
}
