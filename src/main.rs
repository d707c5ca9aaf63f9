use anyhow::Result;
use clap::Parser;
use std::{path::PathBuf, time::Duration, time::Instant};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use tripagg::{
    report::{ReportFormat, TripReport},
    source::{resolve_sources, DEFAULT_FALLBACKS, DEFAULT_INPUT},
    trips::{ingest_paths, DelimiterMode, HeaderRule, IngestOptions},
};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Busiest pickup zones and (zone, hour) slots from delimited trip files"
)]
struct Args {
    /// Trip files or glob patterns. Several files are ingested in parallel and summed.
    #[arg(default_value = DEFAULT_INPUT)]
    inputs: Vec<String>,
    /// Number of entries in each ranking.
    #[arg(short = 'k', long, default_value_t = 10)]
    top: usize,
    #[arg(long, value_enum, default_value_t = DelimiterMode::Auto)]
    delimiter: DelimiterMode,
    #[arg(long, value_enum, default_value_t = HeaderRule::TripIdOrPickupZone)]
    header_rule: HeaderRule,
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
    /// Paths tried in order when no input can be opened (default: Trips.csv, trips.csv).
    #[arg(long = "fallback")]
    fallbacks: Vec<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let start = Instant::now();

    // ─── 2) resolve sources ──────────────────────────────────────────
    let fallbacks: Vec<PathBuf> = if args.fallbacks.is_empty() {
        DEFAULT_FALLBACKS.iter().map(PathBuf::from).collect()
    } else {
        args.fallbacks.clone()
    };
    let sources = resolve_sources(&args.inputs, &fallbacks)?;

    // ─── 3) ingest + rank ────────────────────────────────────────────
    let report = if sources.is_empty() {
        TripReport::empty(args.top, Duration::ZERO)
    } else {
        let options = IngestOptions {
            delimiter: args.delimiter,
            header_rule: args.header_rule,
        };
        let outcome = ingest_paths(&sources, options)?;
        info!(
            files = sources.len(),
            accepted = outcome.stats.accepted,
            zones = outcome.tally.zone_count(),
            "aggregation complete"
        );
        TripReport::build(&outcome, args.top, start.elapsed())
    };

    // ─── 4) render ───────────────────────────────────────────────────
    print!("{}", report.render(args.format)?);
    Ok(())
}
