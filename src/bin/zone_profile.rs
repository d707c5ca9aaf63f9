use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use tripagg::{
    source::{resolve_sources, DEFAULT_FALLBACKS, DEFAULT_INPUT},
    trips::{ingest_paths, DelimiterMode, HeaderRule, IngestOptions, IngestOutcome},
};

#[derive(Parser)]
#[command(author, version, about = "24-hour pickup profile for a single zone")]
struct Args {
    /// Zone identifier, matched exactly.
    #[arg(short, long)]
    zone: String,
    #[arg(default_value = DEFAULT_INPUT)]
    inputs: Vec<String>,
    #[arg(long, value_enum, default_value_t = DelimiterMode::Auto)]
    delimiter: DelimiterMode,
    #[arg(long, value_enum, default_value_t = HeaderRule::TripIdOrPickupZone)]
    header_rule: HeaderRule,
}

const BAR_COLUMNS: u64 = 40;

/// Bar length for `count`, scaled so the busiest hour fills `BAR_COLUMNS`.
fn bar_width(count: u64, peak: u64) -> usize {
    if peak == 0 {
        return 0;
    }
    (u128::from(count) * u128::from(BAR_COLUMNS) / u128::from(peak)) as usize
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let fallbacks: Vec<PathBuf> = DEFAULT_FALLBACKS.iter().map(PathBuf::from).collect();
    let sources = resolve_sources(&args.inputs, &fallbacks)?;
    let outcome = if sources.is_empty() {
        IngestOutcome::default()
    } else {
        ingest_paths(
            &sources,
            IngestOptions {
                delimiter: args.delimiter,
                header_rule: args.header_rule,
            },
        )?
    };

    let Some(hours) = outcome.tally.zone_hours(&args.zone) else {
        println!("No trips for zone {}", args.zone);
        return Ok(());
    };

    let total = outcome.tally.zone_total(&args.zone);
    let peak = hours.iter().copied().max().unwrap_or(0);
    println!("Hourly pickups for {} ({} trips):", args.zone, total);
    for (hour, &count) in hours.iter().enumerate() {
        let bar = "#".repeat(bar_width(count, peak));
        println!("{:02} {:>8} {}", hour, count, bar);
    }
    Ok(())
}
