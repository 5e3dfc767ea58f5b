//! Flowbeacon - beacon detection over pre-sorted flow feeds.
//!
//! Reads `entity|timestamp|...` lines from stdin (or a file), as
//! produced by the upstream sorter/extractor, discretizes each entity's
//! event times into fixed-width bins, and scores how consistently the
//! occupied bins are spaced around their median gap. One report line
//! per entity, in ascending lexical order:
//!
//! ```text
//! 10.0.0.1: (3, 3) -> 1.0
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use fb_common::{format_error_human, OutputFormat, Result};
use fb_core::config::RunConfig;
use fb_core::exit_codes::ExitCode;
use fb_core::logging::{generate_run_id, init_logging};
use fb_core::record::parse_record;
use fb_core::report;
use fb_core::store::ResultStore;
use fb_core::stream::StreamGrouper;

/// Detect beaconing behavior in a pre-sorted, pipe-delimited flow feed
#[derive(Parser, Debug)]
#[command(name = "fb-core")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bin width in seconds (must be positive)
    #[arg(allow_negative_numbers = true)]
    precision: f64,

    /// Acceptance band around the median gap, as a fraction (e.g. 0.05)
    #[arg(allow_negative_numbers = true)]
    tolerance: f64,

    /// Bin origin in seconds since the Unix epoch; derived from the
    /// first record's day (UTC) when omitted
    #[arg(allow_negative_numbers = true)]
    epoch: Option<i64>,

    /// Read the feed from a file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Report format
    #[arg(long, short = 'f', default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let code = match run(&cli) {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            let use_color = io::stderr().is_terminal();
            eprintln!("{}", format_error_human(&err, use_color));
            ExitCode::from(&err)
        }
    };
    std::process::exit(code.as_i32());
}

fn run(cli: &Cli) -> Result<()> {
    let config = RunConfig {
        precision: cli.precision,
        tolerance: cli.tolerance,
        epoch: cli.epoch,
    };
    config.validate()?;

    let run_id = generate_run_id();
    info!(
        run_id = %run_id,
        precision = config.precision,
        tolerance = config.tolerance,
        epoch = config.epoch,
        "run started"
    );

    let mut store = ResultStore::new();
    let mut grouper = StreamGrouper::new(&config);

    match &cli.input {
        Some(path) => consume(BufReader::new(File::open(path)?), &mut grouper, &mut store)?,
        None => consume(io::stdin().lock(), &mut grouper, &mut store)?,
    }

    let origin = grouper.origin();
    let records = grouper.finish(&mut store);
    info!(records, entities = store.len(), "run completed");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => out.write_all(report::render_text(&store).as_bytes())?,
        OutputFormat::Json => {
            let payload = report::build_report(&store, &config, origin);
            out.write_all(report::render_json(&payload)?.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Feed every line of `reader` through the grouper, failing fast on the
/// first malformed record.
fn consume<R: BufRead>(
    reader: R,
    grouper: &mut StreamGrouper,
    store: &mut ResultStore,
) -> Result<()> {
    for (index, line) in reader.lines().enumerate() {
        let record = parse_record(&line?, index as u64 + 1)?;
        grouper.push(record, store);
    }
    Ok(())
}
