//! Structured logging foundation for fb-core.
//!
//! stdout is reserved for the report payload; all log output goes to
//! stderr in a human-readable console format. The environment variables
//! FB_LOG and RUST_LOG take precedence over the CLI-derived default
//! filter.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Resolve the default filter directive from the CLI verbosity flags.
///
/// `--quiet` drops everything below errors; each `-v` steps the level
/// up one notch.
pub fn filter_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "fb_core=error"
    } else {
        match verbose {
            0 => "fb_core=info",
            1 => "fb_core=debug",
            _ => "fb_core=trace",
        }
    }
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = match std::env::var("FB_LOG") {
        Ok(spec) => EnvFilter::new(spec),
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, quiet))),
    };

    let use_ansi = std::io::stderr().is_terminal();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(use_ansi)
        .init();
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // Shorten to the first 12 chars for readability
    format!("run-{}", &uuid.to_string()[..12])
}
