//! Run configuration and validation.

use fb_common::{Error, Result};

/// Static configuration for one run.
///
/// Resolved from CLI arguments and validated before the stream is
/// consumed; fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Bin width in seconds.
    pub precision: f64,
    /// Fractional half-width of the acceptance band around the median
    /// gap, e.g. 0.05.
    pub tolerance: f64,
    /// Explicit bin origin in seconds since the Unix epoch; derived from
    /// the first record's day when absent.
    pub epoch: Option<i64>,
}

impl RunConfig {
    /// Validate semantic constraints the CLI type checks cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(Error::Config(format!(
                "precision must be a positive number of seconds, got {}",
                self.precision
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(Error::Config(format!(
                "tolerance must be a non-negative fraction, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
