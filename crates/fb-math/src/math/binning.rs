//! Timestamp discretization into fixed-width time bins.

/// Seconds per calendar day (UTC).
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Map a timestamp onto an integer bin index.
///
/// The index is the floor of `(timestamp - origin) / precision`, where
/// `precision` is the bin width in seconds. Callers validate
/// `precision > 0` before any stream is consumed. A timestamp earlier
/// than the origin yields a negative index, which is allowed.
pub fn bin_index(timestamp: f64, origin: f64, precision: f64) -> i64 {
    ((timestamp - origin) / precision).floor() as i64
}

/// Midnight (UTC) of the day containing `timestamp`.
///
/// Used to derive the bin origin from the first record when no explicit
/// epoch is configured. The Euclidean remainder keeps the result at or
/// below the input for pre-epoch timestamps as well.
pub fn day_origin(timestamp: f64) -> f64 {
    timestamp - timestamp.rem_euclid(SECONDS_PER_DAY)
}
