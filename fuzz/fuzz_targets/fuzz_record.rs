//! Fuzz target for pipe-delimited feed record parsing.
//!
//! Tests that record parsing handles arbitrary input without panicking.
//! The feed comes from an external producer, so malformed lines must
//! only ever return an error.

#![no_main]

use fb_core::record::parse_record;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = parse_record(line, 1);
    }
});
