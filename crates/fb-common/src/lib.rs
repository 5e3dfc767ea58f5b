//! Flowbeacon shared types and errors.
//!
//! This crate provides foundational types shared across the flowbeacon
//! crates:
//! - Unified error type with stable codes and categories
//! - Report output format specifications

pub mod error;
pub mod output;

pub use error::{format_error_human, Error, ErrorCategory, Result};
pub use output::OutputFormat;
