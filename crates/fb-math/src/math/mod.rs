//! Core math modules.

pub mod binning;
pub mod periodicity;
