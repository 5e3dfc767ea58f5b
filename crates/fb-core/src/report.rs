//! Report rendering for completed runs.
//!
//! stdout carries the report; everything else (logging, diagnostics)
//! goes to stderr. The text format reproduces the feed-analysis line
//! shape consumed by downstream tooling:
//!
//! ```text
//! 10.0.0.1: (3, 3) -> 1.0
//! 10.0.0.2: (0, 0) -> 0.00
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use fb_common::Result;
use fb_math::GapScore;

use crate::config::RunConfig;
use crate::store::ResultStore;

/// One scored entity in a JSON report.
#[derive(Debug, Serialize)]
pub struct EntityReport {
    pub entity: String,
    pub matched: u64,
    pub total: u64,
    pub ratio: f64,
}

/// Full JSON report payload.
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub precision: f64,
    pub tolerance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<f64>,
    pub entities: Vec<EntityReport>,
}

/// Render a score's ratio the way the text report prints it.
///
/// The ratio rounds to two decimals and trims trailing zeros down to a
/// single decimal place (`1.0`, `0.67`, `0.5`). A score with no gaps
/// prints the literal `0.00`, sidestepping the division entirely.
pub fn format_ratio(score: &GapScore) -> String {
    if score.total == 0 {
        return "0.00".to_string();
    }
    let rounded = format!("{:.2}", score.ratio());
    match rounded.strip_suffix('0') {
        Some(trimmed) if !trimmed.ends_with('.') => trimmed.to_string(),
        _ => rounded,
    }
}

/// Render the text report: one line per entity, in store (lexical) order.
pub fn render_text(store: &ResultStore) -> String {
    let mut out = String::new();
    for (entity, score) in store.iter() {
        out.push_str(&format!(
            "{}: ({}, {}) -> {}\n",
            entity,
            score.matched,
            score.total,
            format_ratio(score)
        ));
    }
    out
}

/// Assemble the JSON report payload.
pub fn build_report(store: &ResultStore, config: &RunConfig, origin: Option<f64>) -> Report {
    Report {
        generated_at: Utc::now(),
        precision: config.precision,
        tolerance: config.tolerance,
        origin,
        entities: store
            .iter()
            .map(|(entity, score)| EntityReport {
                entity: entity.to_string(),
                matched: score.matched,
                total: score.total,
                ratio: score.ratio(),
            })
            .collect(),
    }
}

/// Serialize the JSON report.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&str, u64, u64)]) -> ResultStore {
        let mut store = ResultStore::new();
        for (entity, matched, total) in entries {
            store.insert(
                entity.to_string(),
                GapScore {
                    matched: *matched,
                    total: *total,
                },
            );
        }
        store
    }

    #[test]
    fn ratio_formatting() {
        assert_eq!(format_ratio(&GapScore { matched: 3, total: 3 }), "1.0");
        assert_eq!(format_ratio(&GapScore { matched: 2, total: 3 }), "0.67");
        assert_eq!(format_ratio(&GapScore { matched: 1, total: 2 }), "0.5");
        assert_eq!(format_ratio(&GapScore { matched: 0, total: 3 }), "0.0");
        // No gaps: literal 0.00, no division.
        assert_eq!(format_ratio(&GapScore { matched: 0, total: 0 }), "0.00");
    }

    #[test]
    fn text_report_lines() {
        let store = store_with(&[("10.0.0.2", 0, 0), ("10.0.0.1", 3, 3)]);
        let text = render_text(&store);
        assert_eq!(text, "10.0.0.1: (3, 3) -> 1.0\n10.0.0.2: (0, 0) -> 0.00\n");
    }

    #[test]
    fn empty_store_renders_nothing() {
        assert_eq!(render_text(&ResultStore::new()), "");
    }

    #[test]
    fn json_report_shape() {
        let store = store_with(&[("a", 1, 2)]);
        let config = RunConfig {
            precision: 5.0,
            tolerance: 0.05,
            epoch: Some(0),
        };
        let report = build_report(&store, &config, Some(0.0));
        let json = render_json(&report).unwrap();

        assert!(json.contains("\"precision\": 5.0"));
        assert!(json.contains("\"entity\": \"a\""));
        assert!(json.contains("\"matched\": 1"));
        assert!(json.contains("\"ratio\": 0.5"));
    }

    #[test]
    fn json_report_omits_unresolved_origin() {
        let config = RunConfig {
            precision: 5.0,
            tolerance: 0.05,
            epoch: None,
        };
        let report = build_report(&ResultStore::new(), &config, None);
        let json = render_json(&report).unwrap();
        assert!(!json.contains("\"origin\""));
        assert!(json.contains("\"entities\": []"));
    }
}
