//! Single-pass grouping of the ordered record stream.
//!
//! The feed arrives pre-sorted into contiguous per-entity runs, with
//! timestamps ascending within each run. That ordering is the upstream
//! sorter's contract and is not corrected here: a violation is
//! observable as an entity reappearing after its group already closed,
//! in which case the grouper logs a warning and keeps the later result.

use std::collections::BTreeSet;

use chrono::DateTime;
use tracing::{debug, warn};

use fb_math::{bin_index, day_origin, score};

use crate::config::RunConfig;
use crate::record::Record;
use crate::store::ResultStore;

/// Streaming grouper over the per-entity record feed.
///
/// Owns the currently open group (entity id plus its occupied-bin set)
/// and closes it into the result store whenever the entity changes or
/// the stream ends. The bin origin is taken from configuration or
/// resolved lazily from the first record, and never changes afterwards.
#[derive(Debug)]
pub struct StreamGrouper {
    precision: f64,
    tolerance: f64,
    origin: Option<f64>,
    current_entity: Option<String>,
    current_bins: BTreeSet<i64>,
    records_seen: u64,
}

impl StreamGrouper {
    pub fn new(config: &RunConfig) -> Self {
        StreamGrouper {
            precision: config.precision,
            tolerance: config.tolerance,
            origin: config.epoch.map(|epoch| epoch as f64),
            current_entity: None,
            current_bins: BTreeSet::new(),
            records_seen: 0,
        }
    }

    /// The resolved bin origin, if one has been established yet.
    pub fn origin(&self) -> Option<f64> {
        self.origin
    }

    /// Consume one record in stream order.
    ///
    /// The first record opens the first group without closing anything;
    /// an entity change closes the current group into `store` before
    /// the new group starts.
    pub fn push(&mut self, record: Record, store: &mut ResultStore) {
        self.records_seen += 1;

        let entity_changed = self
            .current_entity
            .as_deref()
            .is_some_and(|current| current != record.entity);
        if entity_changed {
            self.close_current(store);
        }
        if self.current_entity.is_none() {
            self.current_entity = Some(record.entity);
        }

        let origin = *self.origin.get_or_insert_with(|| {
            let origin = day_origin(record.timestamp);
            debug!(origin, utc = %format_utc(origin), "origin resolved from first record");
            origin
        });

        self.current_bins
            .insert(bin_index(record.timestamp, origin, self.precision));
    }

    /// Close the final open group, if any, and return the number of
    /// records consumed. An empty stream closes nothing.
    pub fn finish(mut self, store: &mut ResultStore) -> u64 {
        if self.current_entity.is_some() {
            self.close_current(store);
        }
        self.records_seen
    }

    fn close_current(&mut self, store: &mut ResultStore) {
        let Some(entity) = self.current_entity.take() else {
            return;
        };
        let bins = std::mem::take(&mut self.current_bins);
        let result = score(&bins, self.tolerance);
        debug!(
            entity = %entity,
            bins = bins.len(),
            matched = result.matched,
            total = result.total,
            "group closed"
        );
        if store.insert(entity.clone(), result).is_some() {
            warn!(
                entity = %entity,
                "entity reappeared after its group closed; keeping the later result"
            );
        }
    }
}

fn format_utc(origin: f64) -> String {
    DateTime::from_timestamp(origin as i64, 0)
        .map(|instant| instant.to_rfc3339())
        .unwrap_or_else(|| origin.to_string())
}
