//! Per-entity score accumulation.

use std::collections::BTreeMap;

use fb_math::GapScore;

/// Accumulates one score per entity id.
///
/// Writes overwrite on the same key, so a non-contiguous repeat of an
/// entity later in the stream replaces its earlier result. Iteration is
/// in ascending lexical order of entity id, which is the report order.
/// The store lives for the whole run and is read once at the end.
#[derive(Debug, Default)]
pub struct ResultStore {
    scores: BTreeMap<String, GapScore>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `score` under `entity`. Returns the replaced score if the
    /// entity had already been closed once.
    pub fn insert(&mut self, entity: String, score: GapScore) -> Option<GapScore> {
        self.scores.insert(entity, score)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entities with their scores, in ascending lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GapScore)> {
        self.scores.iter().map(|(entity, score)| (entity.as_str(), score))
    }
}
