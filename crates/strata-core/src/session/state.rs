//! Per-session dataset cache

use std::collections::HashMap;

use crate::dataset::Dataset;
use crate::registry::AlgorithmId;

/// Cache of the last-generated dataset per playground context.
///
/// One value per session, exclusively owned by its session's orchestrator.
/// Created empty, overwritten on regeneration, dropped at session end.
/// Sessions never share a `SessionState`, so no locking is needed anywhere.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    cache: HashMap<AlgorithmId, Dataset>,
}

impl SessionState {
    /// Create an empty session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached dataset for `context`, if any.
    pub fn get(&self, context: AlgorithmId) -> Option<&Dataset> {
        self.cache.get(&context)
    }

    /// Cache `dataset` under `context`, replacing any prior entry.
    pub fn insert(&mut self, context: AlgorithmId, dataset: Dataset) {
        self.cache.insert(context, dataset);
    }

    /// Whether a dataset is cached for `context`.
    pub fn contains(&self, context: AlgorithmId) -> bool {
        self.cache.contains_key(&context)
    }

    /// Number of cached datasets.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop every cached dataset.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Provenance;
    use pretty_assertions::assert_eq;

    fn dataset(value: f64) -> Dataset {
        Dataset::from_rows(vec![vec![value, value]], Provenance::Generated)
    }

    #[test]
    fn insert_replaces_prior_entry() {
        let mut state = SessionState::new();
        state.insert(AlgorithmId::KMeans, dataset(1.0));
        state.insert(AlgorithmId::KMeans, dataset(2.0));
        assert_eq!(state.len(), 1);
        assert_eq!(state.get(AlgorithmId::KMeans).unwrap().samples()[0][0], 2.0);
    }

    #[test]
    fn contexts_are_independent() {
        let mut state = SessionState::new();
        state.insert(AlgorithmId::KMeans, dataset(1.0));
        assert!(state.contains(AlgorithmId::KMeans));
        assert!(!state.contains(AlgorithmId::Dbscan));
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut state = SessionState::new();
        state.insert(AlgorithmId::Pca, dataset(1.0));
        state.clear();
        assert!(state.is_empty());
    }
}
