//! Session Orchestrator
//!
//! Top-level coordinator tying resolver, registry, engine, and summarizer
//! together per user interaction. Each playground context moves through a
//! small phase machine:
//!
//! ```text
//! NoDataset -> DataReady -> ResultReady
//! ```
//!
//! Only successful operations transition phases; every recoverable error
//! leaves the session exactly as it was. Execution is button-gated like the
//! original playground: editing parameters in `ResultReady` changes nothing
//! until an explicit run request.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dataset::{resolve, Dataset, ResolveRequest, UploadedTable};
use crate::engine::{self, ResultBundle};
use crate::error::{Error, Result};
use crate::registry::{self, AlgorithmId, AlgorithmSpec, ParameterBinding};
use crate::session::state::SessionState;
use crate::summary::{summarize, Summary};

/// Phase of one playground context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No active dataset; execution cannot proceed.
    NoDataset,
    /// A dataset is resolved and parameters can be bound.
    DataReady,
    /// The last run succeeded; its output has been handed out.
    ResultReady,
}

/// Presentation-ready payload for the host's rendering layer: the sample
/// coordinates to plot, the raw result bundle, and the derived summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutput {
    pub algorithm: AlgorithmId,
    /// Row-major sample coordinates of the dataset that was run.
    pub points: Vec<Vec<f64>>,
    pub result: ResultBundle,
    pub summary: Summary,
}

/// One user's playground session.
///
/// Owns the session's dataset cache and the per-context phases. Create one
/// per session and drop it at session end; sessions are fully isolated
/// values with no shared state.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    active: Option<AlgorithmId>,
    phases: [(AlgorithmId, Phase); 4],
    resolved: Vec<(AlgorithmId, Dataset)>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a fresh session with every context in `NoDataset`.
    pub fn new() -> Self {
        Self {
            state: SessionState::new(),
            active: None,
            phases: AlgorithmId::ALL.map(|id| (id, Phase::NoDataset)),
            resolved: Vec::new(),
        }
    }

    /// The active context, if one has been selected.
    pub fn active(&self) -> Option<AlgorithmId> {
        self.active
    }

    /// Phase of `context`.
    pub fn phase(&self, context: AlgorithmId) -> Phase {
        self.phases
            .iter()
            .find(|(id, _)| *id == context)
            .map(|(_, phase)| *phase)
            .unwrap_or(Phase::NoDataset)
    }

    /// Catalog metadata for `context`, for the host's overview pane.
    pub fn overview(&self, context: AlgorithmId) -> &'static AlgorithmSpec {
        registry::lookup(context)
    }

    /// The currently resolved dataset for `context`, if any. Hosts use the
    /// shape for their "Using uploaded data: N samples, M features" notice.
    pub fn dataset(&self, context: AlgorithmId) -> Option<&Dataset> {
        self.resolved
            .iter()
            .find(|(id, _)| *id == context)
            .map(|(_, d)| d)
    }

    /// Read-only view of the dataset cache (test and host introspection).
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Switch the active context, re-resolving its dataset from the cache.
    ///
    /// The new context lands in `DataReady` if a cached dataset exists for
    /// it, otherwise `NoDataset`.
    pub fn switch_context(&mut self, context: AlgorithmId) -> Phase {
        self.active = Some(context);
        let phase = match resolve(context, ResolveRequest::passive(), &mut self.state) {
            Ok(dataset) => {
                self.store_resolved(context, dataset);
                Phase::DataReady
            }
            Err(_) => {
                self.resolved.retain(|(id, _)| *id != context);
                Phase::NoDataset
            }
        };
        self.set_phase(context, phase);
        info!(context = %context, ?phase, "switched context");
        phase
    }

    /// Resolve the active dataset for the active context.
    ///
    /// On success the context moves to `DataReady` (from any phase) and the
    /// resolved dataset becomes current. On failure nothing changes.
    pub fn resolve_dataset(&mut self, request: ResolveRequest<'_>) -> Result<&Dataset> {
        let context = self.require_active()?;
        let dataset = resolve(context, request, &mut self.state)?;
        debug!(
            context = %context,
            samples = dataset.sample_count(),
            features = dataset.feature_count(),
            provenance = ?dataset.provenance(),
            "dataset resolved"
        );
        self.store_resolved(context, dataset);
        self.set_phase(context, Phase::DataReady);
        Ok(self.dataset(context).expect("just stored"))
    }

    /// Convenience: resolve using an uploaded table.
    pub fn upload(&mut self, table: &UploadedTable) -> Result<&Dataset> {
        self.resolve_dataset(ResolveRequest::upload(table))
    }

    /// Convenience: resolve by generating fresh sample data.
    pub fn generate(&mut self) -> Result<&Dataset> {
        self.resolve_dataset(ResolveRequest::generate())
    }

    /// Run the active context's algorithm over its current dataset.
    ///
    /// Requires an explicit call even when parameters change after a
    /// previous run. On success the context moves to `ResultReady`; on any
    /// failure the phase, the current dataset, and the cache are untouched.
    pub fn run(&mut self, binding: &ParameterBinding) -> Result<RunOutput> {
        let context = self.require_active()?;
        let dataset = self
            .dataset(context)
            .ok_or(Error::NoDatasetAvailable)?
            .clone();

        let result = engine::execute(context, &dataset, binding)?;
        let summary = summarize(&result);
        self.set_phase(context, Phase::ResultReady);
        info!(context = %context, "run complete");

        Ok(RunOutput {
            algorithm: context,
            points: dataset.samples().to_vec(),
            result,
            summary,
        })
    }

    fn require_active(&self) -> Result<AlgorithmId> {
        self.active.ok_or(Error::NoDatasetAvailable)
    }

    fn store_resolved(&mut self, context: AlgorithmId, dataset: Dataset) {
        self.resolved.retain(|(id, _)| *id != context);
        self.resolved.push((context, dataset));
    }

    fn set_phase(&mut self, context: AlgorithmId, phase: Phase) {
        if let Some(entry) = self.phases.iter_mut().find(|(id, _)| *id == context) {
            entry.1 = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Provenance;
    use crate::registry::ParamValue;
    use pretty_assertions::assert_eq;

    fn kmeans_session() -> Session {
        let mut session = Session::new();
        session.switch_context(AlgorithmId::KMeans);
        session
    }

    #[test]
    fn fresh_context_starts_without_dataset() {
        let session = kmeans_session();
        assert_eq!(session.phase(AlgorithmId::KMeans), Phase::NoDataset);
        assert!(session.dataset(AlgorithmId::KMeans).is_none());
    }

    #[test]
    fn generate_moves_to_data_ready() {
        let mut session = kmeans_session();
        session.generate().unwrap();
        assert_eq!(session.phase(AlgorithmId::KMeans), Phase::DataReady);
        assert_eq!(session.dataset(AlgorithmId::KMeans).unwrap().sample_count(), 300);
    }

    #[test]
    fn run_without_dataset_is_reported() {
        let mut session = kmeans_session();
        let binding = ParameterBinding::defaults(session.overview(AlgorithmId::KMeans));
        let err = session.run(&binding).unwrap_err();
        assert!(matches!(err, Error::NoDatasetAvailable));
        assert_eq!(session.phase(AlgorithmId::KMeans), Phase::NoDataset);
    }

    #[test]
    fn successful_run_reaches_result_ready() {
        let mut session = kmeans_session();
        session.generate().unwrap();
        let binding = ParameterBinding::defaults(session.overview(AlgorithmId::KMeans));
        let output = session.run(&binding).unwrap();

        assert_eq!(session.phase(AlgorithmId::KMeans), Phase::ResultReady);
        assert_eq!(output.algorithm, AlgorithmId::KMeans);
        assert_eq!(output.points.len(), 300);
    }

    #[test]
    fn failed_run_leaves_phase_and_cache_alone() {
        let mut session = kmeans_session();
        session.generate().unwrap();
        let cached = session.state().get(AlgorithmId::KMeans).unwrap().clone();

        let binding = ParameterBinding::defaults(session.overview(AlgorithmId::KMeans))
            .set("cluster_count", ParamValue::Int(1));
        let err = session.run(&binding).unwrap_err();

        assert!(matches!(err, Error::InvalidParameter { .. }));
        assert_eq!(session.phase(AlgorithmId::KMeans), Phase::DataReady);
        assert_eq!(session.state().get(AlgorithmId::KMeans).unwrap(), &cached);
    }

    #[test]
    fn switching_back_to_cached_context_is_data_ready() {
        let mut session = kmeans_session();
        session.generate().unwrap();

        assert_eq!(session.switch_context(AlgorithmId::Dbscan), Phase::NoDataset);
        let phase = session.switch_context(AlgorithmId::KMeans);
        assert_eq!(phase, Phase::DataReady);
        assert_eq!(
            session.dataset(AlgorithmId::KMeans).unwrap().provenance(),
            Provenance::Cached
        );
    }

    #[test]
    fn operations_before_context_selection_are_rejected() {
        let mut session = Session::new();
        assert!(matches!(
            session.generate().unwrap_err(),
            Error::NoDatasetAvailable
        ));
    }
}
