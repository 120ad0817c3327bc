//! Dataset Resolver
//!
//! Decides which dataset is active for a playground context. Competing
//! sources, first match wins:
//!
//! 1. An uploaded table with enough numeric columns
//! 2. An explicit generate request (cached for later interactions)
//! 3. A previously generated dataset cached for this context
//!
//! Anything else is [`crate::Error::NoDatasetAvailable`].

use tracing::debug;

use crate::dataset::synth::{generate_blobs, SynthesisConfig};
use crate::dataset::types::{Dataset, Provenance, UploadedTable};
use crate::error::{Error, Result};
use crate::registry::AlgorithmId;
use crate::session::SessionState;

/// A single resolution request for one playground context.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveRequest<'a> {
    /// Host-supplied uploaded table, if any.
    pub upload: Option<&'a UploadedTable>,
    /// Whether the user explicitly asked for fresh sample data.
    pub generate: bool,
}

impl<'a> ResolveRequest<'a> {
    /// Request with no upload and no generate action (cache-only).
    pub fn passive() -> Self {
        Self::default()
    }

    /// Request using an uploaded table.
    pub fn upload(table: &'a UploadedTable) -> Self {
        Self {
            upload: Some(table),
            generate: false,
        }
    }

    /// Request explicitly asking for fresh sample data.
    pub fn generate() -> Self {
        Self {
            upload: None,
            generate: true,
        }
    }
}

/// Number of numeric columns an upload must offer for `context`, and how
/// many of them are consumed. The PCA context takes every numeric column;
/// clustering contexts take the first two.
fn required_columns(context: AlgorithmId) -> usize {
    match context {
        AlgorithmId::Pca => 1,
        _ => 2,
    }
}

/// Resolve the active dataset for `context`.
///
/// A successful generate request replaces any cached dataset for the
/// context. Cache hits are returned tagged [`Provenance::Cached`].
pub fn resolve(
    context: AlgorithmId,
    request: ResolveRequest<'_>,
    session: &mut SessionState,
) -> Result<Dataset> {
    if let Some(table) = request.upload {
        if table.numeric_column_count() >= required_columns(context) {
            let dataset = select_numeric(context, table);
            debug!(
                context = %context,
                samples = dataset.sample_count(),
                features = dataset.feature_count(),
                "resolved uploaded dataset"
            );
            return Ok(dataset);
        }
        debug!(
            context = %context,
            numeric_columns = table.numeric_column_count(),
            "upload has too few numeric columns, falling through"
        );
    }

    if request.generate {
        let dataset = generate_blobs(&SynthesisConfig::for_context(context))?;
        session.insert(context, dataset.clone());
        debug!(
            context = %context,
            samples = dataset.sample_count(),
            "generated and cached dataset"
        );
        return Ok(dataset);
    }

    if let Some(cached) = session.get(context) {
        debug!(context = %context, "resolved cached dataset");
        return Ok(cached.clone().with_provenance(Provenance::Cached));
    }

    Err(Error::NoDatasetAvailable)
}

/// Select the context-appropriate numeric columns from an upload.
fn select_numeric(context: AlgorithmId, table: &UploadedTable) -> Dataset {
    let columns: Vec<&[f64]> = match context {
        AlgorithmId::Pca => table.numeric_columns().map(|(_, v)| v).collect(),
        _ => table
            .numeric_columns()
            .map(|(_, v)| v)
            .take(required_columns(context))
            .collect(),
    };
    Dataset::from_columns(&columns, Provenance::Uploaded)
}
