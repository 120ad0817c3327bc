//! Synthetic dataset generation
//!
//! Isotropic Gaussian blobs for the playground's "Generate Sample Data"
//! action. The seed is pinned per configuration so repeated generation is
//! bit-identical, which keeps the action idempotent and the tests exact.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::dataset::types::{Dataset, Provenance};
use crate::error::{Error, Result};
use crate::registry::AlgorithmId;

/// Seed used for every playground generation request.
pub const GENERATION_SEED: u64 = 0;

/// Blob centers are drawn uniformly from this box, per coordinate.
const CENTER_BOX: f64 = 10.0;

/// Configuration for one blob synthesis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisConfig {
    /// Total number of samples, split as evenly as possible across centers
    /// (remainder goes to the first centers).
    pub sample_count: usize,
    /// Number of Gaussian centers.
    pub center_count: usize,
    /// Standard deviation of each blob.
    pub spread: f64,
    /// Dimensionality of the samples.
    pub feature_count: usize,
    /// RNG seed; identical configurations produce identical datasets.
    pub seed: u64,
}

impl SynthesisConfig {
    /// The playground defaults for `context`: 300 samples (100 for the
    /// hierarchical context) in 2 features (4 for PCA), 4 centers,
    /// spread 0.60.
    pub fn for_context(context: AlgorithmId) -> Self {
        let (sample_count, feature_count) = match context {
            AlgorithmId::Hierarchical => (100, 2),
            AlgorithmId::Pca => (300, 4),
            AlgorithmId::KMeans | AlgorithmId::Dbscan => (300, 2),
        };
        Self {
            sample_count,
            center_count: 4,
            spread: 0.60,
            feature_count,
            seed: GENERATION_SEED,
        }
    }
}

/// Generate isotropic Gaussian clusters.
pub fn generate_blobs(config: &SynthesisConfig) -> Result<Dataset> {
    let noise = Normal::new(0.0, config.spread).map_err(|_| {
        Error::invalid_parameter("spread", "must be a finite, non-negative number")
    })?;

    let mut rng = StdRng::seed_from_u64(config.seed);

    let centers: Vec<Vec<f64>> = (0..config.center_count)
        .map(|_| {
            (0..config.feature_count)
                .map(|_| rng.gen_range(-CENTER_BOX..CENTER_BOX))
                .collect()
        })
        .collect();

    let mut rows = Vec::with_capacity(config.sample_count);
    for (c, center) in centers.iter().enumerate() {
        let count = samples_for_center(config.sample_count, config.center_count, c);
        for _ in 0..count {
            let row = center
                .iter()
                .map(|&coord| coord + noise.sample(&mut rng))
                .collect();
            rows.push(row);
        }
    }

    Ok(Dataset::from_rows(rows, Provenance::Generated))
}

/// Even split with the remainder assigned to the first centers.
fn samples_for_center(total: usize, centers: usize, index: usize) -> usize {
    let base = total / centers;
    if index < total % centers {
        base + 1
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generation_matches_requested_shape() {
        let config = SynthesisConfig::for_context(AlgorithmId::KMeans);
        let d = generate_blobs(&config).unwrap();
        assert_eq!(d.sample_count(), 300);
        assert_eq!(d.feature_count(), 2);
        assert_eq!(d.provenance(), Provenance::Generated);
    }

    #[test]
    fn pca_context_gets_four_features() {
        let config = SynthesisConfig::for_context(AlgorithmId::Pca);
        let d = generate_blobs(&config).unwrap();
        assert_eq!(d.feature_count(), 4);
    }

    #[test]
    fn hierarchical_context_gets_fewer_samples() {
        let config = SynthesisConfig::for_context(AlgorithmId::Hierarchical);
        assert_eq!(generate_blobs(&config).unwrap().sample_count(), 100);
    }

    #[test]
    fn pinned_seed_is_idempotent() {
        let config = SynthesisConfig::for_context(AlgorithmId::Dbscan);
        let a = generate_blobs(&config).unwrap();
        let b = generate_blobs(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let mut config = SynthesisConfig::for_context(AlgorithmId::KMeans);
        let a = generate_blobs(&config).unwrap();
        config.seed = 1;
        let b = generate_blobs(&config).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn uneven_split_assigns_remainder_to_first_centers() {
        assert_eq!(samples_for_center(10, 4, 0), 3);
        assert_eq!(samples_for_center(10, 4, 1), 3);
        assert_eq!(samples_for_center(10, 4, 2), 2);
        assert_eq!(samples_for_center(10, 4, 3), 2);
    }
}
