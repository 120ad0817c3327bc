//! Execution Engine
//!
//! Binds a resolved dataset, a catalog entry, and a validated parameter
//! binding into one computation. The engine is stateless and reentrant:
//! every call is a pure function of its inputs, and every failure is
//! reported before any work happens so callers can keep their state.

pub mod dbscan;
mod distance;
pub mod hierarchical;
pub mod kmeans;
pub mod pca;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::registry::{self, AlgorithmId, ParameterBinding};

pub use hierarchical::{LinkageMethod, Merge};

/// Output of one execution, shaped by the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum ResultBundle {
    /// K-Means partition with centroids and inertia.
    KMeans {
        labels: Vec<i32>,
        centroids: Vec<Vec<f64>>,
        inertia: f64,
    },
    /// DBSCAN partition; `-1` is noise.
    Dbscan { labels: Vec<i32> },
    /// PCA projection with per-component explained variance.
    Pca {
        projected: Vec<Vec<f64>>,
        explained_variance_ratio: Vec<f64>,
    },
    /// Hierarchical partition with the merge sequence for dendrogram display.
    Hierarchical {
        labels: Vec<i32>,
        linkage: Vec<Merge>,
    },
}

impl ResultBundle {
    /// The algorithm that produced this bundle.
    pub fn algorithm(&self) -> AlgorithmId {
        match self {
            Self::KMeans { .. } => AlgorithmId::KMeans,
            Self::Dbscan { .. } => AlgorithmId::Dbscan,
            Self::Pca { .. } => AlgorithmId::Pca,
            Self::Hierarchical { .. } => AlgorithmId::Hierarchical,
        }
    }
}

/// Execute `algorithm` on `dataset` with `binding`.
///
/// Fails with [`Error::InvalidParameter`] if the binding violates its
/// schema (including PCA's component count against the dataset's feature
/// count, which is re-validated here on every execution rather than
/// trusting stale UI bounds), or [`Error::InsufficientData`] if the dataset
/// is too small for the bound parameters.
pub fn execute(
    algorithm: AlgorithmId,
    dataset: &Dataset,
    binding: &ParameterBinding,
) -> Result<ResultBundle> {
    let spec = registry::lookup(algorithm);
    binding.validate(spec)?;

    let samples = dataset.samples();
    let bundle = match algorithm {
        AlgorithmId::KMeans => {
            let k = binding.int("cluster_count").unwrap_or_default() as usize;
            require_samples(dataset, 2 * k)?;
            let fit = kmeans::fit(samples, k, kmeans::KMEANS_SEED);
            ResultBundle::KMeans {
                labels: fit.labels,
                centroids: fit.centroids,
                inertia: fit.inertia,
            }
        }
        AlgorithmId::Dbscan => {
            let epsilon = binding.real("epsilon").unwrap_or_default();
            let min_samples = binding.int("min_samples").unwrap_or_default() as usize;
            require_samples(dataset, min_samples)?;
            ResultBundle::Dbscan {
                labels: dbscan::fit(samples, epsilon, min_samples),
            }
        }
        AlgorithmId::Pca => {
            let components = binding.int("component_count").unwrap_or_default() as usize;
            if components > dataset.feature_count() {
                return Err(Error::invalid_parameter(
                    "component_count",
                    format!(
                        "{components} exceeds the active dataset's {} features",
                        dataset.feature_count()
                    ),
                ));
            }
            require_samples(dataset, components)?;
            let fit = pca::fit(samples, components);
            ResultBundle::Pca {
                projected: fit.projected,
                explained_variance_ratio: fit.explained_variance_ratio,
            }
        }
        AlgorithmId::Hierarchical => {
            let c = binding.int("cluster_count").unwrap_or_default() as usize;
            // Constraint validation guarantees the choice parses.
            let method: LinkageMethod = binding
                .choice("linkage_method")
                .unwrap_or("ward")
                .parse()?;
            require_samples(dataset, 2 * c)?;
            let fit = hierarchical::fit(samples, c, method);
            ResultBundle::Hierarchical {
                labels: fit.labels,
                linkage: fit.merges,
            }
        }
    };

    debug!(
        algorithm = %algorithm,
        samples = dataset.sample_count(),
        "execution complete"
    );
    Ok(bundle)
}

fn require_samples(dataset: &Dataset, required: usize) -> Result<()> {
    if dataset.sample_count() < required {
        return Err(Error::InsufficientData {
            required,
            actual: dataset.sample_count(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Provenance;
    use crate::registry::ParamValue;

    fn dataset(rows: usize) -> Dataset {
        let samples = (0..rows)
            .map(|i| vec![(i % 10) as f64, (i / 10) as f64])
            .collect();
        Dataset::from_rows(samples, Provenance::Generated)
    }

    fn defaults(id: AlgorithmId) -> ParameterBinding {
        ParameterBinding::defaults(registry::lookup(id))
    }

    #[test]
    fn kmeans_defaults_execute() {
        let bundle = execute(AlgorithmId::KMeans, &dataset(30), &defaults(AlgorithmId::KMeans))
            .unwrap();
        match bundle {
            ResultBundle::KMeans {
                labels, centroids, ..
            } => {
                assert_eq!(labels.len(), 30);
                assert_eq!(centroids.len(), 3);
            }
            other => panic!("unexpected bundle: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_cluster_count_is_invalid() {
        let binding = defaults(AlgorithmId::KMeans).set("cluster_count", ParamValue::Int(1));
        let err = execute(AlgorithmId::KMeans, &dataset(30), &binding).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "cluster_count"));
    }

    #[test]
    fn unknown_binding_name_is_invalid() {
        let binding = defaults(AlgorithmId::KMeans).set("epsilon", ParamValue::Real(0.5));
        let err = execute(AlgorithmId::KMeans, &dataset(30), &binding).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "epsilon"));
    }

    #[test]
    fn missing_binding_is_invalid() {
        let err = execute(
            AlgorithmId::Dbscan,
            &dataset(30),
            &ParameterBinding::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn dbscan_needs_min_samples_rows() {
        let binding = defaults(AlgorithmId::Dbscan).set("min_samples", ParamValue::Int(20));
        let err = execute(AlgorithmId::Dbscan, &dataset(10), &binding).unwrap_err();
        assert!(
            matches!(err, Error::InsufficientData { required: 20, actual: 10 }),
            "got {err:?}"
        );
    }

    #[test]
    fn kmeans_needs_twice_cluster_count_rows() {
        let binding = defaults(AlgorithmId::KMeans).set("cluster_count", ParamValue::Int(8));
        let err = execute(AlgorithmId::KMeans, &dataset(15), &binding).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { required: 16, .. }));
    }

    #[test]
    fn pca_component_count_is_checked_against_dataset() {
        // Schema allows 4 components, but the 2-feature dataset does not.
        let binding = defaults(AlgorithmId::Pca).set("component_count", ParamValue::Int(4));
        let err = execute(AlgorithmId::Pca, &dataset(30), &binding).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "component_count"));
    }

    #[test]
    fn hierarchical_defaults_execute() {
        let bundle = execute(
            AlgorithmId::Hierarchical,
            &dataset(20),
            &defaults(AlgorithmId::Hierarchical),
        )
        .unwrap();
        match bundle {
            ResultBundle::Hierarchical { labels, linkage } => {
                assert_eq!(labels.len(), 20);
                assert_eq!(linkage.len(), 19);
            }
            other => panic!("unexpected bundle: {other:?}"),
        }
    }
}
