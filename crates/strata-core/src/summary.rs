//! Result Summarizer
//!
//! Derives the display-ready metrics a host shows next to a plot. Pure and
//! total: any well-formed [`ResultBundle`] summarizes without failure.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::engine::ResultBundle;

/// Explained variance of one principal component, as a fraction and as a
/// percentage (the two forms the host displays side by side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentVariance {
    pub ratio: f64,
    pub percent: f64,
}

/// Human-readable metrics derived from a result bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum Summary {
    KMeans {
        inertia: f64,
    },
    Dbscan {
        cluster_count: usize,
        noise_count: usize,
    },
    Pca {
        components: Vec<ComponentVariance>,
    },
    Hierarchical {
        cluster_count: usize,
    },
}

/// Summarize a result bundle.
pub fn summarize(result: &ResultBundle) -> Summary {
    match result {
        ResultBundle::KMeans { inertia, .. } => Summary::KMeans { inertia: *inertia },
        ResultBundle::Dbscan { labels } => Summary::Dbscan {
            cluster_count: distinct_clusters(labels),
            noise_count: labels.iter().filter(|&&l| l < 0).count(),
        },
        ResultBundle::Pca {
            explained_variance_ratio,
            ..
        } => Summary::Pca {
            components: explained_variance_ratio
                .iter()
                .map(|&ratio| ComponentVariance {
                    ratio,
                    percent: ratio * 100.0,
                })
                .collect(),
        },
        ResultBundle::Hierarchical { labels, .. } => Summary::Hierarchical {
            cluster_count: distinct_clusters(labels),
        },
    }
}

/// Distinct non-noise labels.
fn distinct_clusters(labels: &[i32]) -> usize {
    labels
        .iter()
        .filter(|&&l| l >= 0)
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kmeans_summary_carries_inertia() {
        let bundle = ResultBundle::KMeans {
            labels: vec![0, 1, 0],
            centroids: vec![vec![0.0], vec![1.0]],
            inertia: 12.5,
        };
        assert_eq!(summarize(&bundle), Summary::KMeans { inertia: 12.5 });
    }

    #[test]
    fn dbscan_summary_separates_clusters_and_noise() {
        let bundle = ResultBundle::Dbscan {
            labels: vec![0, 0, 1, -1, 2, -1, 1],
        };
        assert_eq!(
            summarize(&bundle),
            Summary::Dbscan {
                cluster_count: 3,
                noise_count: 2,
            }
        );
    }

    #[test]
    fn pca_summary_reports_fraction_and_percent() {
        let bundle = ResultBundle::Pca {
            projected: vec![],
            explained_variance_ratio: vec![0.75, 0.2],
        };
        let Summary::Pca { components } = summarize(&bundle) else {
            panic!("wrong summary variant");
        };
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].ratio, 0.75);
        assert_eq!(components[0].percent, 75.0);
        assert_eq!(components[1].percent, 20.0);
    }

    #[test]
    fn hierarchical_summary_counts_clusters() {
        let bundle = ResultBundle::Hierarchical {
            labels: vec![0, 1, 2, 1, 0],
            linkage: vec![],
        };
        assert_eq!(
            summarize(&bundle),
            Summary::Hierarchical { cluster_count: 3 }
        );
    }
}
