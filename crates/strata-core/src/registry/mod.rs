//! Algorithm Registry
//!
//! Static catalog of the four supported algorithms. Each entry carries the
//! display metadata a host needs for its selection and overview widgets,
//! plus the parameter schema the engine validates bindings against.
//!
//! The catalog never changes at runtime; [`lookup`] is a table read.
//!
//! # Example
//!
//! ```rust
//! use strata_core::registry::{self, AlgorithmId, ParameterBinding};
//!
//! let spec = registry::lookup(AlgorithmId::KMeans);
//! assert_eq!(spec.name, "K-Means");
//!
//! let binding = ParameterBinding::defaults(spec);
//! assert_eq!(binding.int("cluster_count"), Some(3));
//! ```

mod types;

use lazy_static::lazy_static;

pub use types::{
    AlgorithmId, AlgorithmSpec, Constraint, ParamValue, ParameterBinding, ParameterSpec,
};

use crate::error::Result;

lazy_static! {
    static ref CATALOG: [AlgorithmSpec; 4] = [
        AlgorithmSpec {
            id: AlgorithmId::KMeans,
            name: "K-Means",
            description: "Partitions data into k clusters by minimizing \
                          within-cluster sum of squares.",
            use_cases: &["Market segmentation", "Image compression"],
            parameters: vec![ParameterSpec {
                name: "cluster_count",
                constraint: Constraint::IntRange { min: 2, max: 8 },
                default: ParamValue::Int(3),
            }],
        },
        AlgorithmSpec {
            id: AlgorithmId::Dbscan,
            name: "DBSCAN",
            description: "Groups together points in high-density areas and \
                          marks outliers as noise.",
            use_cases: &["Anomaly detection", "Clustering irregular shapes"],
            parameters: vec![
                ParameterSpec {
                    name: "epsilon",
                    constraint: Constraint::RealRange {
                        min: 0.1,
                        max: 2.0,
                        step: 0.1,
                    },
                    default: ParamValue::Real(0.5),
                },
                ParameterSpec {
                    name: "min_samples",
                    constraint: Constraint::IntRange { min: 2, max: 20 },
                    default: ParamValue::Int(5),
                },
            ],
        },
        AlgorithmSpec {
            id: AlgorithmId::Pca,
            name: "PCA",
            description: "Reduces dimensionality by finding the principal \
                          components that explain maximum variance.",
            use_cases: &[
                "Data visualization",
                "Feature reduction",
                "Noise reduction",
            ],
            // The upper bound is additionally clamped to the active
            // dataset's feature count at execution time.
            parameters: vec![ParameterSpec {
                name: "component_count",
                constraint: Constraint::IntRange { min: 2, max: 4 },
                default: ParamValue::Int(2),
            }],
        },
        AlgorithmSpec {
            id: AlgorithmId::Hierarchical,
            name: "Hierarchical Clustering",
            description: "Creates a tree of clusters by agglomerative \
                          merging under a linkage criterion.",
            use_cases: &["Taxonomy creation", "Social network analysis"],
            parameters: vec![
                ParameterSpec {
                    name: "cluster_count",
                    constraint: Constraint::IntRange { min: 2, max: 8 },
                    default: ParamValue::Int(3),
                },
                ParameterSpec {
                    name: "linkage_method",
                    constraint: Constraint::Choice(&["ward", "complete", "average"]),
                    default: ParamValue::Choice("ward".to_string()),
                },
            ],
        },
    ];
}

/// Look up the catalog entry for `id`.
pub fn lookup(id: AlgorithmId) -> &'static AlgorithmSpec {
    &CATALOG[match id {
        AlgorithmId::KMeans => 0,
        AlgorithmId::Dbscan => 1,
        AlgorithmId::Pca => 2,
        AlgorithmId::Hierarchical => 3,
    }]
}

/// Look up a catalog entry by string identifier.
///
/// Fails with [`crate::Error::UnknownAlgorithm`] for anything outside the
/// four supported identifiers.
pub fn lookup_str(id: &str) -> Result<&'static AlgorithmSpec> {
    Ok(lookup(id.parse()?))
}

/// All catalog entries, in display order.
pub fn all() -> &'static [AlgorithmSpec] {
    &CATALOG[..]
}
