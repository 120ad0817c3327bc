//! Strata Core Engine
//!
//! Session/state management and execution dispatch for an interactive
//! unsupervised-learning playground. A host UI supplies user choices
//! (algorithm, parameters, uploads, action triggers); this crate resolves
//! the active dataset, validates parameter bindings against the algorithm
//! catalog, runs the computation deterministically, and derives the
//! display-ready summary metrics. Rendering is the host's problem: the
//! core emits numeric and structural data only.
//!
//! Four algorithm families are supported: K-Means, DBSCAN, PCA, and
//! agglomerative hierarchical clustering.
//!
//! # Example
//!
//! ```rust
//! use strata_core::registry::{self, AlgorithmId, ParameterBinding};
//! use strata_core::session::Session;
//!
//! let mut session = Session::new();
//! session.switch_context(AlgorithmId::KMeans);
//!
//! // "Generate Sample Data"
//! session.generate().unwrap();
//!
//! // "Run K-Means" with the catalog defaults
//! let binding = ParameterBinding::defaults(registry::lookup(AlgorithmId::KMeans));
//! let output = session.run(&binding).unwrap();
//! assert_eq!(output.points.len(), 300);
//! ```

pub mod dataset;
pub mod engine;
pub mod error;
pub mod registry;
pub mod session;
pub mod summary;

// Re-export main types at crate root
pub use dataset::{Dataset, Provenance, ResolveRequest, UploadedTable};
pub use engine::{execute, LinkageMethod, Merge, ResultBundle};
pub use error::{Error, Result};
pub use registry::{AlgorithmId, AlgorithmSpec, ParamValue, ParameterBinding, ParameterSpec};
pub use session::{Phase, RunOutput, Session, SessionState};
pub use summary::{summarize, ComponentVariance, Summary};
