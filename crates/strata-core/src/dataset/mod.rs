//! Datasets: types, synthesis, and source resolution
//!
//! A [`Dataset`] is an ordered sequence of fixed-length numeric samples
//! tagged with its [`Provenance`]. The [`resolver`] decides which of the
//! competing sources (upload, generation, session cache) is active for a
//! given playground context; [`synth`] produces the Gaussian-blob sample
//! data behind the "Generate" action.

pub mod resolver;
pub mod synth;
mod types;

pub use resolver::{resolve, ResolveRequest};
pub use synth::{generate_blobs, SynthesisConfig, GENERATION_SEED};
pub use types::{Column, ColumnValues, Dataset, Provenance, UploadedTable};
