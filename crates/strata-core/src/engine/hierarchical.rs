//! Agglomerative hierarchical clustering
//!
//! Builds the full merge sequence over a pairwise distance matrix with
//! Lance-Williams updates for the supported linkage methods, then cuts the
//! sequence to the requested flat cluster count. The merge sequence is
//! returned alongside the labels so a host can draw the dendrogram.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::distance::euclidean;
use crate::error::Error;

/// Rule for measuring distance between clusters while merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkageMethod {
    /// Minimize the increase in total within-cluster variance.
    Ward,
    /// Maximum pairwise distance between clusters.
    Complete,
    /// Mean pairwise distance between clusters.
    Average,
}

impl LinkageMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ward => "ward",
            Self::Complete => "complete",
            Self::Average => "average",
        }
    }
}

impl FromStr for LinkageMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "ward" => Ok(Self::Ward),
            "complete" => Ok(Self::Complete),
            "average" => Ok(Self::Average),
            other => Err(Error::invalid_parameter(
                "linkage_method",
                format!("'{other}' is not one of: ward, complete, average"),
            )),
        }
    }
}

/// One step of the merge sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merge {
    /// Index of the absorbing cluster (lowest original sample index).
    pub left: usize,
    /// Index of the absorbed cluster.
    pub right: usize,
    /// Linkage distance at which the merge happened.
    pub distance: f64,
    /// Size of the merged cluster.
    pub size: usize,
}

/// Fitted hierarchical clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchicalFit {
    /// Per-sample flat label in `[0, cluster_count)`.
    pub labels: Vec<i32>,
    /// Full merge sequence, `sample_count - 1` entries.
    pub merges: Vec<Merge>,
}

/// Cluster `samples` into `cluster_count` flat clusters under `method`.
/// Caller guarantees `2 <= cluster_count <= samples.len()`.
pub fn fit(samples: &[Vec<f64>], cluster_count: usize, method: LinkageMethod) -> HierarchicalFit {
    let merges = linkage(samples, method);
    let labels = cut(samples.len(), &merges, cluster_count);
    HierarchicalFit { labels, merges }
}

/// Build the complete merge sequence.
pub fn linkage(samples: &[Vec<f64>], method: LinkageMethod) -> Vec<Merge> {
    let n = samples.len();
    if n < 2 {
        return Vec::new();
    }

    let mut dist = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean(&samples[i], &samples[j]);
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }

    let mut active = vec![true; n];
    let mut sizes = vec![1usize; n];
    let mut merges = Vec::with_capacity(n - 1);

    for _ in 0..(n - 1) {
        // Closest pair of active clusters.
        let mut min_dist = f64::MAX;
        let (mut a, mut b) = (0, 0);
        for i in 0..n {
            if !active[i] {
                continue;
            }
            for j in (i + 1)..n {
                if active[j] && dist[i][j] < min_dist {
                    min_dist = dist[i][j];
                    a = i;
                    b = j;
                }
            }
        }

        let (size_a, size_b) = (sizes[a], sizes[b]);
        let merged_size = size_a + size_b;

        // Lance-Williams update of distances from the merged cluster
        // (kept at index `a`) to every other active cluster.
        for k in 0..n {
            if !active[k] || k == a || k == b {
                continue;
            }
            let d_ak = dist[a][k];
            let d_bk = dist[b][k];
            let updated = match method {
                LinkageMethod::Complete => d_ak.max(d_bk),
                LinkageMethod::Average => {
                    (size_a as f64 * d_ak + size_b as f64 * d_bk) / merged_size as f64
                }
                LinkageMethod::Ward => {
                    let (na, nb, nk) = (size_a as f64, size_b as f64, sizes[k] as f64);
                    let total = na + nb + nk;
                    (((na + nk) * d_ak * d_ak + (nb + nk) * d_bk * d_bk
                        - nk * min_dist * min_dist)
                        / total)
                        .sqrt()
                }
            };
            dist[a][k] = updated;
            dist[k][a] = updated;
        }

        active[b] = false;
        sizes[a] = merged_size;
        merges.push(Merge {
            left: a,
            right: b,
            distance: min_dist,
            size: merged_size,
        });
    }

    merges
}

/// Flat labels from cutting the merge sequence at `cluster_count` clusters.
/// Labels are renumbered to be contiguous in first-occurrence order.
pub fn cut(sample_count: usize, merges: &[Merge], cluster_count: usize) -> Vec<i32> {
    let mut labels: Vec<usize> = (0..sample_count).collect();
    let applied = sample_count.saturating_sub(cluster_count).min(merges.len());

    for merge in &merges[..applied] {
        let from = labels[merge.right];
        let into = labels[merge.left];
        for label in &mut labels {
            if *label == from {
                *label = into;
            }
        }
    }

    let mut renumber: HashMap<usize, i32> = HashMap::new();
    labels
        .into_iter()
        .map(|l| {
            let next = renumber.len() as i32;
            *renumber.entry(l).or_insert(next)
        })
        .collect()
}
