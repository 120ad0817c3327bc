//! DBSCAN density-based clustering
//!
//! A sample is a core point if its epsilon-neighborhood (itself included)
//! holds at least `min_samples` points. Clusters grow from core points by
//! density-connectivity; everything neither core nor reachable is noise.
//!
//! Cluster numbering follows discovery order and carries no meaning beyond
//! partition membership; noise is always `-1`.

use std::collections::VecDeque;

use crate::engine::distance::euclidean;

/// Label reserved for noise points.
pub const NOISE: i32 = -1;

/// Cluster `samples` with radius `epsilon` and density threshold
/// `min_samples`. Returns one label per sample.
pub fn fit(samples: &[Vec<f64>], epsilon: f64, min_samples: usize) -> Vec<i32> {
    let n = samples.len();
    let mut labels: Vec<Option<i32>> = vec![None; n];
    let mut next_cluster = 0i32;

    for i in 0..n {
        if labels[i].is_some() {
            continue;
        }

        let neighbors = region_query(samples, i, epsilon);
        if neighbors.len() < min_samples {
            labels[i] = Some(NOISE);
            continue;
        }

        let cluster = next_cluster;
        next_cluster += 1;
        labels[i] = Some(cluster);

        let mut queue: VecDeque<usize> = neighbors.into();
        while let Some(j) = queue.pop_front() {
            match labels[j] {
                // Noise becomes a border point of this cluster.
                Some(NOISE) => labels[j] = Some(cluster),
                // Already claimed by this or an earlier cluster.
                Some(_) => continue,
                None => {
                    labels[j] = Some(cluster);
                    let reachable = region_query(samples, j, epsilon);
                    if reachable.len() >= min_samples {
                        queue.extend(reachable);
                    }
                }
            }
        }
    }

    labels.into_iter().map(|l| l.unwrap_or(NOISE)).collect()
}

/// Indices within `epsilon` of sample `center`, including `center` itself.
fn region_query(samples: &[Vec<f64>], center: usize, epsilon: f64) -> Vec<usize> {
    samples
        .iter()
        .enumerate()
        .filter(|(_, s)| euclidean(&samples[center], s) <= epsilon)
        .map(|(j, _)| j)
        .collect()
}
