//! K-Means clustering (Lloyd's algorithm)
//!
//! k-means++ initialization from a seeded RNG, multiple restarts with
//! derived seeds, lowest-inertia run kept. Fully deterministic for a given
//! (data, k, seed) triple.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::distance::squared_euclidean;

/// Default initialization seed for playground executions.
pub const KMEANS_SEED: u64 = 42;

/// Iteration cap per restart.
const MAX_ITERATIONS: usize = 300;

/// Convergence tolerance on inertia change.
const TOLERANCE: f64 = 1e-4;

/// Number of restarts; the lowest-inertia run wins.
const RESTARTS: usize = 10;

/// Fitted K-Means model.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// Per-sample cluster label in `[0, k)`.
    pub labels: Vec<i32>,
    /// One centroid per cluster, indexed by label.
    pub centroids: Vec<Vec<f64>>,
    /// Sum of squared distances of each sample to its assigned centroid.
    pub inertia: f64,
}

/// Fit `k` clusters to `samples`. Caller guarantees `2 <= k <= samples.len()`.
pub fn fit(samples: &[Vec<f64>], k: usize, seed: u64) -> KMeansFit {
    let mut best: Option<KMeansFit> = None;
    for restart in 0..RESTARTS {
        let (fit, _) = fit_single(samples, k, seed.wrapping_add(restart as u64));
        if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
            best = Some(fit);
        }
    }
    // RESTARTS > 0, so at least one run happened.
    best.unwrap_or_else(|| fit_single(samples, k, seed).0)
}

/// One Lloyd run. Also returns the per-iteration inertia trace.
fn fit_single(samples: &[Vec<f64>], k: usize, seed: u64) -> (KMeansFit, Vec<f64>) {
    let dims = samples[0].len();
    let mut centroids = plus_plus_init(samples, k, seed);
    let mut labels = vec![0i32; samples.len()];
    let mut trace = Vec::new();
    let mut prev_inertia = f64::MAX;

    for _ in 0..MAX_ITERATIONS {
        // Assignment step
        for (i, sample) in samples.iter().enumerate() {
            labels[i] = nearest_centroid(sample, &centroids) as i32;
        }

        // Update step
        let mut sums = vec![vec![0.0; dims]; k];
        let mut counts = vec![0usize; k];
        for (sample, &label) in samples.iter().zip(&labels) {
            counts[label as usize] += 1;
            for (s, &v) in sums[label as usize].iter_mut().zip(sample) {
                *s += v;
            }
        }
        let mut updated = Vec::with_capacity(k);
        for (sum, &count) in sums.iter().zip(&counts) {
            if count > 0 {
                updated.push(sum.iter().map(|s| s / count as f64).collect());
            } else {
                // Empty cluster: move its centroid to the sample farthest
                // from its current assignment. Deterministic, unlike a
                // random reseed.
                updated.push(farthest_sample(samples, &labels, &centroids).to_vec());
            }
        }
        centroids = updated;

        let inertia = total_inertia(samples, &labels, &centroids);
        trace.push(inertia);

        if (prev_inertia - inertia).abs() < TOLERANCE {
            break;
        }
        prev_inertia = inertia;
    }

    let inertia = trace.last().copied().unwrap_or(0.0);
    (
        KMeansFit {
            labels,
            centroids,
            inertia,
        },
        trace,
    )
}

/// k-means++ seeding: first centroid uniform, the rest weighted by squared
/// distance to the nearest centroid chosen so far.
fn plus_plus_init(samples: &[Vec<f64>], k: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(k);
    centroids.push(samples[rng.gen_range(0..samples.len())].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = samples
            .iter()
            .map(|s| {
                centroids
                    .iter()
                    .map(|c| squared_euclidean(s, c))
                    .fold(f64::MAX, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            // All samples coincide with centroids already.
            centroids.push(samples[rng.gen_range(0..samples.len())].clone());
            continue;
        }

        let threshold = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        let mut chosen = samples.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if cumulative >= threshold {
                chosen = i;
                break;
            }
        }
        centroids.push(samples[chosen].clone());
    }

    centroids
}

fn nearest_centroid(sample: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::MAX;
    for (i, c) in centroids.iter().enumerate() {
        let d = squared_euclidean(sample, c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

fn total_inertia(samples: &[Vec<f64>], labels: &[i32], centroids: &[Vec<f64>]) -> f64 {
    samples
        .iter()
        .zip(labels)
        .map(|(s, &l)| squared_euclidean(s, &centroids[l as usize]))
        .sum()
}

/// Sample with the largest distance to its assigned centroid.
fn farthest_sample<'a>(
    samples: &'a [Vec<f64>],
    labels: &[i32],
    centroids: &[Vec<f64>],
) -> &'a [f64] {
    let mut best = 0;
    let mut best_dist = -1.0;
    for (i, (s, &l)) in samples.iter().zip(labels).enumerate() {
        let d = squared_euclidean(s, &centroids[l as usize]);
        if d > best_dist {
            best_dist = d;
            best = i;
        }
    }
    &samples[best]
}
