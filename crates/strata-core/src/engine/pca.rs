//! Principal component analysis
//!
//! Features are standardized (zero mean, unit variance) before the sample
//! covariance matrix is eigendecomposed with the Jacobi algorithm.
//! Components are ordered by decreasing eigenvalue; the output is the
//! standardized data projected onto the top `component_count` components
//! plus the per-component explained-variance ratio.
//!
//! Feature counts here are tiny (the playground caps at a handful), so the
//! Jacobi sweep is more than fast enough and avoids a linear-algebra
//! dependency.

/// Maximum number of Jacobi sweeps.
const MAX_SWEEPS: usize = 100;

/// Fitted PCA projection.
#[derive(Debug, Clone, PartialEq)]
pub struct PcaFit {
    /// Samples projected onto the top components, row-major
    /// `[sample_count][component_count]`.
    pub projected: Vec<Vec<f64>>,
    /// Fraction of total variance captured per retained component,
    /// non-negative and non-increasing.
    pub explained_variance_ratio: Vec<f64>,
}

/// Project `samples` onto `component_count` principal components.
/// Caller guarantees `component_count <= feature count`.
pub fn fit(samples: &[Vec<f64>], component_count: usize) -> PcaFit {
    let n = samples.len();
    let d = samples[0].len();

    let standardized = standardize(samples);
    let covariance = covariance_matrix(&standardized, n, d);
    let (eigenvalues, eigenvectors) = jacobi_eigen(covariance, d);

    // Order components by decreasing eigenvalue. Round-off can leave tiny
    // negative eigenvalues; clamp them for the ratios.
    let mut order: Vec<usize> = (0..d).collect();
    order.sort_by(|&a, &b| {
        eigenvalues[b]
            .partial_cmp(&eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let clamped: Vec<f64> = eigenvalues.iter().map(|&v| v.max(0.0)).collect();
    let total: f64 = clamped.iter().sum();
    let explained_variance_ratio: Vec<f64> = order
        .iter()
        .take(component_count)
        .map(|&i| if total > 0.0 { clamped[i] / total } else { 0.0 })
        .collect();

    let projected = standardized
        .iter()
        .map(|row| {
            order
                .iter()
                .take(component_count)
                .map(|&c| (0..d).map(|j| row[j] * eigenvectors[j * d + c]).sum())
                .collect()
        })
        .collect();

    PcaFit {
        projected,
        explained_variance_ratio,
    }
}

/// Zero mean, unit variance per feature. Zero-spread features stay zero.
fn standardize(samples: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = samples.len() as f64;
    let d = samples[0].len();

    let mut means = vec![0.0; d];
    for row in samples {
        for (m, &v) in means.iter_mut().zip(row) {
            *m += v;
        }
    }
    for m in &mut means {
        *m /= n;
    }

    let mut stds = vec![0.0; d];
    for row in samples {
        for ((s, &v), &m) in stds.iter_mut().zip(row).zip(&means) {
            let dev = v - m;
            *s += dev * dev;
        }
    }
    for s in &mut stds {
        *s = (*s / n).sqrt();
        if *s == 0.0 {
            *s = 1.0;
        }
    }

    samples
        .iter()
        .map(|row| {
            row.iter()
                .zip(&means)
                .zip(&stds)
                .map(|((&v, &m), &s)| (v - m) / s)
                .collect()
        })
        .collect()
}

/// Sample covariance (n - 1 denominator) of centered data, row-major d x d.
fn covariance_matrix(standardized: &[Vec<f64>], n: usize, d: usize) -> Vec<f64> {
    let denom = if n > 1 { (n - 1) as f64 } else { 1.0 };
    let mut cov = vec![0.0; d * d];
    for row in standardized {
        for i in 0..d {
            for j in i..d {
                cov[i * d + j] += row[i] * row[j];
            }
        }
    }
    for i in 0..d {
        for j in i..d {
            cov[i * d + j] /= denom;
            cov[j * d + i] = cov[i * d + j];
        }
    }
    cov
}

/// Jacobi eigendecomposition of a symmetric matrix.
///
/// Returns eigenvalues and the orthogonal eigenvector matrix (row-major,
/// eigenvectors as columns) such that `A = V diag(d) V^T`.
fn jacobi_eigen(mut a: Vec<f64>, d: usize) -> (Vec<f64>, Vec<f64>) {
    let mut v = vec![0.0; d * d];
    for i in 0..d {
        v[i * d + i] = 1.0;
    }

    let tol = f64::EPSILON * 100.0;

    for _ in 0..MAX_SWEEPS {
        let mut off_norm = 0.0;
        for i in 0..d {
            for j in (i + 1)..d {
                off_norm += a[i * d + j] * a[i * d + j];
            }
        }
        if off_norm.sqrt() < tol {
            break;
        }

        for p in 0..d {
            for q in (p + 1)..d {
                let apq = a[p * d + q];
                if apq.abs() < tol {
                    continue;
                }

                let app = a[p * d + p];
                let aqq = a[q * d + q];
                let theta = (aqq - app) / (2.0 * apq);
                let t = if theta >= 0.0 {
                    1.0 / (theta + (1.0 + theta * theta).sqrt())
                } else {
                    -1.0 / (-theta + (1.0 + theta * theta).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;

                // Rotate rows/columns p and q of A.
                for k in 0..d {
                    let akp = a[k * d + p];
                    let akq = a[k * d + q];
                    a[k * d + p] = c * akp - s * akq;
                    a[k * d + q] = s * akp + c * akq;
                }
                for k in 0..d {
                    let apk = a[p * d + k];
                    let aqk = a[q * d + k];
                    a[p * d + k] = c * apk - s * aqk;
                    a[q * d + k] = s * apk + c * aqk;
                }

                // Accumulate the rotation into V.
                for k in 0..d {
                    let vkp = v[k * d + p];
                    let vkq = v[k * d + q];
                    v[k * d + p] = c * vkp - s * vkq;
                    v[k * d + q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues = (0..d).map(|i| a[i * d + i]).collect();
    (eigenvalues, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Correlated 3-D data: the third feature is a noisy copy of the first.
    fn correlated_samples() -> Vec<Vec<f64>> {
        (0..40)
            .map(|i| {
                let x = i as f64 * 0.25;
                let y = (i % 7) as f64;
                vec![x, y, 2.0 * x + 0.01 * (i % 3) as f64]
            })
            .collect()
    }

    #[test]
    fn ratios_are_sorted_and_bounded() {
        let fit = fit(&correlated_samples(), 3);
        let ratios = &fit.explained_variance_ratio;

        assert_eq!(ratios.len(), 3);
        assert!(ratios.iter().all(|&r| r >= 0.0));
        for w in ratios.windows(2) {
            assert!(w[0] >= w[1] - 1e-12);
        }
        let sum: f64 = ratios.iter().sum();
        assert!(sum <= 1.0 + 1e-9);
    }

    #[test]
    fn full_rank_projection_preserves_all_variance() {
        let fit = fit(&correlated_samples(), 3);
        let sum: f64 = fit.explained_variance_ratio.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "ratio sum was {sum}");
    }

    #[test]
    fn projection_has_requested_shape() {
        let samples = correlated_samples();
        let fit = fit(&samples, 2);
        assert_eq!(fit.projected.len(), samples.len());
        assert!(fit.projected.iter().all(|r| r.len() == 2));
        assert_eq!(fit.explained_variance_ratio.len(), 2);
    }

    #[test]
    fn first_component_dominates_correlated_data() {
        // Features 0 and 2 are almost perfectly correlated, so the first
        // component captures well over half of the variance.
        let fit = fit(&correlated_samples(), 3);
        assert!(fit.explained_variance_ratio[0] > 0.5);
    }

    #[test]
    fn jacobi_recovers_known_eigenvalues() {
        // Eigenvalues of [[2,1],[1,3]] are (5 +/- sqrt(5)) / 2.
        let (mut values, _) = jacobi_eigen(vec![2.0, 1.0, 1.0, 3.0], 2);
        values.sort_by(|a, b| b.partial_cmp(a).unwrap());
        let hi = (5.0 + 5.0_f64.sqrt()) / 2.0;
        let lo = (5.0 - 5.0_f64.sqrt()) / 2.0;
        assert!((values[0] - hi).abs() < 1e-10);
        assert!((values[1] - lo).abs() < 1e-10);
    }

    #[test]
    fn zero_spread_feature_does_not_blow_up() {
        let samples: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, 5.0]).collect();
        let fit = fit(&samples, 2);
        assert!(fit
            .projected
            .iter()
            .flatten()
            .all(|v| v.is_finite()));
        // The constant feature contributes no variance.
        assert!((fit.explained_variance_ratio[0] - 1.0).abs() < 1e-9);
    }
}
