//! Gaussian Process (GP) surrogate with a Matérn 5/2 kernel.
//!
//! Observations are standardized (zero mean, unit variance) and a GP with an
//! ARD **Matérn 5/2** kernel is fitted via Cholesky decomposition. ARD
//! lengthscales default to the per-dimension standard deviation of the
//! training inputs, floored at `min_lengthscale`. Predictions are mapped back
//! to the original output scale.
//!
//! At most `max_train_points` observations (the most recent ones) are used
//! to keep the O(n³) fitting cost manageable.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `noise_variance` | 1e-6 | Observation noise added to the kernel diagonal (standardized units) |
//! | `max_train_points` | 100 | Most recent observations used for fitting |
//! | `min_lengthscale` | 1e-2 | Floor for the data-derived lengthscales |
//! | `lengthscales` | data-derived | Fixed per-dimension lengthscales |
//!
//! # Feature flag
//!
//! Requires the **`gp`** feature (on by default; adds the `nalgebra`
//! dependency).
//!
//! # Examples
//!
//! ```
//! use bayesopt::surrogate::{GaussianProcess, Surrogate};
//! use bayesopt::Observations;
//!
//! let data = Observations::new(
//!     vec![vec![0.0], vec![0.5], vec![1.0]],
//!     vec![0.0, 1.0, 0.0],
//! )
//! .unwrap();
//!
//! let mut gp = GaussianProcess::builder().noise_variance(1e-8).build();
//! gp.update(&data).unwrap();
//!
//! let prediction = gp.evaluate(&[vec![0.5], vec![0.25]]).unwrap();
//! assert!((prediction.means[0] - 1.0).abs() < 1e-3);
//! assert!(prediction.stds[1] > prediction.stds[0]);
//! ```

use nalgebra::{DMatrix, DVector};

use super::{Prediction, Surrogate};
use crate::observations::Observations;
use crate::types::Point;
use crate::{Error, Result};

/// Default observation noise variance.
const DEFAULT_NOISE_VAR: f64 = 1e-6;
/// Default cap on training points.
const DEFAULT_MAX_TRAIN_POINTS: usize = 100;
/// Default floor for data-derived lengthscales.
const DEFAULT_MIN_LENGTHSCALE: f64 = 1e-2;

/// Precomputed √5 constant.
const SQRT_5: f64 = 2.236_067_977_499_79;

/// Gaussian Process regressor usable as a campaign [`Surrogate`].
pub struct GaussianProcess {
    noise_variance: f64,
    max_train_points: usize,
    min_lengthscale: f64,
    fixed_lengthscales: Option<Vec<f64>>,
    model: Option<GpModel>,
}

impl GaussianProcess {
    /// Creates a GP with default settings.
    #[must_use]
    pub fn new() -> Self {
        GaussianProcessBuilder::new().build()
    }

    /// Creates a builder for configuring a `GaussianProcess`.
    #[must_use]
    pub fn builder() -> GaussianProcessBuilder {
        GaussianProcessBuilder::new()
    }

    /// Returns `true` once [`update`](Surrogate::update) has succeeded.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// The lengthscales of the fitted model.
    #[must_use]
    pub fn lengthscales(&self) -> Option<&[f64]> {
        self.model.as_ref().map(|m| m.lengthscales.as_slice())
    }
}

impl Default for GaussianProcess {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`GaussianProcess`].
///
/// # Examples
///
/// ```
/// use bayesopt::surrogate::GaussianProcessBuilder;
///
/// let gp = GaussianProcessBuilder::new()
///     .noise_variance(1e-4)
///     .max_train_points(50)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct GaussianProcessBuilder {
    noise_variance: Option<f64>,
    max_train_points: Option<usize>,
    min_lengthscale: Option<f64>,
    lengthscales: Option<Vec<f64>>,
}

impl GaussianProcessBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the observation noise variance added to the kernel diagonal.
    ///
    /// Larger values make the GP smoother. Default: 1e-6.
    #[must_use]
    pub fn noise_variance(mut self, v: f64) -> Self {
        self.noise_variance = Some(v);
        self
    }

    /// Sets how many of the most recent observations are used for fitting.
    ///
    /// Default: 100.
    #[must_use]
    pub fn max_train_points(mut self, n: usize) -> Self {
        self.max_train_points = Some(n);
        self
    }

    /// Sets the floor applied to data-derived lengthscales. Default: 1e-2.
    #[must_use]
    pub fn min_lengthscale(mut self, l: f64) -> Self {
        self.min_lengthscale = Some(l);
        self
    }

    /// Fixes the per-dimension lengthscales instead of deriving them.
    #[must_use]
    pub fn lengthscales(mut self, lengthscales: Vec<f64>) -> Self {
        self.lengthscales = Some(lengthscales);
        self
    }

    /// Builds the configured [`GaussianProcess`].
    #[must_use]
    pub fn build(self) -> GaussianProcess {
        GaussianProcess {
            noise_variance: self.noise_variance.unwrap_or(DEFAULT_NOISE_VAR),
            max_train_points: self
                .max_train_points
                .unwrap_or(DEFAULT_MAX_TRAIN_POINTS)
                .max(1),
            min_lengthscale: self.min_lengthscale.unwrap_or(DEFAULT_MIN_LENGTHSCALE),
            fixed_lengthscales: self.lengthscales,
            model: None,
        }
    }
}

/// A fitted GP ready for predictions.
struct GpModel {
    /// Cholesky factor L of K + σ²I.
    cholesky: nalgebra::linalg::Cholesky<f64, nalgebra::Dyn>,
    /// α = (K + σ²I)^{-1} y.
    alpha: DVector<f64>,
    x_train: Vec<Point>,
    lengthscales: Vec<f64>,
    signal_var: f64,
    y_mean: f64,
    y_std: f64,
}

/// Matérn 5/2 kernel with ARD lengthscales.
///
/// `k(x1, x2) = σ² (1 + √5 r + 5/3 r²) exp(-√5 r)`
/// where `r = sqrt(Σ ((x1_i - x2_i) / l_i)²)`
fn matern52(x1: &[f64], x2: &[f64], lengthscales: &[f64], signal_var: f64) -> f64 {
    let r_sq: f64 = x1
        .iter()
        .zip(x2)
        .zip(lengthscales)
        .map(|((a, b), l)| ((a - b) / l).powi(2))
        .sum();
    let sqrt5_r = SQRT_5 * r_sq.sqrt();
    signal_var * (1.0 + sqrt5_r + 5.0 / 3.0 * r_sq) * (-sqrt5_r).exp()
}

/// Build the kernel matrix `K + σ²I`.
fn kernel_matrix(
    x: &[Point],
    lengthscales: &[f64],
    signal_var: f64,
    noise_var: f64,
) -> DMatrix<f64> {
    let n = x.len();
    DMatrix::from_fn(n, n, |i, j| {
        let k = matern52(&x[i], &x[j], lengthscales, signal_var);
        if i == j { k + noise_var } else { k }
    })
}

/// Compute the kernel vector k(x*, X) for a test point.
fn kernel_vector(
    x_star: &[f64],
    x_train: &[Point],
    lengthscales: &[f64],
    signal_var: f64,
) -> DVector<f64> {
    DVector::from_fn(x_train.len(), |i, _| {
        matern52(x_star, &x_train[i], lengthscales, signal_var)
    })
}

impl GaussianProcess {
    #[allow(clippy::cast_precision_loss)]
    fn fit(&self, x_train: &[Point], y_train: &[f64]) -> Result<GpModel> {
        let n = y_train.len();
        let d = x_train.first().map_or(0, Vec::len);

        // Standardize y
        let y_mean = y_train.iter().sum::<f64>() / n as f64;
        let y_var = if n > 1 {
            y_train.iter().map(|&y| (y - y_mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            1.0
        };
        let y_std = y_var.sqrt().max(1e-10);
        let y_standardized: Vec<f64> = y_train.iter().map(|&y| (y - y_mean) / y_std).collect();

        let lengthscales = match &self.fixed_lengthscales {
            Some(fixed) if fixed.len() == d => fixed.clone(),
            Some(fixed) => {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    got: fixed.len(),
                    index: 0,
                });
            }
            None => (0..d)
                .map(|j| {
                    let mean_j = x_train.iter().map(|x| x[j]).sum::<f64>() / n as f64;
                    let var_j =
                        x_train.iter().map(|x| (x[j] - mean_j).powi(2)).sum::<f64>() / n as f64;
                    var_j.sqrt().max(self.min_lengthscale)
                })
                .collect(),
        };

        // Signal variance = 1.0 (data is standardized)
        let signal_var = 1.0;

        let k = kernel_matrix(x_train, &lengthscales, signal_var, self.noise_variance);
        let cholesky = nalgebra::linalg::Cholesky::new(k).ok_or_else(|| {
            Error::Surrogate("kernel matrix is not positive definite".to_string())
        })?;
        let alpha = cholesky.solve(&DVector::from_column_slice(&y_standardized));

        Ok(GpModel {
            cholesky,
            alpha,
            x_train: x_train.to_vec(),
            lengthscales,
            signal_var,
            y_mean,
            y_std,
        })
    }
}

impl GpModel {
    /// Predict mean and standard deviation at a point, in original units.
    fn predict(&self, x: &[f64]) -> (f64, f64) {
        let k_star = kernel_vector(x, &self.x_train, &self.lengthscales, self.signal_var);

        // Mean: k*^T α
        let mean = k_star.dot(&self.alpha);

        // Variance: k(x*, x*) - k*^T (K + σ²I)^{-1} k*
        let v = self.cholesky.solve(&k_star);
        let var = (self.signal_var - k_star.dot(&v)).max(0.0);

        (mean * self.y_std + self.y_mean, var.sqrt() * self.y_std)
    }
}

impl Surrogate for GaussianProcess {
    fn update(&mut self, data: &Observations) -> Result<()> {
        let start = data.len().saturating_sub(self.max_train_points);
        let model = self.fit(&data.x()[start..], &data.y()[start..])?;
        self.model = Some(model);
        trace_debug!(n_train = data.len() - start, "gaussian process fitted");
        Ok(())
    }

    fn evaluate(&self, points: &[Point]) -> Result<Prediction> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| Error::Surrogate("evaluate called before update".to_string()))?;
        let dim = model.lengthscales.len();

        let mut means = Vec::with_capacity(points.len());
        let mut stds = Vec::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            if point.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    got: point.len(),
                    index,
                });
            }
            let (mean, std) = model.predict(point);
            means.push(mean);
            stds.push(std);
        }
        Ok(Prediction::new(means, stds))
    }
}
