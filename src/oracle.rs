//! The [`Oracle`] trait: the black box being optimized.
//!
//! An oracle answers a batch of query points with one observed value per
//! point. Outputs may be noisy, so the campaign never assumes that repeating
//! a query repeats the answer.
//!
//! Any `FnMut(&[f64]) -> f64` closure is an oracle:
//!
//! ```
//! use bayesopt::Oracle;
//!
//! let mut calls = 0;
//! let mut oracle = |x: &[f64]| {
//!     calls += 1;
//!     -(x[0] - 0.3).powi(2)
//! };
//! let values = oracle.predict(&[vec![0.3], vec![0.0]]).unwrap();
//! assert_eq!(values, vec![0.0, -0.09]);
//! ```
//!
//! For benchmarking against a known ground truth, wrap a deterministic
//! [`Estimator`] in a [`NoisyOracle`], which layers independent Gaussian
//! noise on every output.

use parking_lot::Mutex;

use crate::types::Point;
use crate::{Error, Result};

/// Ground-truth evaluator of the black box.
///
/// Any `Fn(&[f64]) -> f64` closure is an estimator.
pub trait Estimator: Send {
    /// Deterministic value at each point.
    ///
    /// # Errors
    ///
    /// Implementation-defined; conventionally [`Error::Oracle`].
    fn estimate(&self, points: &[Point]) -> Result<Vec<f64>>;
}

impl<F> Estimator for F
where
    F: Fn(&[f64]) -> f64 + Send,
{
    fn estimate(&self, points: &[Point]) -> Result<Vec<f64>> {
        Ok(points.iter().map(|p| self(p)).collect())
    }
}

/// The black box queried by a campaign.
///
/// Takes `&mut self` so stateful oracles (lab instruments, simulators with
/// caches, closures counting calls) need no interior mutability.
pub trait Oracle: Send {
    /// Observe the black box at each point, returning one value per point.
    ///
    /// # Errors
    ///
    /// Implementation-defined; conventionally [`Error::Oracle`]. The campaign
    /// does not retry failed queries.
    fn predict(&mut self, points: &[Point]) -> Result<Vec<f64>>;
}

impl<F> Oracle for F
where
    F: FnMut(&[f64]) -> f64 + Send,
{
    fn predict(&mut self, points: &[Point]) -> Result<Vec<f64>> {
        Ok(points.iter().map(|p| self(p)).collect())
    }
}

/// An oracle that adds `N(0, noise_std²)` noise to a ground-truth estimator.
///
/// With `noise_std == 0` the output is exactly the estimator's output.
///
/// # Examples
///
/// ```
/// use bayesopt::{NoisyOracle, Oracle};
///
/// let mut oracle = NoisyOracle::with_seed(|x: &[f64]| x[0] * 2.0, 0.1, 42).unwrap();
/// let y = oracle.predict(&[vec![1.0]]).unwrap();
/// assert!((y[0] - 2.0).abs() < 1.0);
/// ```
pub struct NoisyOracle<E> {
    estimator: E,
    noise_std: f64,
    rng: Mutex<fastrand::Rng>,
}

impl<E: Estimator> NoisyOracle<E> {
    /// Creates a noisy oracle with a random seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNoise`] if `noise_std` is negative or not
    /// finite.
    pub fn new(estimator: E, noise_std: f64) -> Result<Self> {
        Self::build(estimator, noise_std, fastrand::Rng::new())
    }

    /// Creates a noisy oracle with a fixed seed for reproducibility.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNoise`] if `noise_std` is negative or not
    /// finite.
    pub fn with_seed(estimator: E, noise_std: f64, seed: u64) -> Result<Self> {
        Self::build(estimator, noise_std, fastrand::Rng::with_seed(seed))
    }

    fn build(estimator: E, noise_std: f64, rng: fastrand::Rng) -> Result<Self> {
        if !noise_std.is_finite() || noise_std < 0.0 {
            return Err(Error::InvalidNoise(noise_std));
        }
        Ok(Self {
            estimator,
            noise_std,
            rng: Mutex::new(rng),
        })
    }

    /// Standard deviation of the added noise.
    #[must_use]
    pub fn noise_std(&self) -> f64 {
        self.noise_std
    }

    /// The wrapped ground-truth estimator.
    #[must_use]
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Noisy observations at each point.
    ///
    /// # Errors
    ///
    /// Propagates estimator errors.
    pub fn observe(&self, points: &[Point]) -> Result<Vec<f64>> {
        let mut values = self.estimator.estimate(points)?;
        if self.noise_std > 0.0 {
            let mut rng = self.rng.lock();
            for v in &mut values {
                *v += self.noise_std * standard_normal(&mut rng);
            }
        }
        Ok(values)
    }
}

impl<E: Estimator> Oracle for NoisyOracle<E> {
    fn predict(&mut self, points: &[Point]) -> Result<Vec<f64>> {
        self.observe(points)
    }
}

/// Sample the standard normal distribution via the Box-Muller transform.
fn standard_normal(rng: &mut fastrand::Rng) -> f64 {
    // 1 - U keeps u1 in (0, 1] so ln(u1) stays finite.
    let u1 = 1.0 - rng.f64();
    let u2 = rng.f64();
    (-2.0 * u1.ln()).sqrt() * (core::f64::consts::TAU * u2).cos()
}
