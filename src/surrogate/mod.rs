//! The surrogate model interface.
//!
//! A [`Surrogate`] is any predictive model that can be refit on the
//! accumulated [`Observations`] and then report a predictive mean and
//! standard deviation at arbitrary points. The campaign treats fitting as
//! opaque: it calls [`update`](Surrogate::update) once per iteration and
//! [`evaluate`](Surrogate::evaluate) on the candidate snapshot.
//!
//! A Gaussian-process implementation ships behind the `gp` feature as
//! [`GaussianProcess`].
//!
//! # Implementing a custom surrogate
//!
//! ```
//! use bayesopt::surrogate::{Prediction, Surrogate};
//! use bayesopt::{Observations, Result};
//!
//! /// Predicts the mean of everything seen so far, with a fixed spread.
//! struct MeanModel {
//!     mean: f64,
//! }
//!
//! impl Surrogate for MeanModel {
//!     fn update(&mut self, data: &Observations) -> Result<()> {
//!         self.mean = data.y().iter().sum::<f64>() / data.len() as f64;
//!         Ok(())
//!     }
//!
//!     fn evaluate(&self, points: &[Vec<f64>]) -> Result<Prediction> {
//!         Ok(Prediction::new(vec![self.mean; points.len()], vec![1.0; points.len()]))
//!     }
//! }
//! ```

#[cfg(feature = "gp")]
pub mod gp;

#[cfg(feature = "gp")]
pub use gp::{GaussianProcess, GaussianProcessBuilder};

use crate::observations::Observations;
use crate::types::Point;
use crate::{Error, Result};

/// Predictive means and standard deviations, aligned one-to-one with the
/// evaluated points.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// Predicted mean per point.
    pub means: Vec<f64>,
    /// Predicted standard deviation per point.
    pub stds: Vec<f64>,
}

impl Prediction {
    /// Pairs means with standard deviations.
    #[must_use]
    pub fn new(means: Vec<f64>, stds: Vec<f64>) -> Self {
        Self { means, stds }
    }

    /// Number of predicted points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// Returns `true` if nothing was predicted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Check the prediction covers `expected` points with finite means and
    /// finite, non-negative standard deviations.
    pub(crate) fn validate(&self, expected: usize) -> Result<()> {
        if self.means.len() != expected || self.stds.len() != expected {
            return Err(Error::InvalidPrediction(format!(
                "expected {expected} means and stds, got {} and {}",
                self.means.len(),
                self.stds.len()
            )));
        }
        if let Some(i) = self.means.iter().position(|m| !m.is_finite()) {
            return Err(Error::InvalidPrediction(format!(
                "mean at point {i} is not finite"
            )));
        }
        if let Some(i) = self.stds.iter().position(|s| !s.is_finite() || *s < 0.0) {
            return Err(Error::InvalidPrediction(format!(
                "std at point {i} is negative or not finite"
            )));
        }
        Ok(())
    }
}

/// A probabilistic model refit on accumulated data.
///
/// Implementations must be `Send` so a campaign can be moved to a worker
/// thread.
pub trait Surrogate: Send {
    /// Fit or update the model on every observation gathered so far.
    ///
    /// # Errors
    ///
    /// Implementation-defined; conventionally [`Error::Surrogate`].
    fn update(&mut self, data: &Observations) -> Result<()>;

    /// Predict mean and standard deviation at each point.
    ///
    /// The returned vectors must have one entry per point, in order.
    ///
    /// # Errors
    ///
    /// Implementation-defined; conventionally [`Error::Surrogate`].
    fn evaluate(&self, points: &[Point]) -> Result<Prediction>;
}

impl<S: Surrogate + ?Sized> Surrogate for Box<S> {
    fn update(&mut self, data: &Observations) -> Result<()> {
        (**self).update(data)
    }

    fn evaluate(&self, points: &[Point]) -> Result<Prediction> {
        (**self).evaluate(points)
    }
}
