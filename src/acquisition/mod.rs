//! Acquisition functions: score candidates and pick the next query batch.
//!
//! Every rule maps a surrogate's predicted mean `μ` and standard deviation
//! `σ` at a candidate to a scalar score, where larger is better:
//!
//! | Rule | Score | Parameter |
//! |------|-------|-----------|
//! | [`Ucb`](Acquisition::Ucb) | `μ + β·σ` | `β ≥ 0`: exploration weight |
//! | [`ExpectedImprovement`](Acquisition::ExpectedImprovement) | `m·Φ(m/σ) + σ·φ(m/σ)` | `ξ ≥ 0`: improvement margin |
//! | [`ProbabilityOfImprovement`](Acquisition::ProbabilityOfImprovement) | `Φ(m/σ)` | `ξ ≥ 0`: improvement margin |
//!
//! with `m = μ - y_best - ξ`, where `y_best` is the best value observed so
//! far. For a minimizing campaign, means and observations are negated before
//! scoring, so the same formulas reward low predicted values.
//!
//! # Selection
//!
//! [`Acquisition::select`] scores every candidate, sorts the scores in
//! ascending order with a stable sort, and returns the last `n_querypts`
//! entries. Equal scores therefore keep their candidate order, and the final
//! point of a [`Selection`] is the best-scoring one.
//!
//! ```
//! use bayesopt::acquisition::Acquisition;
//! use bayesopt::space::CandidateSet;
//! use bayesopt::surrogate::{Prediction, Surrogate};
//! use bayesopt::{Direction, Observations, Result};
//!
//! struct Identity;
//!
//! impl Surrogate for Identity {
//!     fn update(&mut self, _: &Observations) -> Result<()> {
//!         Ok(())
//!     }
//!     fn evaluate(&self, points: &[Vec<f64>]) -> Result<Prediction> {
//!         let means = points.iter().map(|p| p[0]).collect();
//!         Ok(Prediction::new(means, vec![0.1; points.len()]))
//!     }
//! }
//!
//! let data = Observations::new(vec![vec![0.0]], vec![0.0]).unwrap();
//! let candidates = CandidateSet::from_points(vec![vec![0.2], vec![0.9], vec![0.4]]).unwrap();
//!
//! let selection = Acquisition::ucb(1.0)
//!     .select(&Identity, &data, &candidates, 1, Direction::Maximize)
//!     .unwrap();
//! assert_eq!(selection.points, vec![vec![0.9]]);
//! ```

pub mod normal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::observations::Observations;
use crate::space::CandidateSet;
use crate::surrogate::{Prediction, Surrogate};
use crate::types::{Direction, Point};
use crate::{Error, Result};

/// Standard deviations below this are treated as zero.
const MIN_STD: f64 = 1e-12;

/// Default UCB exploration weight.
pub const DEFAULT_BETA: f64 = 1.0;
/// Default improvement margin for EI and PI.
pub const DEFAULT_XI: f64 = 1.0;

/// Parameters for the Upper Confidence Bound rule.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UcbParams {
    /// Weight of the predicted standard deviation. `0` is pure exploitation.
    pub beta: f64,
}

impl Default for UcbParams {
    fn default() -> Self {
        Self { beta: DEFAULT_BETA }
    }
}

/// Parameters for the improvement-based rules (EI and PI).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImprovementParams {
    /// Margin the prediction must beat the incumbent by.
    pub xi: f64,
}

impl Default for ImprovementParams {
    fn default() -> Self {
        Self { xi: DEFAULT_XI }
    }
}

/// An acquisition rule together with its parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Acquisition {
    /// Upper Confidence Bound.
    Ucb(UcbParams),
    /// Expected Improvement.
    ExpectedImprovement(ImprovementParams),
    /// Probability of Improvement.
    ProbabilityOfImprovement(ImprovementParams),
}

impl Default for Acquisition {
    fn default() -> Self {
        Self::Ucb(UcbParams::default())
    }
}

/// The points chosen by [`Acquisition::select`].
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Positions of the chosen points within the candidate set.
    pub indices: Vec<usize>,
    /// The chosen points, in ascending score order.
    pub points: Vec<Point>,
    /// The score of each chosen point.
    pub scores: Vec<f64>,
}

impl Acquisition {
    /// UCB with exploration weight `beta`.
    #[must_use]
    pub fn ucb(beta: f64) -> Self {
        Self::Ucb(UcbParams { beta })
    }

    /// Expected Improvement with margin `xi`.
    #[must_use]
    pub fn expected_improvement(xi: f64) -> Self {
        Self::ExpectedImprovement(ImprovementParams { xi })
    }

    /// Probability of Improvement with margin `xi`.
    #[must_use]
    pub fn probability_of_improvement(xi: f64) -> Self {
        Self::ProbabilityOfImprovement(ImprovementParams { xi })
    }

    /// Short name of the rule.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ucb(_) => "ucb",
            Self::ExpectedImprovement(_) => "ei",
            Self::ProbabilityOfImprovement(_) => "pi",
        }
    }

    /// Check the rule parameter is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAcquisitionParameter`] otherwise.
    pub fn validate(&self) -> Result<()> {
        let (name, value) = match self {
            Self::Ucb(p) => ("beta", p.beta),
            Self::ExpectedImprovement(p) | Self::ProbabilityOfImprovement(p) => ("xi", p.xi),
        };
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidAcquisitionParameter { name, value })
        }
    }

    /// Score each predicted point.
    ///
    /// `observations` supplies the incumbent for EI and PI; UCB ignores it.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidAcquisitionParameter`] for a bad `beta`/`xi`.
    /// - [`Error::EmptyObservations`] if an improvement rule has no incumbent.
    pub fn scores(
        &self,
        prediction: &Prediction,
        observations: &Observations,
        direction: Direction,
    ) -> Result<Vec<f64>> {
        self.validate()?;
        let pairs = prediction.means.iter().zip(&prediction.stds);

        let scores = match self {
            Self::Ucb(p) => pairs
                .map(|(&mu, &sigma)| upper_confidence_bound(direction.orient(mu), sigma, p.beta))
                .collect(),
            Self::ExpectedImprovement(p) => {
                let best = observations
                    .oriented_best(direction)
                    .ok_or(Error::EmptyObservations)?;
                pairs
                    .map(|(&mu, &sigma)| {
                        expected_improvement(direction.orient(mu), sigma, best, p.xi)
                    })
                    .collect()
            }
            Self::ProbabilityOfImprovement(p) => {
                let best = observations
                    .oriented_best(direction)
                    .ok_or(Error::EmptyObservations)?;
                pairs
                    .map(|(&mu, &sigma)| {
                        probability_of_improvement(direction.orient(mu), sigma, best, p.xi)
                    })
                    .collect()
            }
        };
        Ok(scores)
    }

    /// Pick the `n_querypts` highest-scoring candidates.
    ///
    /// The surrogate is evaluated once on every candidate; it must already be
    /// fitted.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidAcquisitionParameter`] if `n_querypts` is zero or the
    ///   rule parameter is invalid.
    /// - [`Error::InsufficientCandidates`] if `n_querypts` exceeds the number
    ///   of candidates.
    /// - [`Error::InvalidPrediction`] if the surrogate output is misaligned or
    ///   not finite.
    /// - Any error returned by [`Surrogate::evaluate`].
    pub fn select<S: Surrogate + ?Sized>(
        &self,
        surrogate: &S,
        observations: &Observations,
        candidates: &CandidateSet,
        n_querypts: usize,
        direction: Direction,
    ) -> Result<Selection> {
        self.validate()?;
        if n_querypts == 0 {
            return Err(Error::InvalidAcquisitionParameter {
                name: "n_querypts",
                value: 0.0,
            });
        }
        if n_querypts > candidates.len() {
            return Err(Error::InsufficientCandidates {
                requested: n_querypts,
                available: candidates.len(),
            });
        }

        let prediction = surrogate.evaluate(candidates.points())?;
        prediction.validate(candidates.len())?;
        let scores = self.scores(&prediction, observations, direction)?;

        let ranking = ascending_ranking(&scores);
        let indices = ranking[ranking.len() - n_querypts..].to_vec();
        let points = indices
            .iter()
            .map(|&i| candidates.points()[i].clone())
            .collect();
        let chosen_scores = indices.iter().map(|&i| scores[i]).collect();

        trace_debug!(
            rule = self.name(),
            n_candidates = candidates.len(),
            n_querypts,
            "acquisition selected points"
        );

        Ok(Selection {
            indices,
            points,
            scores: chosen_scores,
        })
    }
}

/// Candidate positions ordered by ascending score; ties keep input order.
fn ascending_ranking(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // `sort_by` is stable.
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
    order
}

/// Upper Confidence Bound: `μ + β·σ`.
#[must_use]
pub fn upper_confidence_bound(mean: f64, std: f64, beta: f64) -> f64 {
    mean + beta * std
}

/// Expected Improvement over `best + xi`.
///
/// `EI = m·Φ(m/σ) + σ·φ(m/σ)` with `m = μ - best - ξ`. For a degenerate
/// `σ` the limit `max(m, 0)` is returned.
#[must_use]
pub fn expected_improvement(mean: f64, std: f64, best: f64, xi: f64) -> f64 {
    let m = mean - best - xi;
    if std < MIN_STD {
        return m.max(0.0);
    }
    let z = m / std;
    // EI >= max(m, 0) holds exactly; clamp away approximation error in Φ.
    (m * normal::cdf(z) + std * normal::pdf(z)).max(m).max(0.0)
}

/// Probability of Improvement over `best + xi`: `Φ((μ - best - ξ) / σ)`.
///
/// A degenerate `σ` scores 0, so it never outranks an uncertain candidate.
#[must_use]
pub fn probability_of_improvement(mean: f64, std: f64, best: f64, xi: f64) -> f64 {
    if std < MIN_STD {
        return 0.0;
    }
    normal::cdf((mean - best - xi) / std)
}
