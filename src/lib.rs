#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Sequential Bayesian optimization over a discretized search space.
//!
//! A campaign repeatedly fits a surrogate model to everything observed so
//! far, scores the not-yet-sampled candidate points with an acquisition
//! function, sends the best ones to an expensive black-box oracle and folds
//! the answers back into its data.
//!
//! # Getting Started
//!
//! Find the peak of a noisy 1-D function with the bundled Gaussian process:
//!
//! ```
//! # #[cfg(feature = "gp")]
//! # {
//! use bayesopt::prelude::*;
//!
//! let truth = |x: &[f64]| -(x[0] - 0.3).powi(2);
//! let oracle = NoisyOracle::with_seed(truth, 0.01, 7).unwrap();
//! let starter = Observations::new(vec![vec![0.0], vec![1.0]], vec![-0.09, -0.49]).unwrap();
//!
//! let mut campaign = Campaign::builder(GaussianProcess::new(), oracle, starter)
//!     .bounds(Bounds::new(vec![(0.0, 1.0)]).unwrap())
//!     .grid_density(21)
//!     .acquisition(Acquisition::expected_improvement(0.01))
//!     .build()
//!     .unwrap();
//!
//! let result = campaign.run(8).unwrap();
//! assert_eq!(result.len(), 8);
//! assert_eq!(campaign.all_data().len(), 10);
//! # }
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Campaign`] | Drive the loop: fit, select, query, record. |
//! | [`Observations`] | Paired inputs and outputs gathered so far. |
//! | [`CandidateSet`](space::CandidateSet) | The points still available for querying. |
//! | [`Surrogate`](surrogate::Surrogate) | A model reporting predictive mean and standard deviation. |
//! | [`Acquisition`] | UCB, expected improvement or probability of improvement. |
//! | [`Oracle`] | The black box being optimized. |
//! | [`Direction`] | Whether larger or smaller oracle outputs are better. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `gp` | [`GaussianProcess`](surrogate::GaussianProcess) surrogate via `nalgebra` | on |
//! | `serde` | `Serialize`/`Deserialize` on observations, configuration, state and results | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at each campaign step | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod acquisition;
pub mod campaign;
mod error;
mod observations;
pub mod oracle;
pub mod space;
pub mod surrogate;
mod types;

pub use acquisition::Acquisition;
pub use campaign::{
    Campaign, CampaignBuilder, CampaignConfig, CampaignResult, CampaignState, CancelToken,
    IterationHook, IterationRecord,
};
pub use error::{Error, Result};
pub use observations::Observations;
pub use oracle::{Estimator, NoisyOracle, Oracle};
pub use space::{Bounds, CandidateSet};
pub use types::{CampaignPhase, Direction, Point};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use bayesopt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::acquisition::Acquisition;
    pub use crate::campaign::{
        Campaign, CampaignBuilder, CampaignConfig, CampaignResult, CampaignState, CancelToken,
        IterationHook, IterationRecord,
    };
    pub use crate::error::{Error, Result};
    pub use crate::observations::Observations;
    pub use crate::oracle::{Estimator, NoisyOracle, Oracle};
    pub use crate::space::{Bounds, CandidateSet};
    #[cfg(feature = "gp")]
    pub use crate::surrogate::GaussianProcess;
    pub use crate::surrogate::{Prediction, Surrogate};
    pub use crate::types::{CampaignPhase, Direction, Point};
}
