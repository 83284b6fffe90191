use crate::types::CampaignPhase;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when neither an explicit candidate set nor bounds were given.
    #[error("no search space: supply either bounds or an explicit candidate set")]
    MissingSearchSpace,

    /// Returned when a point or bound list has the wrong number of dimensions.
    #[error("dimension mismatch: expected {expected} dimensions but item {index} has {got}")]
    DimensionMismatch {
        /// The dimensionality fixed by the campaign.
        expected: usize,
        /// The dimensionality actually found.
        got: usize,
        /// The index of the offending point or bound.
        index: usize,
    },

    /// Returned when observation inputs and outputs have different lengths.
    #[error("observation length mismatch: {x} input rows but {y} output values")]
    LengthMismatch {
        /// Number of input rows.
        x: usize,
        /// Number of output values.
        y: usize,
    },

    /// Returned when the seed observations are empty.
    #[error("starter observations must contain at least one point")]
    EmptyObservations,

    /// Returned when more points are requested than candidates remain.
    #[error("insufficient candidates: requested {requested} points but {available} are available")]
    InsufficientCandidates {
        /// Number of points requested.
        requested: usize,
        /// Number of candidates left.
        available: usize,
    },

    /// Returned when grid enumeration would exceed the configured size limit.
    #[error("search space too large: {} points exceed the limit of {limit}", display_size(.size))]
    SearchSpaceTooLarge {
        /// Number of grid points, or `None` if the count overflows `usize`.
        size: Option<usize>,
        /// The configured maximum.
        limit: usize,
    },

    /// Returned when a bound pair is reversed or not finite.
    #[error("invalid bounds for dimension {dimension}: low ({low}) must be finite and <= high ({high})")]
    InvalidBounds {
        /// The dimension index.
        dimension: usize,
        /// The lower bound.
        low: f64,
        /// The upper bound.
        high: f64,
    },

    /// Returned when the grid density is zero.
    #[error("invalid grid density: at least one point per dimension is required")]
    InvalidGridDensity,

    /// Returned when an acquisition parameter is negative or not finite.
    #[error("invalid acquisition parameter {name}: {value} must be finite and non-negative")]
    InvalidAcquisitionParameter {
        /// Parameter name (`beta` or `xi`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when a noise standard deviation is negative or not finite.
    #[error("invalid noise: standard deviation {0} must be finite and non-negative")]
    InvalidNoise(f64),

    /// Returned when a surrogate prediction is malformed.
    #[error("invalid surrogate prediction: {0}")]
    InvalidPrediction(String),

    /// Returned when the oracle answers with the wrong number of values.
    #[error("oracle returned {got} values for {expected} query points")]
    OracleMismatch {
        /// Number of query points.
        expected: usize,
        /// Number of values returned.
        got: usize,
    },

    /// Returned when a campaign is run outside the `Created` phase.
    #[error("campaign cannot run from the {0} phase")]
    InvalidPhase(CampaignPhase),

    /// Returned by surrogate implementations when fitting or evaluation fails.
    #[error("surrogate error: {0}")]
    Surrogate(String),

    /// Returned by oracle implementations when a query fails.
    #[error("oracle error: {0}")]
    Oracle(String),
}

pub type Result<T> = core::result::Result<T, Error>;

#[allow(clippy::ref_option)]
fn display_size(size: &Option<usize>) -> String {
    size.map_or_else(|| "overflowing".to_string(), |s| s.to_string())
}
