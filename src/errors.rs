use thiserror::Error;

/// Error taxonomy of the quadrature core.
///
/// Every failure is raised at the point of detection and propagates up
/// through the public API via `Result`; the core performs no retries and
/// never substitutes a number for an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuadError {
    /// The expression text does not parse, or its evaluation produced a
    /// non-finite value (NaN or infinity).
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    /// A malformed numeric input, e.g. zero subdivisions or a non-finite
    /// interval bound.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Too few points supplied: Simpson's rule needs at least 3, the error
    /// estimator at least 2.
    #[error("insufficient points: got {got}")]
    InsufficientPoints { got: usize },

    /// The composite rule was given an odd number of intervals.
    #[error("composite Simpson's 1/3 rule requires an even interval count, got {intervals}")]
    OddIntervalCount { intervals: usize },
}
