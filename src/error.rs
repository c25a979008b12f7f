use thiserror::Error;

/// Errors reported by the statistical tests and estimators.
///
/// `SampleSize` and `SamplesEqual` are legitimate statistical degeneracies a
/// caller can recover from (e.g. by collecting more data). A
/// `ContractViolation` signals a caller bug and should never occur in correct
/// usage.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatError {
    /// A test was given an empty sample.
    #[error("sample is too small")]
    SampleSize,

    /// Every value across both samples is equal, so the test statistic has
    /// zero variance and the result is statistically undefined.
    #[error("all samples are equal")]
    SamplesEqual,

    /// The caller violated an API precondition.
    #[error("contract violation: {0}")]
    ContractViolation(&'static str),
}
