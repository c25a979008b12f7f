/// Numeric thresholds that decide between exact and approximate
/// distributions.
///
/// All thresholds are explicit call parameters rather than process-wide
/// state; functions that take no `Config` use `Config::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Largest per-sample size for which the exact U distribution is used by
    /// the Mann-Whitney U-test when there are no ties.
    ///
    /// The exact distribution is necessary for small samples because it is
    /// highly irregular, but it quickly approaches the normal approximation
    /// and computing it for two 50-value samples already takes a few
    /// milliseconds.
    pub exact_limit: usize,

    /// Largest per-sample size for which the exact U distribution is used
    /// when the samples contain ties.
    ///
    /// The tied distribution is found by enumerating every way of
    /// apportioning tied observations between the samples, which is
    /// exponential in the number of tie groups. This limit is a hard usage
    /// ceiling, not a tuning knob.
    pub ties_exact_limit: usize,

    /// Sample size above which quantile confidence intervals use the normal
    /// approximation to the binomial distribution.
    ///
    /// Performance-wise the two cross over around n=5, but the approximation
    /// is poor at low n.
    pub quantile_approx_threshold: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            exact_limit: 50,
            ties_exact_limit: 9,
            quantile_approx_threshold: 30,
        }
    }
}
