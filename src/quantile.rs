use crate::{
    binomial::BinomialDist,
    config::Config,
    dist::{Dist, DiscreteDist},
    error::StatError,
    sample::Sample,
};

/// The confidence interval for a quantile, expressed in order statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileCiResult {
    /// The quantile this interval covers; a copy of the request.
    pub quantile: f64,

    /// The sample size.
    pub n: usize,

    /// The actual confidence level of the interval, always >= the requested
    /// confidence.
    pub confidence: f64,

    /// The order statistics bounding the interval, 1-based: given a sorted
    /// sample xs, the interval is xs[lo_order-1] to xs[hi_order-1].
    ///
    /// `lo_order == 0` or `hi_order == n+1` indicate the corresponding bound
    /// lies outside the sample (negative or positive infinity), which
    /// happens when the sample is too small for the confidence level or the
    /// quantile is near 0 or 1.
    pub lo_order: usize,
    pub hi_order: usize,

    /// Whether the interval is ambiguous: the interval from lo_order+1 to
    /// hi_order+1 has equivalent confidence.
    pub ambiguous: bool,
}

impl QuantileCiResult {
    /// Maps the interval onto values of a sample, returning negative or
    /// positive infinity for a bound that lies outside the sample.
    ///
    /// # Errors
    /// * `StatError::ContractViolation` - the sample is weighted, or its
    ///   size differs from the `n` the interval was computed for
    pub fn from_sample(&self, s: &Sample) -> Result<(f64, f64), StatError> {
        if s.weights.is_some() {
            return Err(StatError::ContractViolation(
                "cannot compute quantile CI on a weighted sample",
            ));
        }
        if s.xs.len() != self.n {
            return Err(StatError::ContractViolation(
                "sample size differs from computed quantile CI",
            ));
        }

        let xs = s.sorted_xs();
        let lo = if self.lo_order < 1 {
            f64::NEG_INFINITY
        } else {
            xs[self.lo_order - 1]
        };
        let hi = if self.hi_order > xs.len() {
            f64::INFINITY
        } else {
            xs[self.hi_order - 1]
        };
        Ok((lo, hi))
    }
}

/// Returns the confidence interval of the q'th quantile in a sample of size
/// `n`, with default thresholds.
///
/// See [`quantile_ci_with_config`].
pub fn quantile_ci(n: usize, q: f64, confidence: f64) -> QuantileCiResult {
    quantile_ci_with_config(n, q, confidence, &Config::default())
}

/// Returns the confidence interval of the q'th quantile in a sample of size
/// `n`.
///
/// The sampling distribution of order statistics is binomial: in
/// `BinomialDist { n, p: q }`, pmf(k) is the probability that the
/// population quantile falls between the k'th and (k+1)'th order
/// statistics. For n up to `config.quantile_approx_threshold` the interval
/// is found by accumulating these probabilities exactly; above it, by a
/// continuity-corrected normal approximation.
///
/// Where intervals of equal confidence exist, the lower (left-biased) one
/// is preferred and the result is marked ambiguous.
pub fn quantile_ci_with_config(n: usize, q: f64, confidence: f64, config: &Config) -> QuantileCiResult {
    if confidence >= 1.0 {
        return QuantileCiResult {
            quantile: q,
            n,
            confidence: 1.0,
            lo_order: 0,
            hi_order: n + 1,
            ambiguous: false,
        };
    }

    let samp = BinomialDist { n: n as u64, p: q };

    // l and r are the left and right order statistics of the interval,
    // unclamped (l may go negative, r may pass n+1).
    let mut l: i64;
    let mut r: i64;
    let mut ambiguous = false;
    let actual;

    if n <= config.quantile_approx_threshold {
        // Start at the mode and accumulate probabilities outward in
        // decreasing order until the confidence level is reached; they fall
        // off monotonically away from the mode. When the distribution has
        // two equal modes, start at the lower one to left-bias the result.
        let mut x = ((n as f64 + 1.0) * q).ceil() as i64 - 1;
        if q == 0.0 {
            x = 0;
        }
        let mut accum = samp.pmf(x as f64);

        // [l, r) is the summed interval; lp and rp are the masses of its
        // two open neighbors.
        l = x;
        r = x + 1;
        let mut lp = samp.pmf((l - 1) as f64);
        let mut rp = samp.pmf(r as f64);
        ambiguous = rp == accum;

        // Stop if no mass remains even short of the requested confidence,
        // so accumulated rounding error cannot loop forever.
        while accum < confidence && (lp > 0.0 || rp > 0.0) {
            ambiguous = lp == rp;
            if lp >= rp {
                // Left-bias.
                accum += lp;
                l -= 1;
                lp = samp.pmf((l - 1) as f64);
            } else {
                accum += rp;
                r += 1;
                rp = samp.pmf(r as f64);
            }
        }
        actual = accum;
    } else {
        let norm = samp.normal_approx();
        let alpha = (1.0 - confidence) / 2.0;

        // The central "confidence" weight of the approximation, symmetric
        // around the mean.
        let l1 = norm.inv_cdf(alpha);
        let r1 = 2.0 * norm.mu - l1;

        // Find the band of the discrete distribution containing [l1, r1].
        // With the continuity correction, point k of the binomial
        // corresponds to [k-0.5, k+0.5] of the normal, so round out to
        // half-integer boundaries and recover k.
        l = ((l1 - 0.5).floor() + 0.5).floor() as i64 + 1;
        r = ((r1 - 0.5).ceil() + 0.5).floor() as i64 + 1;

        // Pr[l <= X < r] on the binomial is Pr[X <= r-1] - Pr[X <= l-1];
        // the 0.5 on each bound is the continuity correction again.
        let band = |l: i64, r: i64| norm.cdf(r as f64 - 0.5) - norm.cdf(l as f64 - 0.5);
        let mut conf = band(l, r);

        // The interval above is symmetric; try dropping the upper band to
        // left-bias it, consistent with the exact path.
        let a_biased = band(l, r - 1);
        if a_biased >= confidence && a_biased < conf {
            conf = a_biased;
            ambiguous = true;
            r -= 1;
        }

        if l <= 0 && r >= n as i64 + 1 {
            // The interval covers everything, but the normal distribution's
            // infinite support keeps the computed confidence just short of
            // 1. The quantile certainly falls between -inf and +inf.
            conf = 1.0;
            ambiguous = false;
        }
        actual = conf;
    }

    QuantileCiResult {
        quantile: q,
        n,
        confidence: actual,
        lo_order: l.clamp(0, n as i64 + 1) as usize,
        hi_order: r.clamp(0, n as i64 + 1) as usize,
        ambiguous,
    }
}
