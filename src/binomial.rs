use crate::dist::{DiscreteDist, NormalDist};
use statrs::function::{beta::beta_reg, factorial::binomial};

/// A binomial distribution over the number of successes in `n` independent
/// Bernoulli trials with success probability `p`.
///
/// If `n == 1` this is the Bernoulli distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialDist {
    /// Number of independent Bernoulli trials.
    pub n: u64,
    /// Probability of success in each trial, in [0, 1].
    pub p: f64,
}

impl BinomialDist {
    pub fn mean(&self) -> f64 {
        self.n as f64 * self.p
    }

    pub fn variance(&self) -> f64 {
        self.n as f64 * self.p * (1.0 - self.p)
    }

    /// Returns a normal distribution approximating this distribution.
    ///
    /// The binomial distribution is discrete and the normal distribution is
    /// continuous, so the caller must apply a continuity correction when
    /// substituting one for the other:
    ///
    ///   pmf(k) => approx.cdf(k + 0.5) - approx.cdf(k - 0.5)
    ///   cdf(k) => approx.cdf(k + 0.5)
    pub fn normal_approx(&self) -> NormalDist {
        NormalDist {
            mu: self.mean(),
            sigma: self.variance().sqrt(),
        }
    }
}

impl DiscreteDist for BinomialDist {
    /// The probability of getting exactly `floor(k)` successes.
    fn pmf(&self, k: f64) -> f64 {
        let k = k.floor();
        if k < 0.0 || k > self.n as f64 {
            return 0.0;
        }
        let ki = k as u64;
        binomial(self.n, ki) * self.p.powf(k) * (1.0 - self.p).powf((self.n - ki) as f64)
    }

    /// The probability of getting `floor(k)` or fewer successes.
    fn cdf(&self, k: f64) -> f64 {
        let k = k.floor();
        if k < 0.0 {
            return 0.0;
        }
        if k >= self.n as f64 {
            return 1.0;
        }
        // The regularized incomplete beta avoids the catastrophic
        // cancellation and overflow of summing binomial coefficients:
        // cdf(k) = I_{1-p}(n-k, k+1).
        beta_reg(self.n as f64 - k, k + 1.0, 1.0 - self.p)
    }

    fn step(&self) -> f64 {
        1.0
    }

    fn bounds(&self) -> (f64, f64) {
        (0.0, self.n as f64)
    }
}
