use statrs::function::erf::{erf_inv, erfc};
use std::f64::consts::SQRT_2;

/// A continuous statistical distribution.
pub trait Dist {
    /// Returns the value of the cumulative distribution function at `x`,
    /// Pr[X <= x]. Monotonically non-decreasing with cdf(-inf) = 0 and
    /// cdf(+inf) = 1.
    fn cdf(&self, x: f64) -> f64;

    /// Returns the inverse of the CDF for `y` in [0, 1], so that
    /// `inv_cdf(cdf(x)) == x` for distributions with full support.
    fn inv_cdf(&self, y: f64) -> f64;

    /// Returns bounds outside of which the total probability mass is
    /// approximately zero. Exact for finite-support distributions.
    fn bounds(&self) -> (f64, f64);
}

/// A discrete statistical distribution defined on a regular grid.
pub trait DiscreteDist {
    /// Returns the probability mass at the grid point at or below `x`.
    fn pmf(&self, x: f64) -> f64;

    /// Returns Pr[X <= x].
    fn cdf(&self, x: f64) -> f64;

    /// Returns the spacing of the grid this distribution is defined on.
    fn step(&self) -> f64;

    /// Returns the bounds of the distribution's support.
    fn bounds(&self) -> (f64, f64);
}

/// A normal (Gaussian) distribution with mean `mu` and standard deviation
/// `sigma`.
///
/// `sigma == 0` is permitted and degenerates to a unit step at `mu`, which
/// is what the normal approximation of a zero-variance binomial collapses
/// to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalDist {
    pub mu: f64,
    pub sigma: f64,
}

impl NormalDist {
    /// The standard normal distribution.
    pub fn standard() -> NormalDist {
        NormalDist { mu: 0.0, sigma: 1.0 }
    }
}

impl Dist for NormalDist {
    fn cdf(&self, x: f64) -> f64 {
        if self.sigma == 0.0 {
            if x < self.mu {
                return 0.0;
            }
            return 1.0;
        }
        0.5 * erfc(-(x - self.mu) / (self.sigma * SQRT_2))
    }

    fn inv_cdf(&self, y: f64) -> f64 {
        if self.sigma == 0.0 {
            return self.mu;
        }
        self.mu + self.sigma * SQRT_2 * erf_inv(2.0 * y - 1.0)
    }

    fn bounds(&self) -> (f64, f64) {
        (self.mu - 3.0 * self.sigma, self.mu + 3.0 * self.sigma)
    }
}
