use crate::dist::DiscreteDist;
use statrs::function::factorial::binomial;

/// The discrete probability distribution of the Mann-Whitney U statistic for
/// a pair of samples of sizes `n1` and `n2`, conditioned on the tie vector
/// `t`.
///
/// Computing this distribution without ties is described in Mann, Henry B.;
/// Whitney, Donald R. (1947). "On a Test of Whether one of Two Random
/// Variables is Stochastically Larger than the Other". Annals of
/// Mathematical Statistics 18 (1): 50-60.
///
/// With ties the statistic takes half-integer values (tied cross-sample
/// pairs count 0.5), so the distribution is defined on a 0.5-spaced grid and
/// is found by enumerating tie-group splits. It is oriented to the first
/// sample: U counts pairs where the sample-1 value is the larger, plus half
/// the tied pairs. For `n1 != n2` this tied distribution is asymmetric, so
/// callers working with both tails must evaluate each tail explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UDist {
    pub n1: usize,
    pub n2: usize,
    /// Tie vector: observations per rank group of the merged samples, in
    /// merge order. Empty or all ones means no ties.
    pub t: Vec<usize>,
}

impl UDist {
    /// The distribution for samples with no tied values.
    pub fn new(n1: usize, n2: usize) -> UDist {
        UDist { n1, n2, t: Vec::new() }
    }

    /// The distribution conditioned on the observed tie vector.
    pub fn with_ties(n1: usize, n2: usize, t: Vec<usize>) -> UDist {
        UDist { n1, n2, t }
    }

    fn has_ties(&self) -> bool {
        self.t.iter().any(|&run| run > 1)
    }

    /// Returns p_{n1,n2}(U) for U from 0 up to and including `u`, by
    /// bottom-up dynamic programming over the Mann-Whitney recurrence
    ///
    ///   p_{n,m}(U) = (n * p_{n-1,m}(U-m) + m * p_{n,m-1}(U)) / (n+m)
    ///   p_{n,m}(U) = 0                             if U < 0
    ///   p_{0,m}(U) = p_{n,0}(U) = 1 / C(m+n, n)    if U = 0
    ///                           = 0                if U > 0
    ///
    /// p_{n,m} = p_{m,n}, so rows are only built for n <= m and the mirrored
    /// values are read from the current row. Each row slice is updated in
    /// place from the largest U down, which lets one (min(n1,n2)+1)-row
    /// table serve the whole computation.
    fn p(&self, u: usize) -> Vec<f64> {
        let (mut nn, mut mm) = (self.n1, self.n2);
        if nn > mm {
            std::mem::swap(&mut nn, &mut mm);
        }

        let mut memo = vec![vec![0.0f64; u + 1]; nn + 1];
        for m in 1..=mm.max(1) {
            // p_{0,m} is zero except at U=0.
            memo[0][0] = 1.0;

            for n in 1..=nn.min(m) {
                let (head, tail) = memo.split_at_mut(n);
                // p_{n-1,m}, already updated for this m. When n == m this
                // row also serves as p_{m-1,n} = p_{n,m-1} by symmetry.
                let lp = &head[n - 1];
                let out = &mut tail[0];

                let ulim = u.min(n * m);
                let nplusm = (n + m) as f64;
                for u1 in (0..=ulim).rev() {
                    // out[u1] still holds p_{n,m-1}(u1) here.
                    let r = m as f64 * if n < m { out[u1] } else { lp[u1] };
                    let l = if u1 >= m { n as f64 * lp[u1 - m] } else { 0.0 };
                    out[u1] = (l + r) / nplusm;
                }
            }
        }
        memo.swap_remove(nn)
    }

    /// Returns, for every achievable value of 2U, the number of ways of
    /// apportioning the tied observations between the two samples that
    /// produce it, among all C(n1+n2, n1) assignments.
    ///
    /// This enumerates every split vector u with 0 <= u_i <= t_i and
    /// sum(u) = n1 with an odometer-style counter; each valid split
    /// contributes product(C(t_i, u_i)) at its 2U value. The search is
    /// exponential in the number of tie groups, which is why the tied exact
    /// path carries a much lower size limit than the untied one.
    fn tied_counts(&self) -> Vec<f64> {
        let mut counts = vec![0.0f64; 2 * self.n1 * self.n2 + 1];
        let groups = self.t.len();
        let mut u = vec![0usize; groups];
        loop {
            if u.iter().sum::<usize>() == self.n1 {
                let mut twou = 0;
                let mut mult = 1.0;
                // Sample-2 observations in lower-ranked groups so far.
                let mut below = 0;
                for (&ui, &ti) in u.iter().zip(&self.t) {
                    mult *= binomial(ti as u64, ui as u64);
                    twou += ui * (2 * below + (ti - ui));
                    below += ti - ui;
                }
                counts[twou] += mult;
            }

            // Odometer increment with carry, bounded by the tie vector.
            let mut i = 0;
            loop {
                if i == groups {
                    return counts;
                }
                if u[i] < self.t[i] {
                    u[i] += 1;
                    break;
                }
                u[i] = 0;
                i += 1;
            }
        }
    }

    fn total_splits(&self) -> f64 {
        binomial((self.n1 + self.n2) as u64, self.n1 as u64)
    }
}

impl DiscreteDist for UDist {
    fn pmf(&self, u: f64) -> f64 {
        if self.has_ties() {
            let max = (2 * self.n1 * self.n2) as f64;
            let twou = (2.0 * u).floor();
            if twou < 0.0 || twou > max {
                return 0.0;
            }
            self.tied_counts()[twou as usize] / self.total_splits()
        } else {
            let max = (self.n1 * self.n2) as f64;
            let ui = u.floor();
            if ui < 0.0 || ui > max {
                return 0.0;
            }
            let ui = ui as usize;
            self.p(ui)[ui]
        }
    }

    fn cdf(&self, u: f64) -> f64 {
        if self.has_ties() {
            let max = 2 * self.n1 * self.n2;
            let twou = (2.0 * u).floor();
            if twou < 0.0 {
                return 0.0;
            }
            if twou >= max as f64 {
                return 1.0;
            }
            let counts = self.tied_counts();
            counts[..=twou as usize].iter().sum::<f64>() / self.total_splits()
        } else {
            let max = self.n1 * self.n2;
            let ui = u.floor();
            if ui < 0.0 {
                return 0.0;
            }
            if ui >= max as f64 {
                return 1.0;
            }
            let mut ui = ui as usize;
            // The untied distribution is symmetric around n1*n2/2; sum
            // whichever tail needs fewer terms and complement if it was the
            // high one.
            let flip = ui >= (max + 1) / 2;
            if flip {
                ui = max - ui - 1;
            }
            let pdfs = self.p(ui);
            let p: f64 = pdfs[..=ui].iter().sum();
            if flip {
                1.0 - p
            } else {
                p
            }
        }
    }

    fn step(&self) -> f64 {
        if self.has_ties() {
            0.5
        } else {
            1.0
        }
    }

    fn bounds(&self) -> (f64, f64) {
        (0.0, (self.n1 * self.n2) as f64)
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    fn aeq(expect: f64, got: f64) -> bool {
        let (expect, got) = if expect < 0.0 && got < 0.0 {
            (-expect, -got)
        } else {
            (expect, got)
        };
        expect * 0.999_999_99 <= got && got * 0.999_999_99 <= expect
    }

    // CDF tables for N=3 and N=5 up to U=5, from Mann & Whitney (1947).
    const UDIST3: [[f64; 3]; 6] = [
        //  m=1       2         3
        [0.250000, 0.100000, 0.050000], // U=0
        [0.500000, 0.200000, 0.100000], // U=1
        [0.750000, 0.400000, 0.200000], // U=2
        [1.000000, 0.600000, 0.350000], // U=3
        [1.000000, 0.800000, 0.500000], // U=4
        [1.000000, 0.900000, 0.650000], // U=5
    ];
    const UDIST5: [[f64; 5]; 6] = [
        //  m=1       2         3         4         5
        [0.166667, 0.047619, 0.017857, 0.007937, 0.003968], // U=0
        [0.333333, 0.095238, 0.035714, 0.015873, 0.007937], // U=1
        [0.500000, 0.190476, 0.071429, 0.031746, 0.015873], // U=2
        [0.666667, 0.285714, 0.125000, 0.055556, 0.027778], // U=3
        [0.833333, 0.428571, 0.196429, 0.095238, 0.047619], // U=4
        [1.000000, 0.571429, 0.285714, 0.142857, 0.075397], // U=5
    ];

    fn assert_matches_table(n: usize, table: &[&[f64]]) {
        for (u, row) in table.iter().enumerate() {
            for (m, &want) in row.iter().enumerate() {
                let got = UDist::new(m + 1, n).cdf(u as f64);
                assert!(
                    (want - got).abs() < 0.000001,
                    "n={} m={} U={}: want {}, got {}",
                    n, m + 1, u, want, got
                );
            }
        }
    }

    #[test]
    fn test_published_tables() {
        let rows3: Vec<&[f64]> = UDIST3.iter().map(|row| row.as_slice()).collect();
        assert_matches_table(3, &rows3);
        let rows5: Vec<&[f64]> = UDIST5.iter().map(|row| row.as_slice()).collect();
        assert_matches_table(5, &rows5);
    }

    #[test]
    fn test_pmf_sums_to_one() {
        for (n1, n2) in [(1, 1), (2, 5), (4, 4), (7, 3), (8, 8)] {
            let dist = UDist::new(n1, n2);
            let total: f64 = (0..=n1 * n2).map(|u| dist.pmf(u as f64)).sum();
            assert!((total - 1.0).abs() < 1e-6, "{}x{}: sum {}", n1, n2, total);
        }
    }

    #[test]
    fn test_cdf_monotone_and_clamped() {
        let dist = UDist::new(4, 5);
        assert_eq!(dist.cdf(-0.5), 0.0);
        assert_eq!(dist.cdf(20.0), 1.0);
        assert_eq!(dist.cdf(20.5), 1.0);
        let mut prev = 0.0;
        for u in 0..=20 {
            let c = dist.cdf(u as f64);
            assert!(c >= prev, "cdf not monotone at {}", u);
            prev = c;
        }
    }

    #[test]
    fn test_untied_symmetry() {
        // Pr[U <= k] == Pr[U >= n1*n2 - k] == 1 - Pr[U <= n1*n2 - k - 1].
        let dist = UDist::new(6, 9);
        for k in 0..54 {
            assert!(aeq(dist.cdf(k as f64), 1.0 - dist.cdf((54 - k - 1) as f64)));
        }
    }

    #[test]
    fn test_large_sample_symmetry() {
        // R uses the exact distribution up to per-sample sizes of 50;
        // U = 1250 is the midpoint of the 50x50 distribution.
        let dist = UDist::new(50, 50);
        assert!(aeq(dist.cdf(1249.0), 1.0 - dist.cdf(1250.0)));
    }

    #[test]
    fn test_all_ones_tie_vector_matches_untied() {
        let untied = UDist::new(3, 4);
        let tied = UDist::with_ties(3, 4, vec![1; 7]);
        assert_eq!(tied.step(), 1.0);
        for u in 0..=12 {
            assert!(aeq(untied.pmf(u as f64), tied.pmf(u as f64)));
            assert!(aeq(untied.cdf(u as f64), tied.cdf(u as f64)));
        }
    }

    #[test]
    fn test_tied_pmf_sums_to_one() {
        for (n1, n2, t) in [
            (4usize, 4usize, vec![1, 5, 1, 1]),
            (4, 5, vec![6, 1, 1, 1]),
            (4, 4, vec![2, 2, 2, 2]),
            (3, 3, vec![3, 3]),
        ] {
            let dist = UDist::with_ties(n1, n2, t);
            assert_eq!(dist.step(), 0.5);
            let mut total = 0.0;
            let mut twou = 0;
            while twou <= 2 * n1 * n2 {
                total += dist.pmf(twou as f64 / 2.0);
                twou += 1;
            }
            assert!((total - 1.0).abs() < 1e-6, "sum {}", total);
        }
    }

    #[test]
    fn test_tied_distribution_counts() {
        // {2,1,3,5} merged with {2,2,2,2} has tie vector [1,5,1,1]; the 70
        // splits distribute over twoU as computed by direct enumeration.
        let dist = UDist::with_ties(4, 4, vec![1, 5, 1, 1]);
        assert!(aeq(10.0 / 70.0, dist.pmf(3.0)));
        assert!(aeq(15.0 / 70.0, dist.pmf(6.0)));
        assert!(aeq(15.0 / 70.0, dist.pmf(10.0)));
        assert!(aeq(10.0 / 70.0, dist.pmf(13.0)));
        assert_eq!(dist.pmf(3.4), dist.pmf(3.0));
        assert!(aeq(25.0 / 70.0, dist.cdf(6.0)));
    }

    #[test]
    fn test_tied_asymmetric_support() {
        // One six-deep tie group against three singletons: the lowest
        // achievable 2U is 8, not 0.
        let dist = UDist::with_ties(4, 5, vec![6, 1, 1, 1]);
        assert_eq!(dist.cdf(3.5), 0.0);
        assert!(aeq(15.0 / 126.0, dist.pmf(4.0)));
        assert!(aeq(6.0 / 126.0, dist.pmf(17.5)));
        assert!(aeq(1.0 - 6.0 / 126.0, dist.cdf(17.0)));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(UDist::new(4, 5).bounds(), (0.0, 20.0));
        assert_eq!(UDist::with_ties(2, 3, vec![2, 2, 2]).bounds(), (0.0, 6.0));
    }
}
