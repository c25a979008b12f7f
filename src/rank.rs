/// Tie-aware rank assignment over the merge of two sorted samples.
///
/// Each maximal run of equal values (a tie group) receives the average of
/// the 1-based ranks it spans, following the usual average-rank convention
/// for rank tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RankMerge {
    /// Sum over tie groups of (average rank x observations from sample 1).
    pub r1: f64,
    /// Tie vector: the number of observations in each rank group, in merge
    /// order. Sums to n1 + n2; all ones iff there are no ties.
    pub t: Vec<usize>,
    /// Whether any rank group holds more than one observation.
    pub has_ties: bool,
}

/// Merges two samples, pre-sorted ascending, into tie-aware ranks.
pub fn rank_merge(x1: &[f64], x2: &[f64]) -> RankMerge {
    let mut r1 = 0.0;
    let mut t = Vec::new();
    let mut has_ties = false;

    let (mut i, mut j) = (0, 0);
    while i < x1.len() || j < x2.len() {
        // Value of the next rank group is the smaller unconsumed head.
        let v = match (x1.get(i), x2.get(j)) {
            (Some(&a), Some(&b)) => a.min(b),
            (Some(&a), None) => a,
            (None, Some(&b)) => b,
            (None, None) => unreachable!(),
        };

        // Consume the full run of values equal to v from both samples.
        let start = i + j;
        let mut from1 = 0;
        while i < x1.len() && x1[i] == v {
            i += 1;
            from1 += 1;
        }
        while j < x2.len() && x2[j] == v {
            j += 1;
        }
        let run = (i + j) - start;
        if run > 1 {
            has_ties = true;
        }

        // Every member of the run gets the average rank of the run, where
        // the first merged element has rank 1.
        if from1 != 0 {
            let rank = ((start + 1) + (start + run)) as f64 / 2.0;
            r1 += rank * from1 as f64;
        }
        t.push(run);
    }

    RankMerge { r1, t, has_ties }
}

/// The tie correction factor sum(run^3 - run) over all rank groups, used by
/// the normal approximation's variance.
pub fn tie_correction(t: &[usize]) -> f64 {
    t.iter().map(|&run| (run * run * run - run) as f64).sum()
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_no_ties() {
        // x1 ranks: 1, 2, 5; x2 ranks: 3, 4, 6.
        let m = rank_merge(&[10.0, 20.0, 50.0], &[30.0, 40.0, 60.0]);
        assert_eq!(m.r1, 8.0);
        assert_eq!(m.t, vec![1; 6]);
        assert!(!m.has_ties);
    }

    #[test]
    fn test_average_ranks() {
        // x1 ranks: 1, 2, 5.5, 5.5; x2 ranks: 3, 4, 7.5, 7.5.
        let m = rank_merge(&[10.0, 20.0, 50.0, 50.0], &[30.0, 40.0, 60.0, 60.0]);
        assert_eq!(m.r1, 14.0);
        assert_eq!(m.t, vec![1, 1, 1, 1, 2, 2]);
        assert!(m.has_ties);
    }

    #[test]
    fn test_cross_sample_tie() {
        // The run of 2s spans both samples: ranks 2, 3, 4 average to 3.
        let m = rank_merge(&[1.0, 2.0], &[2.0, 2.0, 5.0]);
        assert_eq!(m.r1, 4.0);
        assert_eq!(m.t, vec![1, 3, 1]);
        assert!(m.has_ties);
        assert_eq!(m.t.iter().sum::<usize>(), 5);
    }

    #[test]
    fn test_all_equal_single_group() {
        let m = rank_merge(&[7.0, 7.0], &[7.0, 7.0, 7.0]);
        assert_eq!(m.t, vec![5]);
        // Average rank 3 for both sample-1 observations.
        assert_eq!(m.r1, 6.0);
    }

    #[test]
    fn test_one_sample_empty() {
        let m = rank_merge(&[], &[1.0, 2.0]);
        assert_eq!(m.r1, 0.0);
        assert_eq!(m.t, vec![1, 1]);
    }

    #[test]
    fn test_tie_correction() {
        assert_eq!(tie_correction(&[1, 1, 1]), 0.0);
        assert_eq!(tie_correction(&[2]), 6.0);
        assert_eq!(tie_correction(&[1, 3, 1]), 24.0);
    }
}
