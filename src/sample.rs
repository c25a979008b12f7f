use ndarray::Array1;

/// A set of real-valued observations, optionally weighted.
///
/// Samples are externally owned. Operations that need sorted values work on
/// a private copy and never mutate the caller's data.
#[derive(Debug, Clone, Default)]
pub struct Sample {
    /// Sample values.
    pub xs: Array1<f64>,
    /// Per-value weights, parallel to `xs`. `None` means uniform weights.
    pub weights: Option<Array1<f64>>,
    /// Whether `xs` is already sorted ascending.
    pub sorted: bool,
}

impl Sample {
    /// Creates an unweighted, unsorted sample from the given values.
    pub fn new(xs: Array1<f64>) -> Sample {
        Sample {
            xs,
            weights: None,
            sorted: false,
        }
    }

    /// Returns the sample values in ascending order, copying only when the
    /// sample is not already sorted.
    pub(crate) fn sorted_xs(&self) -> Vec<f64> {
        let mut xs = self.xs.to_vec();
        if !self.sorted {
            xs.sort_by(f64::total_cmp);
        }
        xs
    }
}
