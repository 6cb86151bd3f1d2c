use statrs::statistics::Statistics;

use crate::types::RevisionResultSet;

/// Arithmetic mean of a revision's samples, `NaN` when there are none.
pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().mean()
}

/// Mean of every revision in a series, in revision order.
pub fn series_means(series: &[RevisionResultSet]) -> Vec<f64> {
    series.iter().map(|samples| mean(samples)).collect()
}
