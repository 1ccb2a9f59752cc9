/// A small statistics module over plain series of floats.
use statrs::statistics::Statistics;

/// Arithmetic mean, or `None` for an empty series.
pub fn mean(numbers: &[f64]) -> Option<f64> {
    if numbers.is_empty() {
        return None;
    }

    Some(numbers.mean())
}

/// Pearson correlation coefficient of two equally long series, or `None` when it is undefined
/// (fewer than two points, mismatched lengths, or a constant series).
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let covariance = xs.covariance(ys);
    let deviations = xs.std_dev() * ys.std_dev();
    if deviations == 0. || !deviations.is_finite() {
        return None;
    }

    Some(covariance / deviations)
}
