//! Small numeric helpers shared by the analyzer operations.

/// Arithmetic mean. Callers guarantee a non-empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); 0 for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let avg = mean(values);
    let variance = values.iter()
        .map(|v| (v - avg).powi(2))
        .sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Rounds to two decimal places, exact halves to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Nearest-index quantile over an ascending slice: `sorted[len * num / den]`.
/// No interpolation between neighbours.
pub fn nearest_index(sorted: &[f64], num: usize, den: usize) -> f64 {
    sorted[sorted.len() * num / den]
}
