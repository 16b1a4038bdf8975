//! Descriptive statistics over extracted column values.

use crate::types::NumericStats;
use std::collections::HashSet;

/// Compute mean, sample std, min and max of the present values.
pub(crate) fn numeric_stats(values: &[f64]) -> NumericStats {
    NumericStats {
        mean: calculate_mean(values),
        std: calculate_std(values),
        min: values.iter().copied().reduce(f64::min),
        max: values.iter().copied().reduce(f64::max),
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub(crate) fn calculate_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1), `None` with fewer than two values.
pub(crate) fn calculate_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = calculate_mean(values)?;
    let n = values.len() as f64;

    let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt())
}

/// Number of distinct values; `-0.0` and `0.0` count as one.
pub(crate) fn distinct_numbers(values: &[f64]) -> usize {
    values
        .iter()
        .map(|v| if *v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() })
        .collect::<HashSet<u64>>()
        .len()
}

/// Pearson correlation of two aligned series of optional values.
///
/// Only rows where both sides are present are used. Returns `None` with fewer
/// than two such rows or when either side has zero variance on them.
pub(crate) fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== calculate_std tests ====================

    #[test]
    fn test_calculate_std_basic() {
        // Mean = 3, Variance = 10/4 = 2.5, Std = sqrt(2.5) ~ 1.58
        let std = calculate_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_std_single_value_is_undefined() {
        assert_eq!(calculate_std(&[5.0]), None);
    }

    #[test]
    fn test_calculate_std_identical_values() {
        assert_eq!(calculate_std(&[5.0, 5.0, 5.0, 5.0]), Some(0.0));
    }

    #[test]
    fn test_calculate_mean_empty() {
        assert_eq!(calculate_mean(&[]), None);
    }

    // ==================== numeric_stats tests ====================

    #[test]
    fn test_numeric_stats_basic() {
        let stats = numeric_stats(&[10.0, 20.0, 30.0]);
        assert_eq!(stats.mean, Some(20.0));
        assert_eq!(stats.std, Some(10.0));
        assert_eq!(stats.min, Some(10.0));
        assert_eq!(stats.max, Some(30.0));
    }

    #[test]
    fn test_numeric_stats_empty_is_all_none() {
        assert_eq!(numeric_stats(&[]), NumericStats::default());
    }

    #[test]
    fn test_distinct_numbers_merges_signed_zero() {
        assert_eq!(distinct_numbers(&[0.0, -0.0, 1.0, 1.0]), 2);
        assert_eq!(distinct_numbers(&[]), 0);
    }

    // ==================== pearson tests ====================

    #[test]
    fn test_pearson_perfect_positive() {
        let xs = [Some(1.0), Some(2.0), Some(3.0)];
        let ys = [Some(2.0), Some(4.0), Some(6.0)];
        assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let xs = [Some(1.0), Some(2.0), Some(3.0)];
        let ys = [Some(3.0), Some(2.0), Some(1.0)];
        assert!((pearson(&xs, &ys).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_uses_pairwise_complete_rows() {
        // Row 2 is dropped for this pair only; the remaining rows are perfectly correlated.
        let xs = [Some(1.0), Some(2.0), None, Some(4.0)];
        let ys = [Some(10.0), Some(20.0), Some(-100.0), Some(40.0)];
        assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_too_few_rows() {
        let xs = [Some(1.0), None];
        let ys = [Some(1.0), Some(2.0)];
        assert_eq!(pearson(&xs, &ys), None);
    }

    #[test]
    fn test_pearson_zero_variance() {
        let xs = [Some(1.0), Some(1.0), Some(1.0)];
        let ys = [Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(pearson(&xs, &ys), None);
    }
}
