//! Scalar statistics over columns with missing values

/// Pearson correlation between two paired series, using pairwise-complete
/// observations only. Returns 0.0 when fewer than two complete pairs exist or
/// either side is constant.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some((*a, *b)),
            _ => None,
        })
        .collect();

    let n = pairs.len();
    if n < 2 {
        return 0.0;
    }

    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x > 0.0 && var_y > 0.0 {
        cov / (var_x.sqrt() * var_y.sqrt())
    } else {
        0.0
    }
}

/// Fraction of missing cells in a column (empty = missing), in [0, 1]
pub fn missing_fraction<'a>(values: impl Iterator<Item = &'a str>) -> f64 {
    let mut total = 0usize;
    let mut missing = 0usize;
    for value in values {
        total += 1;
        if value.is_empty() {
            missing += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        missing as f64 / total as f64
    }
}

/// Linearly interpolated quantile of sorted values, `q` in [0, 1]
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    debug_assert!(n > 0);
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// count/mean/std/min/quartiles/max summary of one column, missing values
/// skipped. Matches the describe() table the dataset is usually profiled with
/// (sample standard deviation).
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Describe {
    pub fn from_column(values: &[Option<f64>]) -> Option<Self> {
        let mut present: Vec<f64> = values.iter().filter_map(|v| *v).collect();
        if present.is_empty() {
            return None;
        }
        present.sort_by(|a, b| a.total_cmp(b));

        let n = present.len();
        let mean = present.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let ss: f64 = present.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            count: n,
            mean,
            std,
            min: present[0],
            q25: quantile_sorted(&present, 0.25),
            median: quantile_sorted(&present, 0.50),
            q75: quantile_sorted(&present, 0.75),
            max: present[n - 1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().map(|&v| Some(v)).collect()
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let x = col(&[1.0, 2.0, 3.0, 4.0]);
        let y = col(&[2.0, 4.0, 6.0, 8.0]);
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);

        let neg = col(&[-2.0, -4.0, -6.0, -8.0]);
        assert!((pearson(&x, &neg) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_constant_column_is_zero() {
        let x = col(&[1.0, 2.0, 3.0]);
        let y = col(&[5.0, 5.0, 5.0]);
        assert_eq!(pearson(&x, &y), 0.0);
    }

    #[test]
    fn test_pearson_skips_incomplete_pairs() {
        let x = vec![Some(1.0), Some(2.0), None, Some(3.0)];
        let y = vec![Some(2.0), None, Some(9.0), Some(6.0)];
        // only (1,2) and (3,6) are complete pairs
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_fraction_bounds() {
        assert_eq!(missing_fraction(["", "a", ""].into_iter()), 2.0 / 3.0);
        assert_eq!(missing_fraction(["a", "b"].into_iter()), 0.0);
        assert_eq!(missing_fraction(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_describe() {
        let d = Describe::from_column(&col(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(d.count, 4);
        assert_eq!(d.mean, 2.5);
        assert_eq!(d.min, 1.0);
        assert_eq!(d.max, 4.0);
        assert_eq!(d.q25, 1.75);
        assert_eq!(d.median, 2.5);
        assert_eq!(d.q75, 3.25);
        // sample std of 1..4
        assert!((d.std - 1.2909944487358056).abs() < 1e-12);
    }

    #[test]
    fn test_describe_skips_missing() {
        let d = Describe::from_column(&[None, Some(10.0), None]).unwrap();
        assert_eq!(d.count, 1);
        assert_eq!(d.std, 0.0);
        assert_eq!(d.median, 10.0);
        assert!(Describe::from_column(&[None, None]).is_none());
    }
}
