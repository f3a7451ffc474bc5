//! Pairwise Pearson correlation over the combined feature/label table

use crate::analysis::stats;
use crate::dataset::Frame;

/// Name of the label column in the combined table
pub const LABEL_COLUMN: &str = "class";

/// A feature pair flagged as redundant
#[derive(Debug, Clone, PartialEq)]
pub struct RedundantPair {
    pub left: String,
    pub right: String,
    pub corr: f64,
}

/// Full correlation report over one wide numeric table
#[derive(Debug, Clone)]
pub struct CorrelationReport {
    /// Numeric feature columns, label excluded, in header order
    pub features: Vec<String>,
    /// Symmetric Pearson matrix indexed like `features`, diagonal 1.0
    pub matrix: Vec<Vec<f64>>,
    /// Threshold the redundant pairs were flagged at
    pub threshold: f64,
    /// Strict-upper-triangle pairs with |corr| >= threshold
    pub redundant_pairs: Vec<RedundantPair>,
    /// Top-N feature/label correlations by descending |corr|; None when the
    /// label column is absent
    pub label_correlations: Option<Vec<(String, f64)>>,
}

/// Compute the correlation report. Non-numeric columns are silently
/// excluded; a missing label column degrades to feature-feature reporting
/// only.
pub fn analyze(frame: &Frame, threshold: f64, top_n: usize) -> CorrelationReport {
    let label_col = frame
        .column_index(LABEL_COLUMN)
        .filter(|&c| frame.is_numeric(c));

    let feature_cols: Vec<usize> = frame
        .numeric_column_indices()
        .into_iter()
        .filter(|&c| Some(c) != label_col)
        .collect();

    let features: Vec<String> = feature_cols
        .iter()
        .map(|&c| frame.headers()[c].clone())
        .collect();

    let columns: Vec<Vec<Option<f64>>> = feature_cols
        .iter()
        .map(|&c| frame.numeric_column(c))
        .collect();

    let n = columns.len();
    let mut matrix = vec![vec![0.0; n]; n];
    let mut redundant_pairs = Vec::new();

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = stats::pearson(&columns[i], &columns[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;

            if r.abs() >= threshold {
                redundant_pairs.push(RedundantPair {
                    left: features[i].clone(),
                    right: features[j].clone(),
                    corr: r,
                });
            }
        }
    }

    let label_correlations = label_col.map(|c| {
        let label = frame.numeric_column(c);
        let mut corrs: Vec<(String, f64)> = features
            .iter()
            .zip(columns.iter())
            .map(|(name, column)| (name.clone(), stats::pearson(column, &label)))
            .collect();
        corrs.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        corrs.truncate(top_n);
        corrs
    });

    CorrelationReport {
        features,
        matrix,
        threshold,
        redundant_pairs,
        label_correlations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(headers: &[&str], rows: &[&[&str]]) -> Frame {
        Frame::new(
            "combined.csv",
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn sample() -> Frame {
        // f2 = 2 * f1 (perfectly correlated); f3 uncorrelated noise
        frame(
            &["address", "f1", "f2", "f3", "class"],
            &[
                &["a1", "1", "2", "5", "1"],
                &["a2", "2", "4", "-3", "2"],
                &["a3", "3", "6", "4", "1"],
                &["a4", "4", "8", "-1", "2"],
                &["a5", "5", "10", "2", "1"],
            ],
        )
    }

    #[test]
    fn test_non_numeric_and_label_columns_excluded() {
        let report = analyze(&sample(), 0.80, 20);
        assert_eq!(
            report.features,
            vec!["f1".to_string(), "f2".to_string(), "f3".to_string()]
        );
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let report = analyze(&sample(), 0.80, 20);
        let n = report.features.len();
        for i in 0..n {
            assert_eq!(report.matrix[i][i], 1.0);
            for j in 0..n {
                assert_eq!(report.matrix[i][j], report.matrix[j][i]);
            }
        }
    }

    #[test]
    fn test_perfect_pair_reported_exactly_once() {
        let report = analyze(&sample(), 0.80, 20);
        assert_eq!(report.redundant_pairs.len(), 1);
        let pair = &report.redundant_pairs[0];
        assert_eq!(pair.left, "f1");
        assert_eq!(pair.right, "f2");
        assert!((pair.corr - 1.0).abs() < 1e-12);
        // never a self-pair
        assert_ne!(pair.left, pair.right);
    }

    #[test]
    fn test_label_correlations_sorted_by_descending_abs() {
        let report = analyze(&sample(), 0.80, 20);
        let corrs = report.label_correlations.unwrap();
        assert_eq!(corrs.len(), 3);
        for window in corrs.windows(2) {
            assert!(window[0].1.abs() >= window[1].1.abs());
        }
    }

    #[test]
    fn test_top_n_truncation() {
        let report = analyze(&sample(), 0.80, 2);
        assert_eq!(report.label_correlations.unwrap().len(), 2);
    }

    #[test]
    fn test_missing_label_degrades_gracefully() {
        let f = frame(
            &["f1", "f2"],
            &[&["1", "2"], &["2", "4"], &["3", "6"]],
        );
        let report = analyze(&f, 0.80, 20);
        assert!(report.label_correlations.is_none());
        // feature-feature reporting still runs
        assert_eq!(report.redundant_pairs.len(), 1);
    }
}
