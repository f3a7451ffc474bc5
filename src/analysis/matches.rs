//! Cross-dataset label consistency check
//!
//! Every address in the ground-truth list is illicit by definition. This
//! check reports how the labeled wallet table classifies those addresses:
//! absent entirely, correctly illicit, or contradicting the ground truth.

use crate::dataset::{ClassLabel, Frame};
use crate::error::Result;
use std::collections::HashMap;

/// Outcome of checking a ground-truth address list against a labeled table
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Deduplicated ground-truth address count
    pub ground_truth_total: usize,
    /// Addresses found in the labeled table with a non-missing class
    pub present: usize,
    /// Addresses the labeled table knows nothing about
    pub absent: usize,
    /// Present addresses the labeled table also calls illicit
    pub illicit: usize,
    /// Present addresses with a class code outside the known domain
    pub unmapped: usize,
    /// Ground-truth-illicit addresses the labeled table calls licit
    pub licit_mismatches: Vec<String>,
    /// Ground-truth-illicit addresses the labeled table calls unknown
    pub unknown_mismatches: Vec<String>,
}

impl MatchReport {
    pub fn licit(&self) -> usize {
        self.licit_mismatches.len()
    }

    pub fn unknown(&self) -> usize {
        self.unknown_mismatches.len()
    }
}

/// Classify every deduplicated ground-truth address by the label the wallet
/// table assigns it.
///
/// The labeled table is indexed by first occurrence, so a duplicated address
/// there cannot fan out the counts: present + absent always equals the
/// deduplicated ground-truth total.
pub fn check_matches(ground_truth: &Frame, wallets: &Frame) -> Result<MatchReport> {
    let gt_address = ground_truth.require_column("address")?;
    let w_address = wallets.require_column("address")?;
    let w_class = wallets.require_column("class")?;

    let addresses = ground_truth.unique(gt_address);

    let mut class_by_address: HashMap<&str, &str> = HashMap::new();
    for row in 0..wallets.len() {
        class_by_address
            .entry(wallets.value(row, w_address))
            .or_insert_with(|| wallets.value(row, w_class));
    }

    let mut report = MatchReport {
        ground_truth_total: addresses.len(),
        present: 0,
        absent: 0,
        illicit: 0,
        unmapped: 0,
        licit_mismatches: Vec::new(),
        unknown_mismatches: Vec::new(),
    };

    for address in &addresses {
        match class_by_address.get(address.as_str()) {
            Some(cell) if !cell.is_empty() => {
                report.present += 1;
                match ClassLabel::from_cell(cell) {
                    Some(ClassLabel::Illicit) => report.illicit += 1,
                    Some(ClassLabel::Licit) => report.licit_mismatches.push(address.clone()),
                    Some(ClassLabel::Unknown) => report.unknown_mismatches.push(address.clone()),
                    None => report.unmapped += 1,
                }
            }
            _ => report.absent += 1,
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground_truth(addresses: &[&str]) -> Frame {
        Frame::new(
            "cb.tsv",
            vec!["address".into()],
            addresses.iter().map(|a| vec![a.to_string()]).collect(),
        )
    }

    fn wallets(rows: &[(&str, &str)]) -> Frame {
        Frame::new(
            "wallets_classes.csv",
            vec!["address".into(), "class".into()],
            rows.iter()
                .map(|(a, c)| vec![a.to_string(), c.to_string()])
                .collect(),
        )
    }

    #[test]
    fn test_dedup_and_membership_split() {
        // ground truth [A, B, A, C] vs labels A->1, B->2
        let gt = ground_truth(&["A", "B", "A", "C"]);
        let w = wallets(&[("A", "1"), ("B", "2")]);

        let report = check_matches(&gt, &w).unwrap();
        assert_eq!(report.ground_truth_total, 3);
        assert_eq!(report.present, 2);
        assert_eq!(report.absent, 1);
        assert_eq!(report.illicit, 1);
        assert_eq!(report.licit_mismatches, vec!["B".to_string()]);
        assert!(report.unknown_mismatches.is_empty());
    }

    #[test]
    fn test_counts_are_consistent() {
        let gt = ground_truth(&["A", "B", "C", "D", "E"]);
        let w = wallets(&[("A", "1"), ("B", "3"), ("C", "2"), ("D", "9")]);

        let report = check_matches(&gt, &w).unwrap();
        assert_eq!(report.present + report.absent, report.ground_truth_total);
        assert_eq!(
            report.illicit + report.licit() + report.unknown() + report.unmapped,
            report.present
        );
        assert_eq!(report.unknown_mismatches, vec!["B".to_string()]);
        assert_eq!(report.unmapped, 1);
    }

    #[test]
    fn test_duplicate_labeled_rows_do_not_fan_out() {
        let gt = ground_truth(&["A"]);
        let w = wallets(&[("A", "1"), ("A", "2")]);

        let report = check_matches(&gt, &w).unwrap();
        assert_eq!(report.present, 1);
        assert_eq!(report.illicit, 1);
    }

    #[test]
    fn test_empty_class_counts_as_absent() {
        let gt = ground_truth(&["A"]);
        let w = wallets(&[("A", "")]);

        let report = check_matches(&gt, &w).unwrap();
        assert_eq!(report.present, 0);
        assert_eq!(report.absent, 1);
    }

    #[test]
    fn test_missing_class_column_fails_eagerly() {
        let gt = ground_truth(&["A"]);
        let w = Frame::new(
            "wallets_classes.csv",
            vec!["address".into(), "label".into()],
            vec![vec!["A".into(), "1".into()]],
        );

        let err = check_matches(&gt, &w).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'class'"));
        assert!(message.contains("wallets_classes.csv"));
        assert!(message.contains("label"));
    }
}
