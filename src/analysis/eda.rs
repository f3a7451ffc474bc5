//! Exploratory profile of the five raw dataset tables
//!
//! Purely descriptive aggregation: class distributions, the per-time-step
//! transaction histogram, missing-value ratios and describe() tables. No
//! thresholds, no derived classifications.

use crate::analysis::stats::{self, Describe};
use crate::dataset::Frame;
use crate::error::Result;
use std::collections::BTreeMap;

/// Column the temporal histogram is bucketed on
pub const TIME_STEP_COLUMN: &str = "Time step";

/// Prefix selecting the transaction feature columns that get described
pub const LOCAL_FEATURE_PREFIX: &str = "Local_feature_";

/// Descriptive profile of the joined transaction and wallet tables
#[derive(Debug, Clone)]
pub struct EdaReport {
    /// (rows, columns) of transaction features joined to labels
    pub tx_shape: (usize, usize),
    /// (rows, columns) of wallet features joined to labels
    pub wallet_shape: (usize, usize),
    /// Rows in the transaction edge list
    pub edge_count: usize,
    /// Class value -> frequency, sorted by class value
    pub tx_class_counts: Vec<(String, usize)>,
    pub wallet_class_counts: Vec<(String, usize)>,
    /// Time step -> transaction count, sorted by step
    pub timestep_counts: Vec<(i64, usize)>,
    /// Per-column missing fraction, sorted descending
    pub tx_missing: Vec<(String, f64)>,
    pub wallet_missing: Vec<(String, f64)>,
    /// describe() rows for a fixed-size prefix of numeric columns
    pub tx_describe: Vec<(String, Describe)>,
    pub wallet_describe: Vec<(String, Describe)>,
}

/// Join the raw tables and compute the profile.
pub fn profile(
    txs_features: &Frame,
    txs_classes: &Frame,
    txs_edges: &Frame,
    wallets_features: &Frame,
    wallets_classes: &Frame,
    describe_cols: usize,
) -> Result<EdaReport> {
    let txs = txs_features.left_join(txs_classes, "txId")?;
    let wallets = wallets_features.left_join(wallets_classes, "address")?;

    let tx_class_counts = value_counts(&txs, txs.require_column("class")?);
    let wallet_class_counts = value_counts(&wallets, wallets.require_column("class")?);

    let timestep_counts = timestep_counts(&txs, txs.require_column(TIME_STEP_COLUMN)?);

    let tx_missing = missing_by_column(&txs);
    let wallet_missing = missing_by_column(&wallets);

    let tx_describe_indices: Vec<usize> = (0..txs.width())
        .filter(|&c| txs.headers()[c].starts_with(LOCAL_FEATURE_PREFIX))
        .take(describe_cols)
        .collect();
    let tx_describe = describe_columns(&txs, &tx_describe_indices);

    let wallet_describe_indices: Vec<usize> = wallets
        .numeric_column_indices()
        .into_iter()
        .take(describe_cols)
        .collect();
    let wallet_describe = describe_columns(&wallets, &wallet_describe_indices);

    Ok(EdaReport {
        tx_shape: txs.shape(),
        wallet_shape: wallets.shape(),
        edge_count: txs_edges.len(),
        tx_class_counts,
        wallet_class_counts,
        timestep_counts,
        tx_missing,
        wallet_missing,
        tx_describe,
        wallet_describe,
    })
}

/// Frequency of each non-missing value of a column, sorted by value
fn value_counts(frame: &Frame, col: usize) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in frame.column_values(col) {
        if !value.is_empty() {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

/// Transaction count per time step, sorted by step. Cells that do not parse
/// as an integer step are skipped.
fn timestep_counts(frame: &Frame, col: usize) -> Vec<(i64, usize)> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for value in frame.column_values(col) {
        if let Ok(step) = value.parse::<i64>() {
            *counts.entry(step).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

/// Missing fraction for every column, sorted descending (stable, so ties
/// keep header order)
fn missing_by_column(frame: &Frame) -> Vec<(String, f64)> {
    let mut fractions: Vec<(String, f64)> = (0..frame.width())
        .map(|c| {
            (
                frame.headers()[c].clone(),
                stats::missing_fraction(frame.column_values(c)),
            )
        })
        .collect();
    fractions.sort_by(|a, b| b.1.total_cmp(&a.1));
    fractions
}

fn describe_columns(frame: &Frame, cols: &[usize]) -> Vec<(String, Describe)> {
    cols.iter()
        .filter_map(|&c| {
            Describe::from_column(&frame.numeric_column(c))
                .map(|d| (frame.headers()[c].clone(), d))
        })
        .collect()
}
