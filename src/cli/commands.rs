//! CLI command implementations
//!
//! Each command is a linear load -> merge -> aggregate -> report sequence.
//! Report bodies go to stdout; progress and chart paths go to the log.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analysis::{correlations, eda, matches as match_check, stats::Describe};
use crate::config::Config;
use crate::dataset::{ClassLabel, Frame};
use crate::plot;

/// Check the ground-truth illicit address list against the labeled wallet
/// table.
pub fn matches(config: &Config) -> Result<()> {
    info!("Loading ground truth from {}", config.data.ground_truth);
    let ground_truth = Frame::load_tsv(&config.data.ground_truth)?;
    info!("Loading labeled wallets from {}", config.data.wallets_classes);
    let wallets = Frame::load_csv(&config.data.wallets_classes)?;

    let report = match_check::check_matches(&ground_truth, &wallets)?;

    println!(
        "Total ground-truth illicit wallets: {}",
        report.ground_truth_total
    );
    println!("Found in labeled table: {}", report.present);
    println!("NOT found in labeled table: {}", report.absent);

    println!("\nLabels assigned to ground-truth illicit wallets:");
    println!("  {}  {}", ClassLabel::Illicit, report.illicit);
    println!("  {}    {}", ClassLabel::Licit, report.licit());
    println!("  {}  {}", ClassLabel::Unknown, report.unknown());
    if report.unmapped > 0 {
        println!("  (outside class domain)  {}", report.unmapped);
    }

    println!(
        "\nCorrectly labeled as illicit (class=1): {}",
        report.illicit
    );
    println!("Labeled as licit (class=2): {}", report.licit());
    println!("Labeled as unknown (class=3): {}", report.unknown());

    let sample = config.analysis.sample_len;
    println!("\nExample ground-truth-illicit but LICIT-labeled wallets:");
    println!("{:?}", head(&report.licit_mismatches, sample));
    println!("\nExample ground-truth-illicit but UNKNOWN-labeled wallets:");
    println!("{:?}", head(&report.unknown_mismatches, sample));

    Ok(())
}

/// Report feature-feature and feature-label Pearson correlations over the
/// combined wallet table.
pub fn correlations(config: &Config) -> Result<()> {
    info!("Loading combined table from {}", config.data.wallets_combined);
    let frame = Frame::load_csv(&config.data.wallets_combined)?;

    let (rows, cols) = frame.shape();
    println!("Loaded dataframe: ({}, {})", rows, cols);
    println!("Columns: {}", cols);

    let report = correlations::analyze(
        &frame,
        config.analysis.corr_threshold,
        config.analysis.top_n,
    );
    println!("Numeric feature columns: {}", report.features.len());

    println!(
        "\nHighly correlated features (|corr| >= {:.2}):",
        report.threshold
    );
    for pair in &report.redundant_pairs {
        println!("{:35} <-> {:35} : {:.3}", pair.left, pair.right, pair.corr);
    }

    match &report.label_correlations {
        Some(corrs) => {
            println!(
                "\nTop {} features most correlated with class:",
                config.analysis.top_n
            );
            for (name, r) in corrs {
                println!("{:35} {:+.3}", name, r);
            }
        }
        None => {
            println!("\nColumn 'class' not found - skipping feature-label correlation.");
        }
    }

    let dir = plots_dir(config)?;
    render(&dir.join("correlation_heatmap.png"), |p| {
        plot::heatmap(p, &report.matrix)
    })?;
    if let Some(corrs) = &report.label_correlations {
        // ascending, so the strongest correlation ends up as the top bar
        let ascending: Vec<(String, f64)> = corrs.iter().rev().cloned().collect();
        render(&dir.join("label_correlations.png"), |p| {
            plot::barh(p, &ascending)
        })?;
    }

    Ok(())
}

/// Profile the five raw dataset tables.
pub fn eda(config: &Config) -> Result<()> {
    info!("Loading raw tables");
    let txs_features = Frame::load_csv(&config.data.txs_features)?;
    let txs_classes = Frame::load_csv(&config.data.txs_classes)?;
    let txs_edges = Frame::load_csv(&config.data.txs_edgelist)?;
    let wallets_features = Frame::load_csv(&config.data.wallets_features)?;
    let wallets_classes = Frame::load_csv(&config.data.wallets_classes)?;

    let report = eda::profile(
        &txs_features,
        &txs_classes,
        &txs_edges,
        &wallets_features,
        &wallets_classes,
        config.analysis.describe_cols,
    )?;

    println!("txs: {:?}", report.tx_shape);
    println!("wallets: {:?}", report.wallet_shape);
    println!("edges: {}", report.edge_count);

    println!("\nTx class counts:");
    for (class, count) in &report.tx_class_counts {
        println!("  {}  {}", class, count);
    }
    println!("Wallet class counts:");
    for (class, count) in &report.wallet_class_counts {
        println!("  {}  {}", class, count);
    }

    println!("\nTime steps: {}", report.timestep_counts.len());
    for (step, count) in head(&report.timestep_counts, 5) {
        println!("  {}  {}", step, count);
    }
    if report.timestep_counts.len() > 5 {
        println!("  ...");
    }

    let top_n = config.analysis.top_n;
    println!("\nTop {} missing (txs):", top_n);
    for (name, frac) in head(&report.tx_missing, top_n) {
        println!("{:35} {:.4}", name, frac);
    }
    println!("\nTop {} missing (wallets):", top_n);
    for (name, frac) in head(&report.wallet_missing, top_n) {
        println!("{:35} {:.4}", name, frac);
    }

    println!("\nTx feature stats:");
    print_describe(&report.tx_describe);
    println!("\nWallet feature stats:");
    print_describe(&report.wallet_describe);

    let dir = plots_dir(config)?;
    render(&dir.join("tx_class_distribution.png"), |p| {
        plot::bars(p, &report.tx_class_counts)
    })?;
    render(&dir.join("wallet_class_distribution.png"), |p| {
        plot::bars(p, &report.wallet_class_counts)
    })?;
    render(&dir.join("txs_per_timestep.png"), |p| {
        plot::line(p, &report.timestep_counts)
    })?;

    Ok(())
}

/// Show the effective configuration
pub fn show_config(config: &Config) -> Result<()> {
    println!("[data]");
    println!("ground_truth = {}", config.data.ground_truth);
    println!("wallets_combined = {}", config.data.wallets_combined);
    println!("txs_features = {}", config.data.txs_features);
    println!("txs_classes = {}", config.data.txs_classes);
    println!("txs_edgelist = {}", config.data.txs_edgelist);
    println!("wallets_features = {}", config.data.wallets_features);
    println!("wallets_classes = {}", config.data.wallets_classes);
    println!("\n[analysis]");
    println!("corr_threshold = {}", config.analysis.corr_threshold);
    println!("top_n = {}", config.analysis.top_n);
    println!("sample_len = {}", config.analysis.sample_len);
    println!("describe_cols = {}", config.analysis.describe_cols);
    println!("\n[plots]");
    println!("dir = {}", config.plots.dir);
    Ok(())
}

fn head<T>(items: &[T], n: usize) -> &[T] {
    &items[..items.len().min(n)]
}

fn plots_dir(config: &Config) -> Result<PathBuf> {
    let dir = PathBuf::from(&config.plots.dir);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn render<F>(path: &Path, draw: F) -> Result<()>
where
    F: FnOnce(&Path) -> crate::error::Result<()>,
{
    draw(path)?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn print_describe(rows: &[(String, Describe)]) {
    println!(
        "{:35} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for (name, d) in rows {
        println!(
            "{:35} {:>8} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            name, d.count, d.mean, d.std, d.min, d.q25, d.median, d.q75, d.max
        );
    }
}
