//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub plots: PlotsConfig,
}

/// Input file locations. Defaults match the layout the dataset ships with,
/// relative to the working directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Ground-truth illicit address list (tab-separated)
    #[serde(default = "default_ground_truth")]
    pub ground_truth: String,
    /// Combined wallet feature/label table
    #[serde(default = "default_wallets_combined")]
    pub wallets_combined: String,
    #[serde(default = "default_txs_features")]
    pub txs_features: String,
    #[serde(default = "default_txs_classes")]
    pub txs_classes: String,
    #[serde(default = "default_txs_edgelist")]
    pub txs_edgelist: String,
    #[serde(default = "default_wallets_features")]
    pub wallets_features: String,
    #[serde(default = "default_wallets_classes")]
    pub wallets_classes: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            ground_truth: default_ground_truth(),
            wallets_combined: default_wallets_combined(),
            txs_features: default_txs_features(),
            txs_classes: default_txs_classes(),
            txs_edgelist: default_txs_edgelist(),
            wallets_features: default_wallets_features(),
            wallets_classes: default_wallets_classes(),
        }
    }
}

/// Report parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Absolute correlation at or above which a feature pair is flagged redundant
    #[serde(default = "default_corr_threshold")]
    pub corr_threshold: f64,
    /// How many label correlations / missing-value rows to report
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// How many example addresses to show per mismatch list
    #[serde(default = "default_sample_len")]
    pub sample_len: usize,
    /// How many leading numeric columns to describe per table
    #[serde(default = "default_describe_cols")]
    pub describe_cols: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            corr_threshold: default_corr_threshold(),
            top_n: default_top_n(),
            sample_len: default_sample_len(),
            describe_cols: default_describe_cols(),
        }
    }
}

/// Chart output
#[derive(Debug, Clone, Deserialize)]
pub struct PlotsConfig {
    /// Directory PNG charts are written to (created on demand)
    #[serde(default = "default_plots_dir")]
    pub dir: String,
}

impl Default for PlotsConfig {
    fn default() -> Self {
        Self {
            dir: default_plots_dir(),
        }
    }
}

fn default_ground_truth() -> String {
    "Real_Cats_data/CB.tsv".to_string()
}

fn default_wallets_combined() -> String {
    "Elipticpp_data/wallets_features_classes_combined.csv".to_string()
}

fn default_txs_features() -> String {
    "Elipticpp_data/txs_features.csv".to_string()
}

fn default_txs_classes() -> String {
    "Elipticpp_data/txs_classes.csv".to_string()
}

fn default_txs_edgelist() -> String {
    "Elipticpp_data/txs_edgelist.csv".to_string()
}

fn default_wallets_features() -> String {
    "Elipticpp_data/wallets_features.csv".to_string()
}

fn default_wallets_classes() -> String {
    "Elipticpp_data/wallets_classes.csv".to_string()
}

fn default_corr_threshold() -> f64 {
    0.80
}

fn default_top_n() -> usize {
    20
}

fn default_sample_len() -> usize {
    10
}

fn default_describe_cols() -> usize {
    5
}

fn default_plots_dir() -> String {
    "plots".to_string()
}

impl Config {
    /// Load configuration from defaults, an optional TOML file, and
    /// AUDIT__-prefixed environment variables (in that precedence order).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("AUDIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !(self.analysis.corr_threshold > 0.0 && self.analysis.corr_threshold <= 1.0) {
            anyhow::bail!(
                "corr_threshold must be in (0, 1], got {}",
                self.analysis.corr_threshold
            );
        }

        if self.analysis.top_n == 0 {
            anyhow::bail!("top_n must be non-zero");
        }

        if self.analysis.describe_cols == 0 {
            anyhow::bail!("describe_cols must be non-zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load("no-such-config.toml").unwrap();
        assert_eq!(config.data.ground_truth, "Real_Cats_data/CB.tsv");
        assert_eq!(config.analysis.corr_threshold, 0.80);
        assert_eq!(config.analysis.top_n, 20);
        assert_eq!(config.plots.dir, "plots");
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let config = Config {
            data: DataConfig::default(),
            analysis: AnalysisConfig {
                corr_threshold: 1.5,
                ..AnalysisConfig::default()
            },
            plots: PlotsConfig::default(),
        };
        assert!(config.validate().is_err());
    }
}
