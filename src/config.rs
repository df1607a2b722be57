// ⚙️ Configuration - data source selection shared by the CLI and the server

use crate::error::GraphError;
use crate::source::{sample_transactions, TransactionGenerator, DEFAULT_ROW_COUNT, DEFAULT_SEED};
use crate::transaction::{load_csv, Transaction};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fixed ten-row sample
    Sample,
    /// Seeded synthetic transactions
    Random,
    /// Transactions read from a CSV file
    Csv,
}

impl FromStr for DataSource {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sample" => Ok(DataSource::Sample),
            "random" => Ok(DataSource::Random),
            "csv" => Ok(DataSource::Csv),
            _ => Err(GraphError::UnknownSource(s.to_string())),
        }
    }
}

/// Where the transactions come from
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct DataArgs {
    /// Transaction source
    #[arg(long, value_enum, default_value_t = DataSource::Random, env = "NETWORK_SOURCE")]
    pub source: DataSource,

    /// Seed for the random generator
    #[arg(long, default_value_t = DEFAULT_SEED, env = "NETWORK_SEED")]
    pub seed: u64,

    /// Number of generated rows
    #[arg(long, default_value_t = DEFAULT_ROW_COUNT, env = "NETWORK_ROWS")]
    pub rows: usize,

    /// CSV file (required with --source csv)
    #[arg(long, env = "NETWORK_CSV")]
    pub csv: Option<PathBuf>,
}

impl Default for DataArgs {
    fn default() -> Self {
        Self {
            source: DataSource::Random,
            seed: DEFAULT_SEED,
            rows: DEFAULT_ROW_COUNT,
            csv: None,
        }
    }
}

impl DataArgs {
    pub fn load(&self) -> Result<Vec<Transaction>> {
        match self.source {
            DataSource::Sample => Ok(sample_transactions()),
            DataSource::Random => Ok(TransactionGenerator::new(self.seed, self.rows).generate()),
            DataSource::Csv => {
                let path = self
                    .csv
                    .as_ref()
                    .context("--csv <PATH> is required when --source csv is used")?;
                load_csv(path)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        data: DataArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["test"]);

        assert_eq!(cli.data.source, DataSource::Random);
        assert_eq!(cli.data.seed, DEFAULT_SEED);
        assert_eq!(cli.data.rows, DEFAULT_ROW_COUNT);
    }

    #[test]
    fn test_sample_source() {
        let cli = TestCli::parse_from(["test", "--source", "sample"]);
        let transactions = cli.data.load().unwrap();

        assert_eq!(transactions.len(), 10);
    }

    #[test]
    fn test_random_source_respects_seed_and_rows() {
        let cli = TestCli::parse_from(["test", "--seed", "9", "--rows", "25"]);
        let transactions = cli.data.load().unwrap();

        assert_eq!(transactions.len(), 25);
        assert_eq!(transactions, TransactionGenerator::new(9, 25).generate());
    }

    #[test]
    fn test_csv_source_requires_path() {
        let args = DataArgs {
            source: DataSource::Csv,
            ..DataArgs::default()
        };

        let err = args.load().unwrap_err();
        assert!(err.to_string().contains("--csv"));
    }

    #[test]
    fn test_parse_data_source() {
        assert_eq!("CSV".parse::<DataSource>().unwrap(), DataSource::Csv);
        assert!("db".parse::<DataSource>().is_err());
    }
}
