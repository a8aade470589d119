pub mod cli;
pub mod http;
pub mod toml_config;

use crate::core::BinningPolicy;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::core::engine::DEFAULT_REQUEST_SAMPLE_COUNT;
#[cfg(feature = "cli")]
use crate::core::{ColumnMapping, ConfigProvider};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_DATASET: &str = "jumlah_wisatawan_mancanegara_domestik_datang_ke_kota_bandung.csv";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// `None` 代表精確比對
pub fn binning_from_decimals(decimals: Option<u32>) -> BinningPolicy {
    match decimals {
        Some(decimals) => BinningPolicy::RoundTo { decimals },
        None => BinningPolicy::Exact,
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tourism-forecast")]
#[command(about = "Monte Carlo forecast of next-year tourist arrivals from historical growth")]
pub struct CliConfig {
    /// CSV dataset path or http(s) URL
    #[arg(long, default_value = DEFAULT_DATASET)]
    pub data: String,

    /// Number of simulations; invalid or non-positive values fall back to the default
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub simulations: Option<String>,

    /// Fixed random seed for reproducible forecasts
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only aggregate these categories (comma separated); all categories when empty
    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<String>,

    #[arg(long, default_value = "tahun")]
    pub year_column: String,

    #[arg(long, default_value = "jenis_wisatawan")]
    pub category_column: String,

    #[arg(long, default_value = "jumlah_wisatawan")]
    pub amount_column: String,

    /// Round growth ratios to this many decimals before building the distribution
    #[arg(long)]
    pub round_decimals: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the per-year totals table before the forecast
    #[arg(long)]
    pub show_history: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log time and memory per pipeline stage")]
    pub monitor: bool,

    #[arg(long, help = "Write logs to stderr as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn dataset_source(&self) -> &str {
        &self.data
    }

    fn columns(&self) -> ColumnMapping {
        ColumnMapping {
            year: self.year_column.clone(),
            category: self.category_column.clone(),
            amount: self.amount_column.clone(),
        }
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn binning(&self) -> BinningPolicy {
        binning_from_decimals(self.round_decimals)
    }

    fn default_sample_count(&self) -> usize {
        DEFAULT_REQUEST_SAMPLE_COUNT
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_dataset_source("data", &self.data)?;
        validation::validate_non_empty_string("year_column", &self.year_column)?;
        validation::validate_non_empty_string("category_column", &self.category_column)?;
        validation::validate_non_empty_string("amount_column", &self.amount_column)?;
        for category in &self.categories {
            validation::validate_non_empty_string("categories", category)?;
        }
        if let Some(decimals) = self.round_decimals {
            validation::validate_range("round_decimals", decimals, 0, 12)?;
        }
        Ok(())
    }
}
