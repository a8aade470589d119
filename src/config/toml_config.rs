use crate::config::{binning_from_decimals, DEFAULT_DATASET};
use crate::core::engine::DEFAULT_REQUEST_SAMPLE_COUNT;
use crate::core::{BinningPolicy, ColumnMapping, ConfigProvider};
use crate::utils::error::{ForecastError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_source")]
    pub source: String,
    pub year_column: Option<String>,
    pub category_column: Option<String>,
    pub amount_column: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub default_count: Option<usize>,
    pub seed: Option<u64>,
    pub round_decimals: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

fn default_source() -> String {
    DEFAULT_DATASET.to_string()
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| ForecastError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATASET_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn dataset_source(&self) -> &str {
        &self.dataset.source
    }

    fn columns(&self) -> ColumnMapping {
        let defaults = ColumnMapping::default();
        ColumnMapping {
            year: self.dataset.year_column.clone().unwrap_or(defaults.year),
            category: self
                .dataset
                .category_column
                .clone()
                .unwrap_or(defaults.category),
            amount: self.dataset.amount_column.clone().unwrap_or(defaults.amount),
        }
    }

    fn categories(&self) -> &[String] {
        &self.dataset.categories
    }

    fn binning(&self) -> BinningPolicy {
        binning_from_decimals(self.simulation.round_decimals)
    }

    fn default_sample_count(&self) -> usize {
        self.simulation
            .default_count
            .unwrap_or(DEFAULT_REQUEST_SAMPLE_COUNT)
    }

    fn seed(&self) -> Option<u64> {
        self.simulation.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_dataset_source("dataset.source", &self.dataset.source)?;

        let columns = self.columns();
        validation::validate_non_empty_string("dataset.year_column", &columns.year)?;
        validation::validate_non_empty_string("dataset.category_column", &columns.category)?;
        validation::validate_non_empty_string("dataset.amount_column", &columns.amount)?;

        if let Some(count) = self.simulation.default_count {
            validation::validate_positive_number("simulation.default_count", count, 1)?;
        }
        if let Some(decimals) = self.simulation.round_decimals {
            validation::validate_range("simulation.round_decimals", decimals, 0, 12)?;
        }
        if let Some(level) = self.log_level() {
            validation::validate_log_level("monitoring.log_level", level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[dataset]
source = "https://opendata.example.go.id/wisatawan.csv"
year_column = "year"
categories = ["DOMESTIK", "MANCANEGARA"]

[simulation]
default_count = 5000
seed = 42
round_decimals = 4

[monitoring]
enabled = true
log_level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.dataset_source(), "https://opendata.example.go.id/wisatawan.csv");
        assert_eq!(config.columns().year, "year");
        assert_eq!(config.columns().amount, "jumlah_wisatawan");
        assert_eq!(config.categories().len(), 2);
        assert_eq!(config.default_sample_count(), 5000);
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.binning(), BinningPolicy::RoundTo { decimals: 4 });
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[dataset]\n").unwrap();

        assert_eq!(config.dataset_source(), DEFAULT_DATASET);
        assert_eq!(config.columns(), ColumnMapping::default());
        assert_eq!(config.default_sample_count(), 3000);
        assert_eq!(config.binning(), BinningPolicy::Exact);
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TOURISM_FORECAST_TEST_SOURCE", "/data/wisatawan.csv");

        let toml_content = r#"
[dataset]
source = "${TOURISM_FORECAST_TEST_SOURCE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.dataset.source, "/data/wisatawan.csv");

        std::env::remove_var("TOURISM_FORECAST_TEST_SOURCE");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[dataset]
source = "ftp://example.com/data.csv"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[dataset]
source = "data.csv"

[simulation]
default_count = 0
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_fails_validation() {
        let toml_content = r#"
[dataset]
source = "data.csv"

[monitoring]
log_level = "tourism_forecast=loud"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InvalidConfigValueError { ref field, .. } if field == "monitoring.log_level"
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[dataset\nsource = 1").unwrap_err();
        assert!(matches!(err, ForecastError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[dataset]\nsource = \"file-test.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.dataset_source(), "file-test.csv");
    }
}
