use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Invalid {field} '{value}' at row {row}: {reason}")]
    DataValidationError {
        row: usize,
        field: String,
        value: String,
        reason: String,
    },

    #[error("Series has {years} distinct year(s); at least 2 are needed to compute growth")]
    DegenerateSeries { years: usize },

    #[error("Growth distribution is empty; nothing to sample from")]
    EmptyDistribution,

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    DataQuality,
    InsufficientData,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ForecastError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::HttpError(_) => ErrorCategory::Io,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::CsvError(_) | Self::MissingColumn { .. } | Self::DataValidationError { .. } => {
                ErrorCategory::DataQuality
            }
            Self::DegenerateSeries { .. } | Self::EmptyDistribution => {
                ErrorCategory::InsufficientData
            }
            Self::SerializationError(_) | Self::InvalidParameter { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HttpError(_) => ErrorSeverity::Medium,
            Self::IoError(_)
            | Self::CsvError(_)
            | Self::MissingColumn { .. }
            | Self::DataValidationError { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::DegenerateSeries { .. }
            | Self::EmptyDistribution => ErrorSeverity::High,
            // 呼叫端應先正規化參數，走到這裡代表程式錯誤
            Self::InvalidParameter { .. } | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息，不含內部驗證細節
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::InsufficientData => {
                "Forecast unavailable: insufficient historical data".to_string()
            }
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Io => "Forecast unavailable: the dataset could not be read".to_string(),
            ErrorCategory::DataQuality | ErrorCategory::Internal => {
                "Forecast unavailable".to_string()
            }
        }
    }

    /// 依嚴重程度決定的程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::IoError(_) => "Check that the dataset path exists and is readable".to_string(),
            Self::HttpError(_) => "Check the dataset URL and network connectivity, then retry".to_string(),
            Self::CsvError(_) => "Make sure the dataset is a well-formed CSV file".to_string(),
            Self::MissingColumn { column } => format!(
                "Add a '{}' column to the dataset or point the column option at the right header",
                column
            ),
            Self::DataValidationError { row, .. } => {
                format!("Fix the value on row {} of the dataset", row)
            }
            Self::DegenerateSeries { .. } | Self::EmptyDistribution => {
                "Provide at least two years of non-zero tourist totals".to_string()
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the command line flags or configuration file".to_string()
            }
            Self::SerializationError(_) | Self::InvalidParameter { .. } => {
                "This is a bug; please report it with the verbose log".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_hides_details() {
        let err = ForecastError::DegenerateSeries { years: 1 };
        assert_eq!(err.category(), ErrorCategory::InsufficientData);
        assert_eq!(
            err.user_friendly_message(),
            "Forecast unavailable: insufficient historical data"
        );

        let err = ForecastError::DataValidationError {
            row: 3,
            field: "amount".to_string(),
            value: "-5".to_string(),
            reason: "must not be negative".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Forecast unavailable");
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn test_invalid_parameter_is_critical() {
        let err = ForecastError::InvalidParameter {
            name: "sample_count".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.exit_code(), 3);
        assert_eq!(ForecastError::EmptyDistribution.exit_code(), 1);
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = vec![
            ForecastError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
            ForecastError::ConfigError { message: "bad".to_string() },
            ForecastError::MissingColumn { column: "tahun".to_string() },
            ForecastError::DegenerateSeries { years: 1 },
            ForecastError::EmptyDistribution,
            ForecastError::InvalidParameter {
                name: "baseline".to_string(),
                reason: "must be finite".to_string(),
            },
        ];

        for err in errors {
            assert!(err.severity() >= ErrorSeverity::Medium, "{}", err);
            assert_ne!(err.exit_code(), 0, "{}", err);
        }
    }
}
