pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::CsvDatasetPipeline;
pub use config::{cli::LocalStorage, http::DatasetStorage, http::HttpStorage, OutputFormat};
pub use crate::core::engine::{ForecastEngine, ForecastReport, SimulationRequest, SimulationSettings};
pub use crate::core::{aggregate, build_distribution, growth_ratios, simulate};
pub use utils::error::{ForecastError, Result};
