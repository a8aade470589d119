pub mod aggregate;
pub mod distribution;
pub mod engine;
pub mod growth;
pub mod rng;
pub mod simulate;

pub use crate::domain::model::{
    GrowthDistribution, GrowthRatio, HistoricalModel, SimulationResult, YearTotal, YearlyRecord,
};
pub use crate::domain::ports::{ColumnMapping, ConfigProvider, DatasetPipeline, Storage};
pub use crate::utils::error::Result;

pub use aggregate::{aggregate, filter_categories};
pub use distribution::{build_distribution, build_distribution_with, BinningPolicy};
pub use growth::{extract_growth, growth_ratios, GrowthSeries};
pub use simulate::simulate;
