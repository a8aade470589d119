pub mod csv_pipeline;

pub use csv_pipeline::CsvDatasetPipeline;
