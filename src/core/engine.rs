use crate::core::rng::ForecastRng;
use crate::core::simulate::simulate;
use crate::domain::model::{ForecastSummary, HistoricalModel, SimulationResult, YearTotal};
use crate::domain::ports::{ConfigProvider, DatasetPipeline};
use crate::utils::error::{ForecastError, Result};
use crate::utils::monitor::StageMonitor;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 預測請求的預設模擬次數
pub const DEFAULT_REQUEST_SAMPLE_COUNT: usize = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSettings {
    pub default_sample_count: usize,
    pub seed: Option<u64>,
}

impl SimulationSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            default_sample_count: config.default_sample_count(),
            seed: config.seed(),
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            default_sample_count: DEFAULT_REQUEST_SAMPLE_COUNT,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationRequest {
    pub sample_count: usize,
}

impl SimulationRequest {
    pub fn new(sample_count: usize) -> Self {
        Self { sample_count }
    }

    /// 使用者輸入的模擬次數；缺漏、無法解析或非正數時改用預設值，不回報錯誤
    pub fn from_raw(raw: Option<&str>, default: usize) -> Self {
        let parsed = raw.map(str::trim).and_then(|value| value.parse::<i64>().ok());

        let sample_count = match parsed {
            Some(count) if count > 0 => usize::try_from(count).unwrap_or(default),
            _ => {
                tracing::debug!(
                    "Simulation count {:?} is not a positive integer, using default {}",
                    raw,
                    default
                );
                default
            }
        };

        Self { sample_count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub forecast_year: Option<i32>,
    pub result: SimulationResult,
    pub summary: ForecastSummary,
    pub generated_at: DateTime<Utc>,
}

/// 對已建好的歷史模型執行一次預測
pub fn forecast_from_model<R: Rng + ?Sized>(
    model: &HistoricalModel,
    sample_count: usize,
    rng: &mut R,
) -> Result<ForecastReport> {
    if model.totals.len() < 2 {
        return Err(ForecastError::DegenerateSeries {
            years: model.totals.len(),
        });
    }
    let baseline = model
        .baseline
        .ok_or(ForecastError::DegenerateSeries { years: 0 })?;

    let result = simulate(baseline, &model.distribution, sample_count, rng)?;

    Ok(ForecastReport {
        forecast_year: model.last_year().map(|year| year + 1),
        summary: result.summary(),
        result,
        generated_at: Utc::now(),
    })
}

pub struct ForecastEngine<P: DatasetPipeline> {
    pipeline: P,
    model: Arc<HistoricalModel>,
    settings: SimulationSettings,
    monitor: StageMonitor,
}

impl<P: DatasetPipeline> ForecastEngine<P> {
    pub async fn load(pipeline: P, settings: SimulationSettings) -> Result<Self> {
        Self::load_with_monitoring(pipeline, settings, false).await
    }

    pub async fn load_with_monitoring(
        pipeline: P,
        settings: SimulationSettings,
        monitor_enabled: bool,
    ) -> Result<Self> {
        let monitor = StageMonitor::new(monitor_enabled);
        let model = Self::build_model(&pipeline, &monitor).await?;

        Ok(Self {
            pipeline,
            model: Arc::new(model),
            settings,
            monitor,
        })
    }

    async fn build_model(pipeline: &P, monitor: &StageMonitor) -> Result<HistoricalModel> {
        tracing::info!("📥 Loading historical dataset");
        let records = pipeline.extract().await?;
        tracing::info!("Extracted {} records", records.len());
        monitor.mark("extract");

        let model = pipeline.transform(records).await?;
        tracing::info!(
            "Built model: {} years, {} growth ratios, {} distinct outcomes",
            model.totals.len(),
            model.growth.len(),
            model.distribution.len()
        );
        monitor.mark("transform");

        match model.distribution.expected_ratio() {
            Some(expected) => tracing::info!("Expected growth ratio: {:.4}", expected),
            None => tracing::warn!("⚠️ Growth distribution is empty; forecasts will be unavailable"),
        }

        Ok(model)
    }

    /// 重新讀取資料集並替換模型；失敗時保留舊模型
    pub async fn reload(&mut self) -> Result<()> {
        let model = Self::build_model(&self.pipeline, &self.monitor).await?;
        self.model = Arc::new(model);
        tracing::info!("🔄 Historical model reloaded");
        Ok(())
    }

    pub fn model(&self) -> Arc<HistoricalModel> {
        Arc::clone(&self.model)
    }

    pub fn history(&self) -> &[YearTotal] {
        &self.model.totals
    }

    /// 每次呼叫建立獨立的亂數來源
    pub fn forecast(&self, request: SimulationRequest) -> Result<ForecastReport> {
        let mut rng = ForecastRng::from_seed_option(self.settings.seed);
        self.forecast_with_rng(request, &mut rng)
    }

    pub fn forecast_with_rng<R: Rng + ?Sized>(
        &self,
        request: SimulationRequest,
        rng: &mut R,
    ) -> Result<ForecastReport> {
        tracing::info!(
            "🎲 Running Monte Carlo simulation with {} draws",
            request.sample_count
        );
        let report = forecast_from_model(&self.model, request.sample_count, rng)?;
        self.monitor.mark("simulate");
        Ok(report)
    }
}
