use crate::core::{
    aggregate, build_distribution_with, extract_growth, filter_categories, ColumnMapping,
    ConfigProvider, DatasetPipeline, HistoricalModel, Storage, YearlyRecord,
};
use crate::utils::error::{ForecastError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

pub struct CsvDatasetPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> CsvDatasetPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> DatasetPipeline for CsvDatasetPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<YearlyRecord>> {
        let source = self.config.dataset_source();
        tracing::debug!("Reading dataset from: {}", source);

        let data = self.storage.read_file(source).await?;
        tracing::debug!("Dataset size: {} bytes", data.len());

        parse_records(&data, &self.config.columns())
    }

    async fn transform(&self, records: Vec<YearlyRecord>) -> Result<HistoricalModel> {
        let records = filter_categories(records, self.config.categories());

        // 1. 依年份彙總
        let totals = aggregate(&records)?;
        for total in &totals {
            tracing::debug!(
                "  {} total={} {:?}",
                total.year,
                total.total,
                total.by_category
            );
        }

        // 2. 逐年成長率
        let growth = extract_growth(&totals);
        for ratio in &growth.ratios {
            tracing::debug!("  {} growth={:.6}", ratio.year, ratio.ratio);
        }
        if !growth.excluded_years.is_empty() {
            tracing::warn!(
                "⚠️ {} year(s) excluded from growth: {:?}",
                growth.excluded_years.len(),
                growth.excluded_years
            );
        }

        // 3. 機率分布
        let values: Vec<f64> = growth.ratios.iter().map(|g| g.ratio).collect();
        let distribution = build_distribution_with(&values, self.config.binning());
        for entry in distribution.entries() {
            tracing::debug!(
                "  ratio={:.6} count={} p={:.4}",
                entry.ratio,
                entry.count,
                entry.probability
            );
        }

        Ok(HistoricalModel {
            baseline: totals.last().map(|total| total.total),
            distribution,
            growth: growth.ratios,
            excluded_years: growth.excluded_years,
            totals,
        })
    }
}

/// 解析 CSV，依欄位名稱取出年份、類別與人數
pub fn parse_records(data: &[u8], columns: &ColumnMapping) -> Result<Vec<YearlyRecord>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(data);

    let headers = reader.headers()?.clone();
    let year_idx = column_index(&headers, &columns.year)?;
    let category_idx = column_index(&headers, &columns.category)?;
    let amount_idx = column_index(&headers, &columns.amount)?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // 標題為第 1 行
        let line = row
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(i + 2);

        let field = |idx: usize| row.get(idx).unwrap_or("");

        records.push(YearlyRecord {
            year: parse_year(line, &columns.year, field(year_idx))?,
            category: parse_category(line, &columns.category, field(category_idx))?,
            amount: parse_amount(line, &columns.amount, field(amount_idx))?,
        });
    }

    Ok(records)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| ForecastError::MissingColumn {
            column: name.to_string(),
        })
}

fn invalid(row: usize, field: &str, value: &str, reason: &str) -> ForecastError {
    ForecastError::DataValidationError {
        row,
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// `2019` 與 `2019.0` 都接受；`2019.5` 拒絕
fn parse_year(row: usize, field: &str, raw: &str) -> Result<i32> {
    let year = match raw.parse::<i32>() {
        Ok(year) => year,
        Err(_) => {
            let value: f64 = raw
                .parse()
                .map_err(|_| invalid(row, field, raw, "year must be numeric"))?;
            if !value.is_finite() || value.fract() != 0.0 {
                return Err(invalid(row, field, raw, "year must be an integer"));
            }
            if value < i32::MIN as f64 || value > i32::MAX as f64 {
                return Err(invalid(row, field, raw, "year is out of range"));
            }
            value as i32
        }
    };

    if year < 0 {
        return Err(invalid(row, field, raw, "year must not be negative"));
    }
    Ok(year)
}

fn parse_amount(row: usize, field: &str, raw: &str) -> Result<f64> {
    if raw.is_empty() {
        return Err(invalid(row, field, raw, "amount is empty"));
    }
    let amount: f64 = raw
        .parse()
        .map_err(|_| invalid(row, field, raw, "amount must be numeric"))?;
    if !amount.is_finite() {
        return Err(invalid(row, field, raw, "amount must be finite"));
    }
    if amount < 0.0 {
        return Err(invalid(row, field, raw, "amount must not be negative"));
    }
    Ok(amount)
}

fn parse_category(row: usize, field: &str, raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(invalid(row, field, raw, "category is empty"));
    }
    Ok(raw.to_string())
}
