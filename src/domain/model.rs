use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 原始資料的一列：某年某類遊客的人數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: i32,
    pub category: String,
    pub amount: f64,
}

impl YearlyRecord {
    pub fn new(year: i32, category: impl Into<String>, amount: f64) -> Self {
        Self {
            year,
            category: category.into(),
            amount,
        }
    }
}

/// 單一年度的彙總；`total` 為所有類別之和
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTotal {
    pub year: i32,
    pub total: f64,
    #[serde(default)]
    pub by_category: BTreeMap<String, f64>,
}

impl YearTotal {
    pub fn new(year: i32, total: f64) -> Self {
        Self {
            year,
            total,
            by_category: BTreeMap::new(),
        }
    }

    /// 類別缺漏時視為 0
    pub fn category_amount(&self, category: &str) -> f64 {
        self.by_category.get(category).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRatio {
    pub year: i32,
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub ratio: f64,
    pub count: usize,
    pub probability: f64,
}

/// 成長率的經驗分布，entries 依 ratio 由小到大排列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthDistribution {
    entries: Vec<DistributionEntry>,
    observations: usize,
}

impl GrowthDistribution {
    pub(crate) fn from_entries(entries: Vec<DistributionEntry>, observations: usize) -> Self {
        Self {
            entries,
            observations,
        }
    }

    pub fn entries(&self) -> &[DistributionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 相異 ratio 的數量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 建立分布時採用的觀測值總數
    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn probability_of(&self, ratio: f64) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.ratio == ratio)
            .map(|entry| entry.probability)
    }

    pub fn total_probability(&self) -> f64 {
        self.entries.iter().map(|entry| entry.probability).sum()
    }

    pub fn expected_ratio(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(
            self.entries
                .iter()
                .map(|entry| entry.ratio * entry.probability)
                .sum(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub sample_count: usize,
    pub baseline: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl SimulationResult {
    /// 顯示用的整數版本 (向零截斷)
    pub fn summary(&self) -> ForecastSummary {
        ForecastSummary {
            sample_count: self.sample_count,
            baseline: self.baseline as i64,
            mean: self.mean as i64,
            min: self.min as i64,
            max: self.max as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub sample_count: usize,
    pub baseline: i64,
    pub mean: i64,
    pub min: i64,
    pub max: i64,
}

/// 由歷史資料推導出的唯讀狀態，載入後不再變動
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalModel {
    pub totals: Vec<YearTotal>,
    pub growth: Vec<GrowthRatio>,
    pub excluded_years: Vec<i32>,
    pub distribution: GrowthDistribution,
    pub baseline: Option<f64>,
}

impl HistoricalModel {
    pub fn last_year(&self) -> Option<i32> {
        self.totals.last().map(|total| total.year)
    }
}
