use crate::core::BinningPolicy;
use crate::domain::model::{HistoricalModel, YearlyRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// 資料集欄位名稱對應
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub year: String,
    pub category: String,
    pub amount: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            year: "tahun".to_string(),
            category: "jenis_wisatawan".to_string(),
            amount: "jumlah_wisatawan".to_string(),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn dataset_source(&self) -> &str;
    fn columns(&self) -> ColumnMapping;
    /// 空陣列代表納入所有類別
    fn categories(&self) -> &[String];
    fn binning(&self) -> BinningPolicy;
    fn default_sample_count(&self) -> usize;
    fn seed(&self) -> Option<u64>;
}

#[async_trait]
pub trait DatasetPipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<YearlyRecord>>;
    async fn transform(&self, records: Vec<YearlyRecord>) -> Result<HistoricalModel>;
}
