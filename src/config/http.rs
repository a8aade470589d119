use crate::config::cli::LocalStorage;
use crate::core::Storage;
use crate::utils::error::Result;
use reqwest::Client;

/// 以 HTTP GET 讀取資料集 (例如開放資料平台的 CSV 下載連結)
#[derive(Debug, Clone, Default)]
pub struct HttpStorage {
    client: Client,
}

impl HttpStorage {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Storage for HttpStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        tracing::debug!("Downloading dataset from: {}", path);
        let response = self.client.get(path).send().await?.error_for_status()?;
        tracing::debug!("Dataset response status: {}", response.status());

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

pub fn is_remote_source(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// 依資料來源選擇的存儲後端
#[derive(Debug, Clone)]
pub enum DatasetStorage {
    Local(LocalStorage),
    Http(HttpStorage),
}

impl DatasetStorage {
    pub fn for_source(source: &str) -> Self {
        if is_remote_source(source) {
            Self::Http(HttpStorage::new())
        } else {
            Self::Local(LocalStorage::new("."))
        }
    }
}

impl Storage for DatasetStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        match self {
            Self::Local(storage) => storage.read_file(path).await,
            Self::Http(storage) => storage.read_file(path).await,
        }
    }
}
