use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        // 絕對路徑會取代 base_path
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_relative_and_absolute() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.csv"), b"tahun\n2020\n").unwrap();

        let storage = LocalStorage::new(dir.path());
        assert_eq!(storage.read_file("data.csv").await.unwrap(), b"tahun\n2020\n");

        let absolute = dir.path().join("data.csv");
        let storage = LocalStorage::new(".");
        assert!(storage.read_file(absolute.to_str().unwrap()).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let err = storage.read_file("missing.csv").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::ForecastError::IoError(_)));
    }
}
