use async_trait::async_trait;
use ls_core::{ArticleRecord, Error, RecordStorage, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes the whole batch as one JSON array, replacing the file each time.
///
/// Non-ASCII text is written as-is and records keep their field order.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serialize records with four-space indentation.
pub fn to_pretty_json(records: &[ArticleRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    Ok(buf)
}

#[async_trait]
impl RecordStorage for JsonFileStorage {
    async fn store_records(&self, records: &[ArticleRecord]) -> Result<()> {
        let body = to_pretty_json(records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, body).await?;

        debug!("💾 Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    async fn load_records(&self) -> Result<Vec<ArticleRecord>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}
