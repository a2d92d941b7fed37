use async_trait::async_trait;
use ls_core::{ArticleRecord, RecordStorage, Result};
use tokio::sync::RwLock;

/// Keeps the last stored batch in process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<Vec<ArticleRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStorage for MemoryStorage {
    async fn store_records(&self, records: &[ArticleRecord]) -> Result<()> {
        let mut stored = self.records.write().await;
        *stored = records.to_vec();
        Ok(())
    }

    async fn load_records(&self) -> Result<Vec<ArticleRecord>> {
        Ok(self.records.read().await.clone())
    }
}
