use async_trait::async_trait;
use crate::types::ArticleRecord;
use crate::Result;

#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Replace the stored batch with `records`, keeping their order
    async fn store_records(&self, records: &[ArticleRecord]) -> Result<()>;

    /// Load the last stored batch
    async fn load_records(&self) -> Result<Vec<ArticleRecord>>;
}
