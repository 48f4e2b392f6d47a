use crate::data_model::ResultRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Trait for the per-document result store.
#[async_trait]
pub trait BaseWriter: Send + Sync {
    /// Read the existing record for `filename`. `None` when nothing was written yet.
    async fn load(&self, filename: &str) -> Result<Option<ResultRecord>>;

    /// Write (or overwrite) the record for `filename`.
    async fn persist(&self, filename: &str, record: &ResultRecord) -> Result<()>;
}
