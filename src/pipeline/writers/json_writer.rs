use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::data_model::ResultRecord;
use crate::error::Result;
use crate::pipeline::writers::BaseWriter;

/// Stores one flat JSON object per source document at
/// `<output_dir>/<source filename><extension>`.
///
/// Writes go straight to the target file. A crash mid-write leaves a file that
/// fails to parse or is incomplete, and the document is redone on the next run.
#[derive(Debug, Clone)]
pub struct JsonWriter {
    output_dir: PathBuf,
    extension: String,
}

impl JsonWriter {
    pub fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        JsonWriter {
            output_dir: output_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn output_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(format!("{}{}", filename, self.extension))
    }
}

#[async_trait]
impl BaseWriter for JsonWriter {
    async fn load(&self, filename: &str) -> Result<Option<ResultRecord>> {
        let path = self.output_path(filename);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, filename: &str, record: &ResultRecord) -> Result<()> {
        let path = self.output_path(filename);
        let payload = serde_json::to_string(record)?;
        tokio::fs::write(&path, payload).await?;
        info!(path = %path.display(), "Result written");
        Ok(())
    }
}
