use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ContentStartParams;
use crate::data_model::PaperDocument;
use crate::error::{PipelineError, Result};
use crate::executor::ProcessingStep;
use crate::pipeline::extraction::{locate_content_start, PageSpan, PdfExtractor};
use crate::utils::text::char_len;

/// Finds the content start page and pulls the raw text from there to the end.
/// PDF parsing is blocking work and runs on tokio's blocking pool.
pub struct TextExtractionStep {
    extractor: Arc<dyn PdfExtractor>,
    params: ContentStartParams,
}

impl TextExtractionStep {
    pub fn new(extractor: Arc<dyn PdfExtractor>, params: ContentStartParams) -> Self {
        TextExtractionStep { extractor, params }
    }
}

#[async_trait]
impl ProcessingStep for TextExtractionStep {
    fn name(&self) -> &'static str {
        "TextExtractionStep"
    }

    async fn process(&self, document: PaperDocument) -> Result<PaperDocument> {
        let mut document = document;
        let extractor = Arc::clone(&self.extractor);
        let params = self.params.clone();
        let path = document.path.clone();

        let (start_page, raw_text) = tokio::task::spawn_blocking(move || -> Result<(usize, String)> {
            let start_page = locate_content_start(extractor.as_ref(), &path, &params)?;
            let raw_text = extractor.extract_text(&path, PageSpan::ToEnd(start_page))?;
            Ok((start_page, raw_text))
        })
        .await
        .map_err(|e| PipelineError::ExtractionError(format!("Extraction task failed: {}", e)))??;

        debug!(filename = %document.filename, start_page, "Extracted raw text");
        document
            .metadata
            .insert("raw_chars".to_string(), char_len(&raw_text).to_string());
        document.start_page = Some(start_page);
        document.content = raw_text;
        Ok(document)
    }
}
