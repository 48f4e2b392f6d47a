use async_trait::async_trait;

use crate::data_model::PaperDocument;
use crate::error::{PipelineError, Result};
use crate::executor::ProcessingStep;
use crate::utils::text::char_len;

/// Rejects documents whose normalized text has `min_chars` characters or fewer.
/// Short output is mostly front matter or a failed extraction.
pub struct MinLengthFilter {
    min_chars: usize,
}

impl MinLengthFilter {
    pub fn new(min_chars: usize) -> Self {
        MinLengthFilter { min_chars }
    }
}

#[async_trait]
impl ProcessingStep for MinLengthFilter {
    fn name(&self) -> &'static str {
        "MinLengthFilter"
    }

    async fn process(&self, document: PaperDocument) -> Result<PaperDocument> {
        let length = char_len(&document.content);
        if length <= self.min_chars {
            return Err(PipelineError::DocumentTooShort {
                filename: document.filename,
                length,
                minimum: self.min_chars + 1,
            });
        }
        Ok(document)
    }
}
