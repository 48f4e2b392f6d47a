use std::sync::Arc;

use async_trait::async_trait;

use crate::data_model::PaperDocument;
use crate::error::Result;
use crate::executor::ProcessingStep;
use crate::pipeline::normalize::Normalizer;
use crate::utils::text::char_len;

pub struct NormalizationStep {
    normalizer: Arc<Normalizer>,
}

impl NormalizationStep {
    pub fn new(normalizer: Arc<Normalizer>) -> Self {
        NormalizationStep { normalizer }
    }
}

#[async_trait]
impl ProcessingStep for NormalizationStep {
    fn name(&self) -> &'static str {
        "NormalizationStep"
    }

    async fn process(&self, document: PaperDocument) -> Result<PaperDocument> {
        let mut document = document;
        document.content = self.normalizer.normalize(&document.content);
        document.metadata.insert(
            "normalized_chars".to_string(),
            char_len(&document.content).to_string(),
        );
        Ok(document)
    }
}
