use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use whatlang::detect;

use crate::data_model::PaperDocument;
use crate::error::{PipelineError, Result};
use crate::executor::ProcessingStep;

/// Maps text to a language code.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Result<String>;

    /// Language code plus the detector's confidence in `[0, 1]`, when it reports one.
    fn detect_with_confidence(&self, text: &str) -> Result<(String, Option<f64>)> {
        Ok((self.detect(text)?, None))
    }
}

/// `LanguageDetector` backed by `whatlang`. Codes are ISO 639-3 ("eng", "deu").
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    fn detect_info(text: &str) -> Result<whatlang::Info> {
        let info = detect(text).ok_or_else(|| {
            PipelineError::LanguageDetectionError("No language could be detected".to_string())
        })?;
        debug!(
            lang = info.lang().code(),
            confidence = info.confidence(),
            reliable = info.is_reliable(),
            "Detected language"
        );
        Ok(info)
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String> {
        Ok(Self::detect_info(text)?.lang().code().to_string())
    }

    fn detect_with_confidence(&self, text: &str) -> Result<(String, Option<f64>)> {
        let info = Self::detect_info(text)?;
        Ok((info.lang().code().to_string(), Some(info.confidence())))
    }
}

pub struct LanguageDetectionStep {
    detector: Arc<dyn LanguageDetector>,
}

impl LanguageDetectionStep {
    pub fn new(detector: Arc<dyn LanguageDetector>) -> Self {
        LanguageDetectionStep { detector }
    }
}

#[async_trait]
impl ProcessingStep for LanguageDetectionStep {
    fn name(&self) -> &'static str {
        "LanguageDetectionStep"
    }

    async fn process(&self, document: PaperDocument) -> Result<PaperDocument> {
        let mut document = document;
        let (lang, confidence) = self.detector.detect_with_confidence(&document.content)?;
        if let Some(confidence) = confidence {
            document
                .metadata
                .insert("lang_confidence".to_string(), format!("{:.3}", confidence));
        }
        document.lang = Some(lang);
        Ok(document)
    }
}
