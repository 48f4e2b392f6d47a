use std::path::PathBuf;
use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The Error type for document extraction operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration validation error: {0}")]
    ConfigValidationError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization/Deserialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Source document '{}' does not exist", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Document '{filename}' is too short: {length} characters, at least {minimum} required")]
    DocumentTooShort {
        filename: String,
        length: usize,
        minimum: usize,
    },

    #[error("PDF extraction error: {0}")]
    ExtractionError(String),

    #[error("Language detection error: {0}")]
    LanguageDetectionError(String),

    #[error("Error in processing step '{step_name}': {source}")]
    StepError {
        step_name: String,
        source: Box<PipelineError>,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Strips any `StepError` wrapping and returns the error a step actually raised.
    pub fn into_root(self) -> PipelineError {
        match self {
            PipelineError::StepError { source, .. } => source.into_root(),
            other => other,
        }
    }

    pub fn is_too_short(&self) -> bool {
        match self {
            PipelineError::DocumentTooShort { .. } => true,
            PipelineError::StepError { source, .. } => source.is_too_short(),
            _ => false,
        }
    }
}
