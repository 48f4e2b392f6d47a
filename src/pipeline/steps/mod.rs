// src/pipeline/steps/mod.rs

mod language;
mod length_filter;
mod normalization;
mod text_extraction;

// Re-export the main types
pub use language::{LanguageDetectionStep, LanguageDetector, WhatlangDetector};
pub use length_filter::MinLengthFilter;
pub use normalization::NormalizationStep;
pub use text_extraction::TextExtractionStep;
