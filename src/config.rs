// src/config.rs
use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub mod worker;

pub const DEFAULT_MAX_PAGES: usize = 5;
pub const DEFAULT_PAGE_CHAR_THRESHOLD: usize = 1300;
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;
pub const DEFAULT_MIN_PLAINTEXT_CHARS: usize = 6000;
pub const DEFAULT_OUTPUT_EXTENSION: &str = ".json";
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Settings for one extraction run, read from YAML. Every field is optional in the file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub content_start: ContentStartParams,
    #[serde(default)]
    pub normalization: NormalizationParams,
    /// Documents whose normalized text is this long or shorter are rejected.
    #[serde(default = "default_min_plaintext_chars")]
    pub min_plaintext_chars: usize,
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
    /// Maximum number of documents processed at the same time.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            content_start: ContentStartParams::default(),
            normalization: NormalizationParams::default(),
            min_plaintext_chars: DEFAULT_MIN_PLAINTEXT_CHARS,
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<()> {
        self.content_start.validate()?;
        self.normalization.validate()?;
        if !self.output_extension.starts_with('.') || self.output_extension.len() < 2 {
            return Err(PipelineError::ConfigValidationError(format!(
                "output_extension must start with '.' and name an extension, got '{}'",
                self.output_extension
            )));
        }
        if self.concurrency == 0 {
            return Err(PipelineError::ConfigValidationError(
                "concurrency must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for locating the first page with real content.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ContentStartParams {
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_page_char_threshold")]
    pub page_char_threshold: usize,
}

impl Default for ContentStartParams {
    fn default() -> Self {
        ContentStartParams {
            max_pages: DEFAULT_MAX_PAGES,
            page_char_threshold: DEFAULT_PAGE_CHAR_THRESHOLD,
        }
    }
}

impl ContentStartParams {
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(PipelineError::ConfigValidationError(
                "ContentStartParams: max_pages must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// Parameters for the normalization chain
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct NormalizationParams {
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

impl Default for NormalizationParams {
    fn default() -> Self {
        NormalizationParams {
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl NormalizationParams {
    pub fn validate(&self) -> Result<()> {
        if self.min_token_len == 0 {
            return Err(PipelineError::ConfigValidationError(
                "NormalizationParams: min_token_len must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

fn default_page_char_threshold() -> usize {
    DEFAULT_PAGE_CHAR_THRESHOLD
}

fn default_min_token_len() -> usize {
    DEFAULT_MIN_TOKEN_LEN
}

fn default_min_plaintext_chars() -> usize {
    DEFAULT_MIN_PLAINTEXT_CHARS
}

fn default_output_extension() -> String {
    DEFAULT_OUTPUT_EXTENSION.to_string()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

/// Loads and parses the extraction configuration YAML file.
pub fn load_extraction_config<P: AsRef<Path>>(config_path: P) -> Result<ExtractionConfig> {
    let path_ref = config_path.as_ref();
    let config_content = fs::read_to_string(path_ref).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to read extraction config file '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    serde_yaml::from_str(&config_content).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to parse extraction config YAML from '{}': {}",
            path_ref.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Helper to create a temporary config file with given content
    fn create_temp_config_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "{}", content).expect("Failed to write to temp file");
        temp_file
    }

    #[test]
    fn test_load_valid_config() {
        let yaml_content = r#"
content_start:
  max_pages: 7
  page_char_threshold: 900
normalization:
  min_token_len: 2
min_plaintext_chars: 4000
output_extension: ".txt.json"
concurrency: 8
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let config = load_extraction_config(temp_file.path()).unwrap();

        assert_eq!(config.content_start.max_pages, 7);
        assert_eq!(config.content_start.page_char_threshold, 900);
        assert_eq!(config.normalization.min_token_len, 2);
        assert_eq!(config.min_plaintext_chars, 4000);
        assert_eq!(config.output_extension, ".txt.json");
        assert_eq!(config.concurrency, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_file = create_temp_config_file("content_start:\n  max_pages: 3\n");
        let config = load_extraction_config(temp_file.path()).unwrap();

        assert_eq!(config.content_start.max_pages, 3);
        assert_eq!(config.content_start.page_char_threshold, DEFAULT_PAGE_CHAR_THRESHOLD);
        assert_eq!(config.normalization, NormalizationParams::default());
        assert_eq!(config.min_plaintext_chars, DEFAULT_MIN_PLAINTEXT_CHARS);
        assert_eq!(config.output_extension, DEFAULT_OUTPUT_EXTENSION);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_extraction_config("non_existent_config.yaml");
        match result.err().unwrap() {
            PipelineError::ConfigError(msg) => {
                assert!(msg.contains("Failed to read extraction config file"));
            }
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let temp_file = create_temp_config_file("content_start: [unclosed");
        match load_extraction_config(temp_file.path()).err().unwrap() {
            PipelineError::ConfigError(msg) => {
                assert!(msg.contains("Failed to parse extraction config YAML"));
            }
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ExtractionConfig::default();
        config.content_start.max_pages = 0;
        assert!(matches!(
            config.validate(),
            Err(PipelineError::ConfigValidationError(_))
        ));

        let mut config = ExtractionConfig::default();
        config.output_extension = "json".to_string();
        assert!(config.validate().is_err());

        let mut config = ExtractionConfig::default();
        config.concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractionConfig::default();
        config.normalization.min_token_len = 0;
        assert!(config.validate().is_err());
    }
}
