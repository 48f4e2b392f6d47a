use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;

/// A source PDF as it moves through the extraction steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperDocument {
    pub filename: String, // Name of the PDF inside the working directory
    pub path: PathBuf,    // Full path to the PDF
    pub content: String,  // Raw text after extraction, normalized text afterwards
    pub start_page: Option<usize>,
    pub lang: Option<String>,
    pub metadata: HashMap<String, String>, // For intermediate results or context
}

impl PaperDocument {
    pub fn new(filename: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        PaperDocument {
            filename: filename.into(),
            path: path.into(),
            ..Default::default()
        }
    }
}

/// The JSON object persisted for every processed PDF.
///
/// Only `lang`, `plaintext` and `filename` are owned by this crate. Any other key
/// found in an existing output file is carried through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plaintext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultRecord {
    pub fn from_document(document: &PaperDocument) -> Self {
        ResultRecord {
            lang: document.lang.clone(),
            plaintext: Some(document.content.clone()),
            filename: Some(document.filename.clone()),
            extra: Map::new(),
        }
    }

    /// A record is complete once all three required keys are present.
    pub fn is_complete(&self) -> bool {
        self.lang.is_some() && self.plaintext.is_some() && self.filename.is_some()
    }

    /// Overlays a freshly extracted record onto `self`.
    ///
    /// `lang` and `plaintext` are replaced, an existing `filename` is kept, and
    /// every other key already present stays as it was.
    pub fn merge(&mut self, fresh: ResultRecord) {
        if fresh.lang.is_some() {
            self.lang = fresh.lang;
        }
        if fresh.plaintext.is_some() {
            self.plaintext = fresh.plaintext;
        }
        if self.filename.is_none() {
            self.filename = fresh.filename;
        }
        for (key, value) in fresh.extra {
            self.extra.entry(key).or_insert(value);
        }
    }
}

/// Per-document outcome sent on the status channel. Exactly one per worker run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatusMessage {
    Complete { filename: String },
    Broken { filename: String, error: String },
}

impl StatusMessage {
    pub fn filename(&self) -> &str {
        match self {
            StatusMessage::Complete { filename } => filename,
            StatusMessage::Broken { filename, .. } => filename,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, StatusMessage::Complete { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_record_keeps_unknown_keys() {
        let raw = r#"{"filename":"paper.pdf","reviewer":"kim","score":4}"#;
        let record: ResultRecord = serde_json::from_str(raw).unwrap();
        assert!(!record.is_complete());
        assert_eq!(record.filename.as_deref(), Some("paper.pdf"));
        assert_eq!(record.extra.len(), 2);

        let back: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(back["reviewer"], "kim");
        assert_eq!(back["score"], 4);
        assert!(back.get("lang").is_none());
    }

    #[test]
    fn test_merge_keeps_existing_filename() {
        let mut existing = ResultRecord {
            filename: Some("renamed.pdf".to_string()),
            ..Default::default()
        };
        existing.extra.insert("note".into(), Value::from("keep me"));

        existing.merge(ResultRecord {
            lang: Some("eng".into()),
            plaintext: Some("some text".into()),
            filename: Some("paper.pdf".into()),
            extra: Map::new(),
        });

        assert!(existing.is_complete());
        assert_eq!(existing.filename.as_deref(), Some("renamed.pdf"));
        assert_eq!(existing.lang.as_deref(), Some("eng"));
        assert_eq!(existing.extra["note"], "keep me");
    }

    #[test]
    fn test_status_message_shape() {
        let broken = StatusMessage::Broken {
            filename: "a.pdf".into(),
            error: "boom".into(),
        };
        let json = serde_json::to_value(&broken).unwrap();
        assert_eq!(json["status"], "broken");
        assert_eq!(json["filename"], "a.pdf");
        assert_eq!(json["error"], "boom");
        assert_eq!(broken.filename(), "a.pdf");
        assert!(!broken.is_complete());
    }
}
