// src/pipeline/extraction/mod.rs

mod content_start;

pub use content_start::{locate_content_start, page_starts_content, CONTENT_MARKERS};

use crate::error::{PipelineError, Result};
use itertools::Itertools;
use std::path::Path;
use tracing::debug;

/// Which pages to pull text from. Page numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSpan {
    Single(usize),
    ToEnd(usize),
}

impl PageSpan {
    /// Picks the requested pages out of a document's per-page text. Pages past
    /// the end of the document yield empty text.
    pub fn select(&self, pages: &[String]) -> String {
        match *self {
            PageSpan::Single(page) => pages
                .get(page.saturating_sub(1))
                .cloned()
                .unwrap_or_default(),
            PageSpan::ToEnd(page) => pages.iter().skip(page.saturating_sub(1)).join("\n"),
        }
    }
}

/// Source of raw text for a PDF on disk.
pub trait PdfExtractor: Send + Sync {
    fn extract_text(&self, path: &Path, span: PageSpan) -> Result<String>;
}

/// `PdfExtractor` backed by the `pdf-extract` crate.
///
/// Every call parses the whole file again, so the start page scan costs up to
/// `max_pages` extra parses per document.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractBackend;

impl PdfExtractBackend {
    pub fn new() -> Self {
        PdfExtractBackend
    }

    fn load_pages(path: &Path) -> Result<Vec<String>> {
        let bytes = std::fs::read(path)?;
        pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
            PipelineError::ExtractionError(format!(
                "Failed to extract text from '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

impl PdfExtractor for PdfExtractBackend {
    fn extract_text(&self, path: &Path, span: PageSpan) -> Result<String> {
        let pages = Self::load_pages(path)?;
        debug!(path = %path.display(), pages = pages.len(), ?span, "Extracted PDF pages");
        Ok(span.select(&pages))
    }
}
