use std::path::Path;

use tracing::{debug, warn};

use super::{PageSpan, PdfExtractor};
use crate::config::ContentStartParams;
use crate::error::{PipelineError, Result};
use crate::utils::text::char_len;

/// Lowercase words that mark the beginning of a paper's body.
pub const CONTENT_MARKERS: &[&str] = &["abstract", "introduction"];

/// True when a page is long enough, or names one of the content markers, to be
/// taken as the first page of real content.
pub fn page_starts_content(text: &str, char_threshold: usize) -> bool {
    if char_len(text) > char_threshold {
        return true;
    }
    let lower = text.to_lowercase();
    CONTENT_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Guesses the page where the document's content begins, skipping cover pages
/// and tables of contents.
///
/// Pages `1..max_pages` are inspected in order. When none of them qualifies
/// `max_pages` is returned, so the result always lies in `[1, max_pages]`.
/// A missing file yields `DocumentNotFound` and nothing is extracted.
pub fn locate_content_start(
    extractor: &dyn PdfExtractor,
    path: &Path,
    params: &ContentStartParams,
) -> Result<usize> {
    if !path.exists() {
        warn!(path = %path.display(), "Source document does not exist");
        return Err(PipelineError::DocumentNotFound(path.to_path_buf()));
    }

    // Page `max_pages` is the fallback either way, so it is never extracted here.
    for page in 1..params.max_pages {
        let text = extractor.extract_text(path, PageSpan::Single(page))?;
        if page_starts_content(&text, params.page_char_threshold) {
            debug!(path = %path.display(), page, "Content starts");
            return Ok(page);
        }
    }

    debug!(
        path = %path.display(),
        page = params.max_pages,
        "No content marker found, falling back to page limit"
    );
    Ok(params.max_pages.max(1))
}
