//! PDF Page Extraction
//!
//! Per-page text extraction with `lopdf`. Every page yields exactly one
//! string, in page order; pages without extractable text yield `""` so page
//! numbers and segment identifiers stay aligned.

use std::path::Path;

use lopdf::Document;
use tracing::warn;

use crate::error::SourceError;

/// Extract the text of every page of the PDF at `path`
pub fn read_pdf_pages(path: &Path) -> Result<Vec<String>, SourceError> {
    let doc = Document::load(path).map_err(|e| SourceError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(pages_of(&doc, path))
}

/// Text per page of a loaded document
fn pages_of(doc: &Document, path: &Path) -> Vec<String> {
    // 1-based page numbers; BTreeMap keys come back sorted
    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

    page_numbers
        .into_iter()
        .map(|page_num| match doc.extract_text(&[page_num]) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(
                    "No text extracted from page {} of {}: {}",
                    page_num,
                    path.display(),
                    e
                );
                String::new()
            }
        })
        .collect()
}
