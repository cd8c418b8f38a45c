//! Paged Document
//!
//! A PDF read page by page, or plain text split into pages on form feed,
//! the separator `pdftotext` and most print-oriented exports put between
//! pages.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SourceError;

use super::pdf::read_pdf_pages;
use super::SegmentSource;

/// Page separator
pub const PAGE_SEPARATOR: char = '\x0c';

/// Formats `PageFile::open` understands, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Pdf,
    Text,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(Format::Pdf)
        } else if ext.eq_ignore_ascii_case("txt") {
            Some(Format::Text)
        } else {
            None
        }
    }
}

/// A document loaded into memory as pages
#[derive(Debug, Clone)]
pub struct PageFile {
    path: PathBuf,
    pages: Vec<String>,
}

impl PageFile {
    /// Open a `.pdf` (one page per PDF page) or `.txt` (form-feed pages) file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(SourceError::NotFound(path));
        }
        let pages = match Format::of(&path) {
            Some(Format::Pdf) => read_pdf_pages(&path)?,
            Some(Format::Text) => {
                let content = fs::read_to_string(&path).map_err(|source| SourceError::Io {
                    path: path.clone(),
                    source,
                })?;
                split_pages(&content)
            }
            None => return Err(SourceError::UnsupportedExtension(path)),
        };

        info!("Loaded {} ({} pages)", path.display(), pages.len());

        Ok(Self { path, pages })
    }

    /// Build from already extracted text
    pub fn from_text(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            pages: split_pages(content),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }

    /// Text of one page (zero-based)
    pub fn page(&self, page: usize) -> Result<&str, SourceError> {
        self.pages
            .get(page)
            .map(String::as_str)
            .ok_or(SourceError::PageOutOfRange {
                page,
                num_pages: self.pages.len(),
            })
    }

    /// All pages in order
    pub fn pages(&self) -> &[String] {
        &self.pages
    }
}

impl SegmentSource for PageFile {
    type Error = SourceError;

    fn segments(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.pages.clone())
    }
}

/// Empty input has no pages; a trailing separator does not start a new one
fn split_pages(content: &str) -> Vec<String> {
    if content.is_empty() {
        return Vec::new();
    }
    let content = content.strip_suffix(PAGE_SEPARATOR).unwrap_or(content);
    content.split(PAGE_SEPARATOR).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::super::pdf::testing::write_pdf;
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_open_splits_pages() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "book.txt", "Page 1 content\x0cPage 2 content\x0c");

        let file = PageFile::open(&path).unwrap();
        assert_eq!(file.path(), path.as_path());
        assert_eq!(file.num_pages(), 2);
        assert_eq!(file.page(0).unwrap(), "Page 1 content");
        assert_eq!(file.page(1).unwrap(), "Page 2 content");
        assert_eq!(
            file.segments().unwrap(),
            vec!["Page 1 content", "Page 2 content"]
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = PageFile::open(dir.path().join("nonexistent.txt")).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_wrong_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "book.docx", "binary");
        assert!(matches!(
            PageFile::open(&path),
            Err(SourceError::UnsupportedExtension(_))
        ));

        let bare = write_file(&dir, "README", "no extension");
        assert!(matches!(
            PageFile::open(&bare),
            Err(SourceError::UnsupportedExtension(_))
        ));

        let upper = write_file(&dir, "NOTES.TXT", "fine");
        assert_eq!(PageFile::open(&upper).unwrap().num_pages(), 1);
    }

    #[test]
    fn test_open_pdf_one_segment_per_page() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");
        write_pdf(&path, &[Some("Introduction"), None, Some("Conclusion")]);

        let file = PageFile::open(&path).unwrap();
        assert_eq!(file.num_pages(), 3);
        assert!(file.page(0).unwrap().contains("Introduction"));
        assert_eq!(file.page(1).unwrap(), "");
        assert!(file.page(2).unwrap().contains("Conclusion"));
        assert_eq!(file.segments().unwrap().len(), 3);

        assert!(matches!(
            file.page(3),
            Err(SourceError::PageOutOfRange {
                page: 3,
                num_pages: 3
            })
        ));
    }

    #[test]
    fn test_open_pdf_extension_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("SCAN.PDF");
        write_pdf(&path, &[Some("Only page")]);

        assert_eq!(PageFile::open(&path).unwrap().num_pages(), 1);
    }

    #[test]
    fn test_open_corrupt_pdf() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "broken.pdf", "not really a pdf");
        assert!(matches!(PageFile::open(&path), Err(SourceError::Pdf { .. })));

        let err = PageFile::open(dir.path().join("absent.pdf")).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_page_out_of_range() {
        let file = PageFile::from_text("mem.txt", "a\x0cb");
        let err = file.page(2).unwrap_err();
        assert!(matches!(
            err,
            SourceError::PageOutOfRange {
                page: 2,
                num_pages: 2
            }
        ));
    }

    #[test]
    fn test_blank_pages_are_kept() {
        let file = PageFile::from_text("mem.txt", "intro\x0c\x0cend");
        assert_eq!(file.pages(), &["intro", "", "end"]);
    }

    #[test]
    fn test_single_page_and_empty_file() {
        assert_eq!(PageFile::from_text("a.txt", "no breaks here").num_pages(), 1);
        assert_eq!(PageFile::from_text("b.txt", "").num_pages(), 0);
        assert!(PageFile::from_text("b.txt", "").segments().unwrap().is_empty());
    }
}
