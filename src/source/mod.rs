//! Segment Sources
//!
//! Producers of the ordered text segments fed into the index.

mod page_file;
mod pdf;

pub use page_file::{PageFile, PAGE_SEPARATOR};
pub use pdf::read_pdf_pages;

use std::convert::Infallible;

/// Something that yields an ordered sequence of text segments
pub trait SegmentSource {
    type Error;

    /// Every segment, in document order
    fn segments(&self) -> Result<Vec<String>, Self::Error>;
}

impl<S: AsRef<str>> SegmentSource for [S] {
    type Error = Infallible;

    fn segments(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.iter().map(|s| s.as_ref().to_string()).collect())
    }
}

impl<S: AsRef<str>> SegmentSource for Vec<S> {
    type Error = Infallible;

    fn segments(&self) -> Result<Vec<String>, Self::Error> {
        self.as_slice().segments()
    }
}
