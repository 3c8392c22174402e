//! PDF processing module.
//!
//! The parser core never touches PDF bytes itself; this module is the
//! document-extraction collaborator that turns an uploaded card PDF into a
//! text layer plus the embedded photos/signature images.

mod extractor;

pub use extractor::{ExtractedImage, PdfContent, PdfExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text layer of the entire PDF, page by page.
    fn extract_text(&self) -> Result<String>;

    /// Extract embedded images from a page, re-encoded as PNG.
    fn extract_images(&self, page: u32) -> Result<Vec<ExtractedImage>>;

    /// Extract text and all images in one pass.
    fn extract_all(&self) -> Result<PdfContent>;
}
