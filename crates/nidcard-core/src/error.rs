//! Error types for the nidcard-core library.

use thiserror::Error;

/// Main error type for the nidcard library.
#[derive(Error, Debug)]
pub enum NidcardError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Card field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Image upload error.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to extract images from PDF.
    #[error("failed to extract images: {0}")]
    ImageExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to card field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A lookahead read past the end of the line sequence.
    #[error("lookahead past end of input: line {index} of {len}")]
    LookaheadOutOfBounds { index: usize, len: usize },

    /// The text layer produced no lines at all.
    #[error("no text lines in input")]
    NoLines,
}

/// Errors related to image hosting uploads.
#[derive(Error, Debug)]
pub enum UploadError {
    /// No API key configured for the hosting service.
    #[error("no API key configured for image hosting")]
    MissingApiKey,

    /// The HTTP request itself failed.
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The hosting service answered with a non-success status.
    #[error("hosting service returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The hosting service response did not contain a URL.
    #[error("no URL in hosting service response")]
    MissingUrl,
}

/// Result type for the nidcard library.
pub type Result<T> = std::result::Result<T, NidcardError>;
