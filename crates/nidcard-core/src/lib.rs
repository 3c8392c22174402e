//! Core library for NID card processing.
//!
//! This crate provides:
//! - PDF processing (text-layer and embedded image extraction)
//! - Script-aware field extraction from the card text layer, with a
//!   row-wise primary strategy and a colon-delimited fallback
//! - Image hosting upload for the extracted card photos
//! - Configuration and output data models

pub mod card;
pub mod error;
pub mod models;
pub mod pdf;
pub mod upload;

pub use card::{
    CardParser, ColonExtractor, FieldVocabulary, RowWiseExtractor, Strategy, contains_bengali,
};
pub use error::{ExtractionError, NidcardError, PdfError, Result, UploadError};
pub use models::config::NidcardConfig;
pub use models::record::{CardData, ColonFields, FieldRecord};
pub use pdf::{ExtractedImage, PdfContent, PdfExtractor, PdfProcessor};
pub use upload::{ImageUploader, ImgbbUploader, upload_all};
