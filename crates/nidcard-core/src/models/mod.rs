//! Data models: configuration and extraction output.

pub mod config;
pub mod record;

pub use config::{ExtractionConfig, NidcardConfig, PdfConfig, UploadConfig};
pub use record::{CardData, ColonFields, FieldRecord};
