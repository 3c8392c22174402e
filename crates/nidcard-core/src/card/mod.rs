//! Card field extraction module.

mod colon;
mod parser;
mod rowwise;
pub mod script;
pub mod vocabulary;

pub use colon::ColonExtractor;
pub use parser::{CardParser, Strategy};
pub use rowwise::RowWiseExtractor;
pub use script::contains_bengali;
pub use vocabulary::FieldVocabulary;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
