//! Order form field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, FormParser, RuleFormParser};

use crate::models::record::Record;
use crate::ocr::OcrResult;

/// Trait for record extractors.
///
/// Extraction is best-effort and infallible: fields that cannot be read
/// are left empty instead of failing the whole record.
pub trait RecordExtractor {
    /// Extract a record from an OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> Record;

    /// Extract a record from plain text.
    fn extract_from_text(&self, text: &str) -> Record;
}
