//! Rule-based form parser: folds lines into a record, then validates it.

use tracing::{debug, info};

use crate::models::catalog::Catalog;
use crate::models::config::LienzoConfig;
use crate::models::record::{Field, Record};
use crate::ocr::OcrResult;

use super::RecordExtractor;
use super::rules::{
    FieldNormalizer, FrameModelNormalizer, KeyValueLineParser, RecordValidator, SizeNormalizer,
    lines, sanitize, tokenize,
};

/// Result of form extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted, validated record.
    pub record: Record,
    /// Raw recognized text.
    pub raw_text: String,
    /// Non-empty lines scanned.
    pub lines_scanned: usize,
    /// One entry per field left empty.
    pub warnings: Vec<String>,
}

/// Trait for form parsing.
pub trait FormParser {
    /// Parse a form from recognized text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Keyword-per-line form parser.
///
/// Holds no per-call state; one instance can serve any number of forms.
#[derive(Debug, Clone, Default)]
pub struct RuleFormParser {
    catalog: Catalog,
    line_parser: KeyValueLineParser,
    validator: RecordValidator,
}

impl RuleFormParser {
    /// Create a parser with the default catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from the extraction and catalog sections of a config.
    pub fn from_config(config: &LienzoConfig) -> Self {
        Self::new()
            .with_catalog(config.catalog.clone())
            .with_phone_digits(config.extraction.phone_digits)
    }

    /// Set the catalog of valid sizes and frame models.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set how many phone digits to keep.
    pub fn with_phone_digits(mut self, digits: usize) -> Self {
        self.validator = self.validator.with_phone_digits(digits);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Apply one line to the record under construction.
    ///
    /// Every field announced on the line is overwritten, so across a fold
    /// the last matching line wins.
    pub fn scan_line(&self, mut record: Record, line: &str) -> Record {
        let line = line.to_uppercase();
        for matched in self.line_parser.matches(&line) {
            let value = self.normalize_field(matched.field, sanitize(matched.raw, matched.keyword));
            debug!("Matched {} via {:?}: {:?}", matched.field, matched.keyword, value);
            record.set(matched.field, value);
        }
        record
    }

    /// Fold all lines of `text` into a record, without final validation.
    pub fn scan(&self, text: &str) -> Record {
        tokenize(text)
            .into_iter()
            .fold(Record::new(), |record, line| self.scan_line(record, line))
    }

    /// Scan and validate `text`.
    pub fn extract_record(&self, text: &str) -> Record {
        self.validator.validate(self.scan(text))
    }

    fn normalize_field(&self, field: Field, value: String) -> String {
        match field {
            Field::Size => SizeNormalizer::new(&self.catalog.sizes).normalize(&value),
            Field::FrameModel => FrameModelNormalizer::new(&self.catalog).normalize(&value),
            _ => value,
        }
    }
}

impl FormParser for RuleFormParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        info!("Parsing form from {} characters of text", text.len());

        let lines_scanned = lines(text).count();
        let record = self.extract_record(text);

        let warnings: Vec<String> = record
            .missing_fields()
            .into_iter()
            .map(|field| format!("Could not extract {}", field.label()))
            .collect();

        debug!(
            "Extracted {} of {} fields from {} lines",
            record.filled_count(),
            Field::COUNT,
            lines_scanned
        );

        ExtractionResult {
            record,
            raw_text: text.to_string(),
            lines_scanned,
            warnings,
        }
    }
}

impl RecordExtractor for RuleFormParser {
    fn extract(&self, ocr_result: &OcrResult) -> Record {
        debug!(
            "Extracting record from {} OCR text boxes",
            ocr_result.boxes.len()
        );
        self.extract_record(&ocr_result.text)
    }

    fn extract_from_text(&self, text: &str) -> Record {
        self.extract_record(text)
    }
}
