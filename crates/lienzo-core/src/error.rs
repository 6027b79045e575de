//! Error types for the lienzo-core library.
//!
//! Field extraction itself never fails; these types cover the collaborators
//! around it (OCR, export, configuration).

use thiserror::Error;

/// Main error type for the lienzo library.
#[derive(Error, Debug)]
pub enum LienzoError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Record export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to record export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing to export.
    #[error("no records to export")]
    NoRecords,

    /// The configured delimiter is not a single byte, or would break quoting.
    #[error("delimiter must be a single ASCII character other than a quote or line break, got {0:?}")]
    InvalidDelimiter(char),

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be decoded as UTF-8.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Errors related to catalog entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A size code is not of the form `WIDTH*HEIGHT`.
    #[error("invalid size code: {0:?}")]
    InvalidSizeCode(String),
}

/// Result type for the lienzo library.
pub type Result<T> = std::result::Result<T, LienzoError>;
