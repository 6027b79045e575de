//! Core library for canvas order form OCR processing.
//!
//! This crate provides:
//! - Line-oriented field extraction from recognized form text
//! - Normalization of sizes and frame models against a configurable catalog
//! - Record validation (phone, price, dates)
//! - CSV export of extracted records
//! - A thin OCR adapter over `pure-onnx-ocr` (feature `native`)

pub mod error;
pub mod export;
pub mod form;
pub mod models;
pub mod ocr;

pub use error::{CatalogError, ExportError, LienzoError, OcrError, Result};
pub use export::CsvExporter;
pub use form::{ExtractionResult, FormParser, RecordExtractor, RuleFormParser};
pub use models::catalog::{Catalog, FrameAlias, SizeCode};
pub use models::config::LienzoConfig;
pub use models::record::{Field, Record};
pub use ocr::{OcrProvider, OcrResult, TextBox};
#[cfg(feature = "native")]
pub use ocr::{PureOcrEngine, create_engine};
