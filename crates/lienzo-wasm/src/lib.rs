//! WASM bindings for canvas order form field extraction.
//!
//! OCR runs in the browser; these bindings take the recognized text (or
//! boxes) and return structured records, plus the CSV export used for
//! downloads.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use lienzo_core::export::CsvExporter;
use lienzo_core::form::rules::{
    format_date as format_date_digits, normalize_frame_model as normalize_frame,
    normalize_size as normalize_size_code,
};
use lienzo_core::form::{FormParser, RuleFormParser};
use lienzo_core::models::catalog::Catalog;
use lienzo_core::models::record::Record;
use lienzo_core::ocr::{OcrResult, TextBox};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Records serialize as maps; plain objects are what JS callers expect.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract a record from recognized form text, using the default catalog.
#[wasm_bindgen]
pub fn extract_record_from_text(text: &str) -> Result<JsValue, JsValue> {
    let result = RuleFormParser::new().parse(text);
    to_js(&result.record)
}

/// Snap a raw size such as "20x27" to the closest default catalog size.
///
/// Returns an empty string when no size can be read.
#[wasm_bindgen]
pub fn normalize_size(raw: &str) -> String {
    normalize_size_code(raw, &Catalog::default().sizes)
}

/// Map a raw frame model such as "a-1" to a default catalog code.
#[wasm_bindgen]
pub fn normalize_frame_model(raw: &str) -> String {
    normalize_frame(raw, &Catalog::default())
}

/// Format the digits of a raw date as DD-MM-YY or DD-MM-YYYY.
#[wasm_bindgen]
pub fn format_date(raw: &str) -> String {
    format_date_digits(raw)
}

/// Render records (plain objects keyed by field name) as CSV text.
#[wasm_bindgen]
pub fn records_to_csv(records: js_sys::Array, byte_order_mark: bool) -> Result<String, JsValue> {
    let records = records
        .iter()
        .map(serde_wasm_bindgen::from_value::<Record>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    CsvExporter::new()
        .with_byte_order_mark(byte_order_mark)
        .to_csv_string(&records)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Form extractor class for browser use.
#[wasm_bindgen]
pub struct FormExtractor {
    parser: RuleFormParser,
}

#[wasm_bindgen]
impl FormExtractor {
    /// Create an extractor with the default catalog.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: RuleFormParser::new(),
        }
    }

    /// Create an extractor with a catalog given as JSON.
    ///
    /// Missing sections fall back to the default catalog.
    #[wasm_bindgen]
    pub fn with_catalog_json(json: &str) -> Result<FormExtractor, JsValue> {
        let catalog: Catalog =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            parser: RuleFormParser::new().with_catalog(catalog),
        })
    }

    /// Set how many phone digits to keep.
    #[wasm_bindgen]
    pub fn set_phone_digits(&mut self, digits: usize) {
        self.parser = self.parser.clone().with_phone_digits(digits);
    }

    /// Extract a record from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text).record)
    }

    /// Get extraction result with metadata.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);

        #[derive(Serialize)]
        struct ExtractResult {
            record: Record,
            raw_text: String,
            lines_scanned: usize,
            warnings: Vec<String>,
        }

        to_js(&ExtractResult {
            record: result.record,
            raw_text: result.raw_text,
            lines_scanned: result.lines_scanned,
            warnings: result.warnings,
        })
    }
}

impl Default for FormExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// OCR result from browser-side processing.
#[wasm_bindgen]
pub struct OcrResultJs {
    boxes: Vec<TextBox>,
    text: String,
}

#[wasm_bindgen]
impl OcrResultJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            boxes: Vec::new(),
            text: String::new(),
        }
    }

    /// Add a text box to the result.
    #[allow(clippy::too_many_arguments)]
    #[wasm_bindgen]
    pub fn add_box(
        &mut self,
        text: &str,
        x1: f32, y1: f32,
        x2: f32, y2: f32,
        x3: f32, y3: f32,
        x4: f32, y4: f32,
        confidence: f32,
    ) {
        self.boxes.push(TextBox {
            bbox: [x1, y1, x2, y2, x3, y3, x4, y4],
            text: text.to_string(),
            confidence,
        });
    }

    /// Set the full text.
    #[wasm_bindgen]
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the full text; boxes are joined in reading order when no text
    /// was set.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        if self.text.is_empty() {
            OcrResult::from_boxes(self.boxes.clone(), (0, 0), 0).text
        } else {
            self.text.clone()
        }
    }

    /// Extract a record from this OCR result.
    #[wasm_bindgen]
    pub fn extract_record(&self) -> Result<JsValue, JsValue> {
        extract_record_from_text(&self.get_text())
    }
}

impl Default for OcrResultJs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lienzo_core::models::record::Field;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_normalize_size() {
        assert_eq!(normalize_size("20x27"), "20*26");
        assert_eq!(normalize_size("sin medida"), "");
    }

    #[wasm_bindgen_test]
    fn test_normalize_frame_model() {
        assert_eq!(normalize_frame_model("a-1"), "A1");
        assert_eq!(normalize_frame_model("Z9"), "");
    }

    #[wasm_bindgen_test]
    fn test_format_date() {
        assert_eq!(format_date("01/02/2024"), "01-02-2024");
        assert_eq!(format_date("5/2/24"), "5224");
    }

    #[wasm_bindgen_test]
    fn test_ocr_boxes_in_reading_order() {
        let mut ocr = OcrResultJs::new();
        ocr.add_box("MODELO DE MARCO: B1", 10.0, 60.0, 200.0, 60.0, 200.0, 72.0, 10.0, 72.0, 0.9);
        ocr.add_box("CTTO: 1234", 10.0, 10.0, 200.0, 10.0, 200.0, 22.0, 10.0, 22.0, 0.9);

        assert_eq!(ocr.get_text(), "CTTO: 1234\nMODELO DE MARCO: B1");
    }

    #[wasm_bindgen_test]
    fn test_extractor_with_catalog_json() {
        let extractor = FormExtractor::with_catalog_json(r#"{"frame_models": ["ORO"]}"#).unwrap();
        let value = extractor.extract("MODELO DE MARCO: oro\nTAMAÑO: 20x27").unwrap();
        let record: Record = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(record.get(Field::FrameModel), "ORO");
        // Sizes were not overridden and keep the default catalog
        assert_eq!(record.get(Field::Size), "20*26");

        let value = extractor.extract("MODELO DE MARCO: A1").unwrap();
        let record: Record = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(record.get(Field::FrameModel), "");

        assert!(FormExtractor::with_catalog_json("not json").is_err());
    }
}
