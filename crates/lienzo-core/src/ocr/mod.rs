//! OCR collaborator: turns a scanned form image into recognized text.
//!
//! Recognition itself is delegated to an external engine; this module only
//! defines the result types, the provider trait and reading-order assembly.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::{PureOcrEngine, create_engine};

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Boxes whose top edges fall in the same band of this many pixels are
/// treated as one text row.
const ROW_HEIGHT: f32 = 20.0;

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Detected and recognized text boxes.
    pub boxes: Vec<TextBox>,

    /// Full text (boxes joined with newlines, in reading order).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Create an empty result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            boxes: Vec::new(),
            text: String::new(),
            processing_time_ms: 0,
            image_size: (width, height),
        }
    }

    /// Wrap text that was recognized elsewhere.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::empty(0, 0)
        }
    }

    /// Build a result from unordered boxes, sorting them into reading order.
    pub fn from_boxes(boxes: Vec<TextBox>, image_size: (u32, u32), processing_time_ms: u64) -> Self {
        let mut result = Self {
            boxes,
            text: String::new(),
            processing_time_ms,
            image_size,
        };
        result.sort_by_reading_order();
        result
    }

    /// Sort boxes by reading order (top-to-bottom, left-to-right).
    pub fn sort_by_reading_order(&mut self) {
        self.boxes.sort_by(|a, b| {
            let (ax, ay, _, _) = a.rect();
            let (bx, by, _, _) = b.rect();

            let row_a = (ay / ROW_HEIGHT) as i32;
            let row_b = (by / ROW_HEIGHT) as i32;

            row_a
                .cmp(&row_b)
                .then_with(|| ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal))
        });

        // Rebuild full text
        self.text = self
            .boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
}

/// An OCR engine able to recognize the text of a form image.
pub trait OcrProvider {
    /// Recognize all text boxes in `image`.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;

    /// Convenience: recognized text only.
    fn recognize_text(&self, image: &DynamicImage) -> Result<String, OcrError> {
        Ok(self.recognize(image)?.text)
    }
}
