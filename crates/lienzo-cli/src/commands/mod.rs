//! Subcommands and the input handling they share.

pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::Path;

use tracing::debug;

use lienzo_core::models::config::{LienzoConfig, OcrConfig};
use lienzo_core::ocr::{OcrProvider, PureOcrEngine, create_engine};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "tif", "bmp", "webp"];
const TEXT_EXTENSIONS: &[&str] = &["txt"];

/// How an input file is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Already recognized text.
    Text,
    /// Scanned form, needs OCR.
    Image,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            Some(InputKind::Image)
        } else if TEXT_EXTENSIONS.contains(&extension.as_str()) {
            Some(InputKind::Text)
        } else {
            None
        }
    }
}

/// Load the configuration from `config_path`, or from the default location
/// when it exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LienzoConfig> {
    if let Some(path) = config_path {
        return Ok(LienzoConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(LienzoConfig::from_file(&default_path)?)
    } else {
        Ok(LienzoConfig::default())
    }
}

/// Reads the text of input files, loading the OCR engine on first use.
pub struct TextSource {
    ocr: OcrConfig,
    engine: Option<PureOcrEngine>,
}

impl TextSource {
    pub fn new(ocr: &OcrConfig) -> Self {
        Self {
            ocr: ocr.clone(),
            engine: None,
        }
    }

    /// Recognized text of `path`.
    pub fn read(&mut self, path: &Path, kind: InputKind) -> anyhow::Result<String> {
        match kind {
            InputKind::Text => Ok(fs::read_to_string(path)?),
            InputKind::Image => {
                let image = image::open(path)?;
                let result = self.engine()?.recognize(&image)?;

                debug!(
                    "OCR detected {} text boxes in {}ms",
                    result.boxes.len(),
                    result.processing_time_ms
                );

                if result.text.trim().is_empty() {
                    anyhow::bail!("No text detected in image");
                }
                Ok(result.text)
            }
        }
    }

    fn engine(&mut self) -> anyhow::Result<&PureOcrEngine> {
        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => {
                debug!("Loading OCR models from {}", self.ocr.model_dir.display());
                create_engine(&self.ocr).map_err(|e| {
                    anyhow::anyhow!(
                        "Failed to load OCR models: {}\n\n\
                         Place {}, {} and {} in the model directory or pass --model-dir.",
                        e,
                        self.ocr.detection_model,
                        self.ocr.recognition_model,
                        self.ocr.dictionary
                    )
                })?
            }
        };
        Ok(&*self.engine.insert(engine))
    }
}
