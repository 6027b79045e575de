//! CSV export of extracted records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::ExportError;
use crate::models::config::ExportConfig;
use crate::models::record::{Field, Record};

/// UTF-8 byte-order mark.
pub const BYTE_ORDER_MARK: &str = "\u{feff}";

/// Writes records as delimited text with a header row.
///
/// Values containing the delimiter, a quote or a line break are quoted and
/// embedded quotes are doubled.
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    delimiter: u8,
    byte_order_mark: bool,
}

impl CsvExporter {
    /// Comma-delimited, with byte-order mark.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            byte_order_mark: true,
        }
    }

    /// Create an exporter from the export section of the configuration.
    pub fn from_config(config: &ExportConfig) -> Result<Self, ExportError> {
        if !config.delimiter.is_ascii() || matches!(config.delimiter, '"' | '\n' | '\r') {
            return Err(ExportError::InvalidDelimiter(config.delimiter));
        }
        Ok(Self {
            delimiter: config.delimiter as u8,
            byte_order_mark: config.byte_order_mark,
        })
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_byte_order_mark(mut self, enabled: bool) -> Self {
        self.byte_order_mark = enabled;
        self
    }

    /// Write `records` to `writer`.
    pub fn write<W: Write>(&self, mut writer: W, records: &[Record]) -> Result<(), ExportError> {
        if records.is_empty() {
            return Err(ExportError::NoRecords);
        }

        if self.byte_order_mark {
            writer.write_all(BYTE_ORDER_MARK.as_bytes())?;
        }

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(csv::QuoteStyle::Necessary)
            .double_quote(true)
            .from_writer(writer);

        wtr.write_record(Field::ALL.iter().map(|f| f.name()))?;
        for record in records {
            wtr.write_record(record.iter().map(|(_, value)| value))?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Render `records` to a string.
    pub fn to_csv_string(&self, records: &[Record]) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, records)?;
        String::from_utf8(buffer).map_err(|e| ExportError::Encoding(e.to_string()))
    }

    /// Write `records` to a file at `path`, replacing it.
    pub fn write_file(&self, path: &Path, records: &[Record]) -> Result<(), ExportError> {
        if records.is_empty() {
            return Err(ExportError::NoRecords);
        }
        let file = File::create(path)?;
        self.write(BufWriter::new(file), records)?;
        info!("Exported {} records to {}", records.len(), path.display());
        Ok(())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}
