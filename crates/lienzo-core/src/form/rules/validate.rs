//! Whole-record post-processing.

use tracing::debug;

use crate::models::record::{Field, Record};

use super::dates::format_date;
use super::sanitize::digits_only;

/// Default number of digits kept in a phone number.
pub const DEFAULT_PHONE_DIGITS: usize = 8;

/// Finalizes a scanned record: phone, price and dates.
///
/// Size and frame model are normalized while scanning and left alone here.
#[derive(Debug, Clone, Copy)]
pub struct RecordValidator {
    phone_digits: usize,
}

impl RecordValidator {
    pub fn new() -> Self {
        Self {
            phone_digits: DEFAULT_PHONE_DIGITS,
        }
    }

    /// Set how many phone digits to keep.
    pub fn with_phone_digits(mut self, digits: usize) -> Self {
        self.phone_digits = digits;
        self
    }

    pub fn validate(&self, mut record: Record) -> Record {
        let phone = validate_phone(record.get(Field::Phone), self.phone_digits);
        record.set(Field::Phone, phone);

        let price = validate_price(record.get(Field::Price));
        record.set(Field::Price, price);

        for field in [Field::RequestDate, Field::DeliveryDate] {
            let date = format_date(record.get(field));
            record.set(field, date);
        }

        debug!(
            "Validated record with {} of {} fields filled",
            record.filled_count(),
            Field::COUNT
        );

        record
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Digits of a phone number, truncated to `max_digits`. Shorter numbers are
/// not padded.
pub fn validate_phone(raw: &str, max_digits: usize) -> String {
    let mut digits = digits_only(raw);
    digits.truncate(max_digits);
    digits
}

/// Digits of a price, without length limit.
pub fn validate_price(raw: &str) -> String {
    digits_only(raw)
}
