//! Rule-based field extraction and normalization for order forms.

pub mod dates;
pub mod frame;
pub mod keywords;
pub mod patterns;
pub mod sanitize;
pub mod size;
pub mod tokenizer;
pub mod validate;

pub use dates::format_date;
pub use frame::{FrameModelNormalizer, normalize_frame_model};
pub use keywords::{KeyValueLineParser, LineMatch};
pub use sanitize::{digits_only, sanitize};
pub use size::{SizeNormalizer, normalize_size, parse_size_token};
pub use tokenizer::{lines, tokenize};
pub use validate::{RecordValidator, validate_phone, validate_price};

/// Trait for normalizers of constrained fields.
///
/// Normalization never fails: a value that cannot be mapped to a canonical
/// entry becomes `""`.
pub trait FieldNormalizer {
    /// Map a sanitized raw value to its canonical form.
    fn normalize(&self, raw: &str) -> String;
}
