//! Common regex patterns for form field cleanup.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Anything that is not a letter, digit, whitespace or one of * - : . /
    pub static ref DISALLOWED_CHARS: Regex = Regex::new(
        r"[^\p{Alphabetic}\p{N}\s*\-:./]"
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    pub static ref NON_DIGITS: Regex = Regex::new(r"[^0-9]").unwrap();

    // Size tokens
    pub static ref NON_SIZE_CHARS: Regex = Regex::new(r"[^0-9*]").unwrap();

    pub static ref SIZE_TOKEN: Regex = Regex::new(r"^([0-9]+)\*([0-9]+)$").unwrap();

    // Frame model codes are compared without spacing or hyphens
    pub static ref FRAME_SEPARATORS: Regex = Regex::new(r"[\s\-]+").unwrap();
}
