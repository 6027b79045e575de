//! Keyword detection on a single form line.

use crate::models::record::Field;

/// Lines carrying this keyword never provide the requester.
///
/// Forms print "SOLICITANTE" and "FALLECIDO" on combined label lines.
const DECEASED_KEYWORD: &str = "FALLECIDO";

/// A field keyword found on a line, with the text following it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    /// Field announced by the keyword.
    pub field: Field,
    /// Keyword spelling that matched.
    pub keyword: &'static str,
    /// Text after the keyword and its colon, not yet sanitized.
    pub raw: &'a str,
}

/// Finds field keywords in uppercased lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueLineParser;

impl KeyValueLineParser {
    pub fn new() -> Self {
        Self
    }

    /// All fields announced on `line`, in record order.
    ///
    /// `line` must already be uppercased.
    pub fn matches<'a>(&self, line: &'a str) -> Vec<LineMatch<'a>> {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.match_field(field, line))
            .collect()
    }

    /// Match a single field on `line`.
    pub fn match_field<'a>(&self, field: Field, line: &'a str) -> Option<LineMatch<'a>> {
        if field == Field::Requester && line.contains(DECEASED_KEYWORD) {
            return None;
        }

        field.keywords().iter().find_map(|&keyword| {
            line.find(keyword).map(|start| LineMatch {
                field,
                keyword,
                raw: trailing_value(&line[start + keyword.len()..]),
            })
        })
    }
}

/// Skip the separator between a label and its value.
fn trailing_value(after: &str) -> &str {
    let after = after.trim_start();
    after.strip_prefix(':').unwrap_or(after)
}
