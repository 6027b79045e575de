//! Canvas size normalization.

use crate::models::catalog::SizeCode;

use super::FieldNormalizer;
use super::patterns::{NON_SIZE_CHARS, SIZE_TOKEN, WHITESPACE};

/// Snaps a raw size to the closest catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct SizeNormalizer<'a> {
    sizes: &'a [SizeCode],
}

impl<'a> SizeNormalizer<'a> {
    pub fn new(sizes: &'a [SizeCode]) -> Self {
        Self { sizes }
    }

    /// Catalog entry closest to `raw`, by sum of absolute component
    /// differences. Ties go to the entry declared first.
    pub fn nearest(&self, raw: &str) -> Option<SizeCode> {
        let (width, height) = parse_size_token(raw)?;
        self.sizes
            .iter()
            .copied()
            .min_by_key(|code| code.distance(width, height))
    }
}

impl FieldNormalizer for SizeNormalizer<'_> {
    fn normalize(&self, raw: &str) -> String {
        self.nearest(raw)
            .map(|code| code.to_string())
            .unwrap_or_default()
    }
}

/// Parse `WIDTH*HEIGHT` out of OCR text, accepting `x` as the separator.
pub fn parse_size_token(raw: &str) -> Option<(u64, u64)> {
    let compact = WHITESPACE.replace_all(raw, "");
    let starred = compact.replace(['x', 'X'], "*");
    let cleaned = NON_SIZE_CHARS.replace_all(&starred, "");

    let caps = SIZE_TOKEN.captures(&cleaned)?;
    let width = caps[1].parse().ok()?;
    let height = caps[2].parse().ok()?;
    Some((width, height))
}

/// Normalize a raw size against `sizes`; `""` when rejected.
pub fn normalize_size(raw: &str, sizes: &[SizeCode]) -> String {
    SizeNormalizer::new(sizes).normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::Catalog;
    use pretty_assertions::assert_eq;

    fn normalize(raw: &str) -> String {
        normalize_size(raw, &Catalog::default().sizes)
    }

    #[test]
    fn test_parse_size_token() {
        assert_eq!(parse_size_token("20x27"), Some((20, 27)));
        assert_eq!(parse_size_token(" 50 X 60 cm"), Some((50, 60)));
        assert_eq!(parse_size_token("30*42"), Some((30, 42)));
        assert_eq!(parse_size_token("50"), None);
        assert_eq!(parse_size_token("50**60"), None);
        assert_eq!(parse_size_token("50*60*70"), None);
        assert_eq!(parse_size_token(""), None);
    }

    #[test]
    fn test_snaps_to_nearest() {
        assert_eq!(normalize("20x27"), "20*26");
        assert_eq!(normalize("17*21"), "16*22");
        assert_eq!(normalize("49 x 79"), "50*80");
    }

    #[test]
    fn test_canonical_values_are_fixed_points() {
        for code in Catalog::default().sizes {
            let canonical = code.to_string();
            assert_eq!(normalize(&canonical), canonical);
        }
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        // 50*50 is 10 away from both 50*40 and 50*60
        assert_eq!(normalize("50*50"), "50*40");
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(normalize("GRANDE"), "");
        assert_eq!(normalize("50-60"), "");
        assert_eq!(normalize("99999999999999999999999*1"), "");
    }

    #[test]
    fn test_empty_catalog_rejects() {
        assert_eq!(normalize_size("50*60", &[]), "");
    }

    #[test]
    fn test_output_always_in_catalog() {
        let catalog = Catalog::default();
        for raw in ["1*1", "1000*1000", "0*0", "33 x 45", "abc", "16*22"] {
            let out = normalize(raw);
            assert!(out.is_empty() || catalog.contains_size(&out), "{raw} -> {out}");
        }
    }
}
