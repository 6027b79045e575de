//! Frame model normalization.

use crate::models::catalog::Catalog;

use super::FieldNormalizer;
use super::patterns::FRAME_SEPARATORS;

/// Maps a raw frame model to a catalog code by exact, alias or substring
/// match. There is no distance fallback.
#[derive(Debug, Clone, Copy)]
pub struct FrameModelNormalizer<'a> {
    catalog: &'a Catalog,
}

impl<'a> FrameModelNormalizer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Apply the alias table to an already compacted code.
    fn resolve_alias(&self, compact: String) -> String {
        self.catalog
            .frame_aliases
            .iter()
            .find(|a| compact_code(&a.alias) == compact)
            .map(|a| a.canonical.clone())
            .unwrap_or(compact)
    }
}

impl FieldNormalizer for FrameModelNormalizer<'_> {
    fn normalize(&self, raw: &str) -> String {
        let compact = compact_code(raw);
        if compact.is_empty() {
            return String::new();
        }
        let code = self.resolve_alias(compact);

        let models = &self.catalog.frame_models;
        if let Some(exact) = models.iter().find(|m| **m == code) {
            return exact.clone();
        }

        // First declared code contained in the input wins
        models
            .iter()
            .find(|m| !m.is_empty() && code.contains(m.as_str()))
            .cloned()
            .unwrap_or_default()
    }
}

/// Uppercase and drop whitespace and hyphens.
fn compact_code(raw: &str) -> String {
    FRAME_SEPARATORS
        .replace_all(raw.trim(), "")
        .to_uppercase()
}

/// Normalize a raw frame model against `catalog`; `""` when rejected.
pub fn normalize_frame_model(raw: &str, catalog: &Catalog) -> String {
    FrameModelNormalizer::new(catalog).normalize(raw)
}
