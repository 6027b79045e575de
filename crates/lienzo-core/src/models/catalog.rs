//! Valid-value catalogs used as normalization targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A canonical canvas size, written `WIDTH*HEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SizeCode {
    pub width: u32,
    pub height: u32,
}

impl SizeCode {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Sum of absolute differences between the components.
    pub fn distance(&self, width: u64, height: u64) -> u64 {
        u64::from(self.width)
            .abs_diff(width)
            .saturating_add(u64::from(self.height).abs_diff(height))
    }
}

impl fmt::Display for SizeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.width, self.height)
    }
}

impl FromStr for SizeCode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidSizeCode(s.to_string());
        let (width, height) = s.trim().split_once('*').ok_or_else(invalid)?;
        Ok(Self {
            width: width.trim().parse().map_err(|_| invalid())?,
            height: height.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for SizeCode {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SizeCode> for String {
    fn from(code: SizeCode) -> Self {
        code.to_string()
    }
}

/// A known misspelling of a frame model code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameAlias {
    pub alias: String,
    pub canonical: String,
}

impl FrameAlias {
    pub fn new(alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            canonical: canonical.into(),
        }
    }
}

/// Finite sets of canonical values for the constrained fields.
///
/// Order matters: size ties and frame model substring matches resolve to
/// the entry declared first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Valid canvas sizes.
    pub sizes: Vec<SizeCode>,

    /// Valid frame model codes (uppercase).
    pub frame_models: Vec<String>,

    /// Alias corrections applied before frame model lookup.
    pub frame_aliases: Vec<FrameAlias>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            sizes: vec![
                SizeCode::new(16, 22),
                SizeCode::new(20, 26),
                SizeCode::new(30, 42),
                SizeCode::new(50, 40),
                SizeCode::new(50, 60),
                SizeCode::new(50, 80),
            ],
            frame_models: ["A1", "A2", "B1", "B2", "C1", "C2", "0", "3", "4"]
                .into_iter()
                .map(String::from)
                .collect(),
            frame_aliases: default_frame_aliases(),
        }
    }
}

/// `A1`, `A-1` and `A 1` style spellings for letters A-C and digits 1-2.
fn default_frame_aliases() -> Vec<FrameAlias> {
    let mut aliases = Vec::new();
    for letter in ['A', 'B', 'C'] {
        for digit in ['1', '2'] {
            let canonical = format!("{letter}{digit}");
            for separator in ["", "-", " "] {
                aliases.push(FrameAlias::new(
                    format!("{letter}{separator}{digit}"),
                    canonical.clone(),
                ));
            }
        }
    }
    aliases
}

impl Catalog {
    /// Replace the valid sizes.
    pub fn with_sizes(mut self, sizes: Vec<SizeCode>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Replace the valid frame models.
    pub fn with_frame_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frame_models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the frame model aliases.
    pub fn with_frame_aliases(mut self, aliases: Vec<FrameAlias>) -> Self {
        self.frame_aliases = aliases;
        self
    }

    pub fn contains_size(&self, value: &str) -> bool {
        value
            .parse::<SizeCode>()
            .map(|code| self.sizes.contains(&code) && code.to_string() == value)
            .unwrap_or(false)
    }

    pub fn contains_frame_model(&self, value: &str) -> bool {
        self.frame_models.iter().any(|m| m == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_size_code_parse_and_display() {
        let code: SizeCode = "50*60".parse().unwrap();
        assert_eq!(code, SizeCode::new(50, 60));
        assert_eq!(code.to_string(), "50*60");
        assert_eq!(" 16 * 22 ".parse::<SizeCode>().unwrap(), SizeCode::new(16, 22));
    }

    #[test]
    fn test_size_code_parse_invalid() {
        assert!("50x60".parse::<SizeCode>().is_err());
        assert!("50*".parse::<SizeCode>().is_err());
        assert!("*60".parse::<SizeCode>().is_err());
    }

    #[test]
    fn test_size_code_distance() {
        let code = SizeCode::new(20, 26);
        assert_eq!(code.distance(20, 27), 1);
        assert_eq!(code.distance(16, 22), 8);
        assert_eq!(code.distance(u64::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.sizes.len(), 6);
        assert!(catalog.contains_size("50*80"));
        assert!(!catalog.contains_size("50*81"));
        assert!(catalog.contains_frame_model("C2"));
        assert!(!catalog.contains_frame_model("D1"));
        assert_eq!(catalog.frame_aliases.len(), 18);
        assert!(catalog.frame_aliases.contains(&FrameAlias::new("B-2", "B2")));
    }

    #[test]
    fn test_catalog_serde_uses_size_strings() {
        let catalog = Catalog::default().with_sizes(vec![SizeCode::new(30, 42)]);
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["sizes"], serde_json::json!(["30*42"]));

        let parsed: Catalog =
            serde_json::from_str(r#"{"sizes": ["10*15"], "frame_models": ["Z9"]}"#).unwrap();
        assert_eq!(parsed.sizes, vec![SizeCode::new(10, 15)]);
        assert_eq!(parsed.frame_models, vec!["Z9".to_string()]);
        assert_eq!(parsed.frame_aliases, Catalog::default().frame_aliases);
    }

    #[test]
    fn test_catalog_rejects_bad_size() {
        let parsed = serde_json::from_str::<Catalog>(r#"{"sizes": ["big"]}"#);
        assert!(parsed.is_err());
    }
}
