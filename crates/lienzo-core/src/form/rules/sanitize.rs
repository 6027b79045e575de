//! Character-level cleanup of raw extracted values.

use super::patterns::{DISALLOWED_CHARS, NON_DIGITS};

/// Clean a raw value captured after `keyword`.
///
/// Drops the keyword if it is still in front of the value, then removes
/// everything except letters, digits, whitespace and `* - : . /`.
pub fn sanitize(raw: &str, keyword: &str) -> String {
    let raw = raw.trim();
    let raw = raw.strip_prefix(keyword).unwrap_or(raw);
    DISALLOWED_CHARS.replace_all(raw, "").trim().to_string()
}

/// Keep only ASCII digits.
pub fn digits_only(raw: &str) -> String {
    NON_DIGITS.replace_all(raw, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_disallowed_chars() {
        assert_eq!(sanitize(" JUAN PÉREZ (HIJO)! ", "SOLICITANTE"), "JUAN PÉREZ HIJO");
        assert_eq!(sanitize("10:30 #", "HORA DE ENTREGA"), "10:30");
        assert_eq!(sanitize("AV. ARCE 2/B-3 *", "LUGAR DE ENTREGA"), "AV. ARCE 2/B-3 *");
    }

    #[test]
    fn test_removes_repeated_keyword() {
        assert_eq!(sanitize("SALA AURORA", "SALA"), "AURORA");
    }

    #[test]
    fn test_nothing_left() {
        assert_eq!(sanitize("  ¡¿?!  ", "PRECIO"), "");
        assert_eq!(sanitize("", "PRECIO"), "");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("Tel: 77419-001 ext2"), "774190012");
        assert_eq!(digits_only("Bs. 300,00"), "30000");
        assert_eq!(digits_only("N/A"), "");
    }
}
