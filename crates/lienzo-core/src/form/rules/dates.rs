//! Date formatting for form dates.

use super::sanitize::digits_only;

/// Format a date-like value as `DD-MM-YY` or `DD-MM-YYYY`.
///
/// Only the digits are kept. Six digits split 2/2/2 and eight digits split
/// 2/2/4; any other count is returned as the bare digit string.
pub fn format_date(raw: &str) -> String {
    let digits = digits_only(raw);
    match digits.len() {
        6 => format!("{}-{}-{}", &digits[0..2], &digits[2..4], &digits[4..6]),
        8 => format!("{}-{}-{}", &digits[0..2], &digits[2..4], &digits[4..8]),
        _ => digits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_digits() {
        assert_eq!(format_date("010224"), "01-02-24");
        assert_eq!(format_date("01/02/24"), "01-02-24");
    }

    #[test]
    fn test_eight_digits() {
        assert_eq!(format_date("01022024"), "01-02-2024");
        assert_eq!(format_date("01-02-2024"), "01-02-2024");
        assert_eq!(format_date("01.02.2024"), "01-02-2024");
    }

    #[test]
    fn test_other_lengths_fall_back_to_digits() {
        assert_eq!(format_date("0102"), "0102");
        assert_eq!(format_date("1/2/202"), "12202");
        assert_eq!(format_date("MAÑANA"), "");
    }
}
