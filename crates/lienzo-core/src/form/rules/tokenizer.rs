//! Splits recognized text into lines.

/// Iterate over the trimmed, non-empty lines of `text`, in order.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Collect the lines of `text`.
pub fn tokenize(text: &str) -> Vec<&str> {
    lines(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trims_and_drops_blank_lines() {
        let text = "  CTTO: 154251188  \n\n   \r\n\tSALA: AURORA\r\n";
        assert_eq!(tokenize(text), vec!["CTTO: 154251188", "SALA: AURORA"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n \n").is_empty());
    }
}
