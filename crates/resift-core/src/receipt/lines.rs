//! Line segmentation - the substrate all other components operate on.

/// One trimmed, non-empty line of OCR text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Zero-based index reflecting receipt reading order.
    pub index: usize,
    /// Trimmed line text, never empty.
    pub text: String,
}

/// Split raw OCR text into ordered, trimmed, non-empty lines.
///
/// Empty input yields an empty sequence; every downstream stage tolerates
/// that.
pub fn segment_lines(raw: &str) -> Vec<Line> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .enumerate()
        .map(|(index, text)| Line {
            index,
            text: text.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_segments_and_trims() {
        let lines = segment_lines("  Store  \n\n  Coffee 3.50\r\nTea 2.00\n   \n");

        assert_eq!(
            lines,
            vec![
                Line { index: 0, text: "Store".to_string() },
                Line { index: 1, text: "Coffee 3.50".to_string() },
                Line { index: 2, text: "Tea 2.00".to_string() },
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(segment_lines("").is_empty());
        assert!(segment_lines("  \n \r\n ").is_empty());
    }
}
