//! Skip-line filter - classifies a line as non-item boilerplate.

use crate::models::config::SkipConfig;
use crate::receipt::rules::patterns::{
    ADDRESS_LINE, BARE_INTEGER, DATE_ONLY, DATE_TIME_LABEL, PHONE_LINE, TIME_OF_DAY,
};

/// Keywords that mark a description as a totals/balance line. Used by the
/// adjacent-pair strategy to trim items that accidentally consumed a totals
/// line, independent of the configurable skip set.
const TOTAL_KEYWORDS: [&str; 6] = ["total", "subtotal", "tax", "balance", "due", "change"];

/// Whether the text contains a totals/tax/balance keyword.
pub fn contains_total_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    TOTAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Classifies lines as noise: totals, tax, payment metadata, contact info,
/// greetings, and other header/footer boilerplate.
pub struct SkipLineFilter {
    keywords: Vec<String>,
}

impl SkipLineFilter {
    pub fn new(config: &SkipConfig) -> Self {
        Self {
            keywords: config.keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Whether the line should be excluded from item candidates.
    pub fn is_skip(&self, text: &str) -> bool {
        let trimmed = text.trim();

        if trimmed.chars().count() < 3 {
            return true;
        }
        if !trimmed.chars().any(|c| c.is_alphanumeric()) {
            return true;
        }

        // Long digit-only runs are noise (barcodes, receipt numbers); short
        // ones may be quantities and are already caught by the length rule.
        if BARE_INTEGER.is_match(trimmed) && trimmed.len() > 2 {
            return true;
        }

        let lower = trimmed.to_lowercase();
        if self.keywords.iter().any(|k| lower.contains(k)) {
            return true;
        }

        DATE_ONLY.is_match(trimmed)
            || DATE_TIME_LABEL.is_match(trimmed)
            || PHONE_LINE.is_match(trimmed)
            || ADDRESS_LINE.is_match(&lower)
            || TIME_OF_DAY.is_match(trimmed)
    }
}

impl Default for SkipLineFilter {
    fn default() -> Self {
        Self::new(&SkipConfig::default())
    }
}
