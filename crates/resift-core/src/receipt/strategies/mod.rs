//! Extraction strategies.
//!
//! Each strategy is a pure function over the segmented lines: it returns a
//! (possibly empty) list of validated item drafts and never errors. An empty
//! list is the normal signal for the orchestrator to try the next strategy
//! in the fixed priority order.

mod adjacent;
mod line_pattern;
mod table;
mod total_only;
mod two_column;

pub use adjacent::AdjacentPair;
pub use line_pattern::LinePattern;
pub use table::TableStructure;
pub use total_only::TotalOnly;
pub use two_column::TwoColumn;

use rust_decimal::Decimal;

use crate::models::config::ExtractionConfig;
use crate::models::receipt::StrategyKind;
use crate::receipt::filter::SkipLineFilter;
use crate::receipt::lines::Line;
use crate::receipt::rules::in_item_range;

/// Shared read-only context handed to every strategy.
pub struct StrategyContext<'a> {
    /// Skip-line filter built from the active configuration.
    pub filter: &'a SkipLineFilter,
    /// Numeric extraction limits.
    pub limits: &'a ExtractionConfig,
    /// Extracted merchant name, used by the total-only fallback.
    pub merchant: &'a str,
}

/// One self-contained extraction heuristic.
pub trait ItemStrategy {
    /// Which strategy this is, for tracing and result metadata.
    fn kind(&self) -> StrategyKind;

    /// Extract candidate items. Must not fail; an empty list means the
    /// strategy did not apply.
    fn extract(&self, lines: &[Line], ctx: &StrategyContext<'_>) -> Vec<ItemDraft>;
}

/// A validated candidate item, before categorization.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub description: String,
    pub amount: Decimal,
    pub quantity: u32,
}

impl ItemDraft {
    /// Build a draft, enforcing the item invariants: amount strictly inside
    /// (0, max), description at least 2 characters after trailing
    /// punctuation is stripped and not purely numeric, quantity at least 1.
    /// Returns `None` when the candidate must be discarded.
    pub fn new(description: &str, amount: Decimal, quantity: u32, max_amount: Decimal) -> Option<Self> {
        if !in_item_range(amount, max_amount) {
            return None;
        }
        let description = clean_description(description)?;
        Some(Self {
            description,
            amount,
            quantity: quantity.max(1),
        })
    }
}

/// Trim a raw description and strip trailing punctuation. Returns `None`
/// when what remains is too short or has no letters.
pub fn clean_description(raw: &str) -> Option<String> {
    let cleaned = raw
        .trim()
        .trim_end_matches(['.', ',', ':', ';', '-', '*', ' '])
        .to_string();

    if cleaned.chars().count() < 2 || !cleaned.chars().any(|c| c.is_alphabetic()) {
        return None;
    }

    Some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_clean_description() {
        assert_eq!(clean_description("Coffee....."), Some("Coffee".to_string()));
        assert_eq!(clean_description("  Milk ,"), Some("Milk".to_string()));
        assert_eq!(clean_description("12"), None);
        assert_eq!(clean_description("X"), None);
        // One accented letter is one character, whatever its byte width.
        assert_eq!(clean_description("é"), None);
        assert_eq!(clean_description("---"), None);
    }

    #[test]
    fn test_draft_enforces_invariants() {
        let max = Decimal::from(100_000);

        let draft = ItemDraft::new("Coffee", dec("3.50"), 0, max).unwrap();
        assert_eq!(draft.quantity, 1);

        assert!(ItemDraft::new("Coffee", Decimal::ZERO, 1, max).is_none());
        assert!(ItemDraft::new("Coffee", dec("100000"), 1, max).is_none());
        assert!(ItemDraft::new("42", dec("3.50"), 1, max).is_none());
    }
}
