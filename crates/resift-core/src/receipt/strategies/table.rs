//! Table-structure matcher.
//!
//! Handles receipts whose OCR output is a columnar dump: a QTY marker, a
//! DESCRIPTION marker, an AMOUNT marker, then the column values in blocks.
//! Descriptions and amounts are paired positionally.

use tracing::trace;

use super::{clean_description, ItemDraft, ItemStrategy, StrategyContext};
use crate::models::receipt::StrategyKind;
use crate::receipt::lines::Line;
use crate::receipt::rules::patterns::{BARE_INTEGER, DATE_NUMERIC};
use crate::receipt::rules::{in_item_range, parse_price_line};

/// Whole-line section markers, matched case-insensitively.
const MARKER_TOKENS: [&str; 6] = ["qty", "quantity", "description", "amount", "price", "item"];

fn is_marker(text: &str) -> bool {
    MARKER_TOKENS.iter().any(|m| text.eq_ignore_ascii_case(m))
}

pub struct TableStructure;

impl TableStructure {
    fn find_marker(lines: &[Line], token: &str, after: usize) -> Option<usize> {
        lines
            .iter()
            .position(|l| l.index >= after && l.text.eq_ignore_ascii_case(token))
    }
}

impl ItemStrategy for TableStructure {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Table
    }

    fn extract(&self, lines: &[Line], ctx: &StrategyContext<'_>) -> Vec<ItemDraft> {
        // The qty marker is optional; description and amount are required,
        // in that order.
        let qty_idx = Self::find_marker(lines, "qty", 0);
        let desc_idx = match Self::find_marker(lines, "description", qty_idx.map_or(0, |q| q + 1)) {
            Some(i) => i,
            None => return Vec::new(),
        };
        let amount_idx = match Self::find_marker(lines, "amount", desc_idx + 1) {
            Some(i) => i,
            None => return Vec::new(),
        };

        // Bare integers between the qty and description markers give an
        // expected item count. Best-effort clamp, not a guarantee: malformed
        // tables can make it under- or overcount.
        let expected = qty_idx.and_then(|q| {
            let count = lines[q + 1..desc_idx]
                .iter()
                .filter(|l| BARE_INTEGER.is_match(&l.text))
                .count();
            if count > 0 { Some(count) } else { None }
        });
        let bound = expected.unwrap_or(usize::MAX);

        // Candidate descriptions: everything after the description marker
        // that is not a marker, a number, a date, a price, or boilerplate.
        let mut descriptions = Vec::new();
        for line in &lines[desc_idx + 1..] {
            if descriptions.len() >= bound {
                break;
            }
            if line.index == amount_idx
                || is_marker(&line.text)
                || BARE_INTEGER.is_match(&line.text)
                || DATE_NUMERIC.is_match(&line.text)
                || parse_price_line(&line.text).is_some()
                || ctx.filter.is_skip(&line.text)
            {
                continue;
            }
            if let Some(desc) = clean_description(&line.text) {
                descriptions.push(desc);
            }
        }

        // Candidate amounts: price-shaped lines after the amount marker.
        // When the qty column did not surface between its marker and the
        // description marker, its values land right after the amount marker
        // instead; skip that leading run so quantity values are not read as
        // prices. Whole-number prices further down still pair normally.
        let mut region = &lines[amount_idx + 1..];
        if qty_idx.is_some() && expected.is_none() {
            let run = region
                .iter()
                .take_while(|l| BARE_INTEGER.is_match(&l.text))
                .count();
            region = &region[run..];
        }

        let mut amounts = Vec::new();
        for line in region {
            if amounts.len() >= bound {
                break;
            }
            if let Some(amount) = parse_price_line(&line.text) {
                if in_item_range(amount, ctx.limits.max_amount) {
                    amounts.push(amount);
                }
            }
        }

        trace!(
            descriptions = descriptions.len(),
            amounts = amounts.len(),
            expected = ?expected,
            "table markers matched"
        );

        descriptions
            .into_iter()
            .zip(amounts)
            .filter_map(|(desc, amount)| ItemDraft::new(&desc, amount, 1, ctx.limits.max_amount))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ExtractionConfig;
    use crate::receipt::filter::SkipLineFilter;
    use crate::receipt::lines::segment_lines;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn run(text: &str) -> Vec<ItemDraft> {
        let filter = SkipLineFilter::default();
        let limits = ExtractionConfig::default();
        let ctx = StrategyContext {
            filter: &filter,
            limits: &limits,
            merchant: "Store",
        };
        TableStructure.extract(&segment_lines(text), &ctx)
    }

    #[test]
    fn test_marker_block_receipt() {
        let drafts = run("Store\nQTY\nDESCRIPTION\nAMOUNT\n2\nCoffee\nTea\n3.50\n2.00");

        assert_eq!(
            drafts,
            vec![
                ItemDraft {
                    description: "Coffee".to_string(),
                    amount: Decimal::new(350, 2),
                    quantity: 1,
                },
                ItemDraft {
                    description: "Tea".to_string(),
                    amount: Decimal::new(200, 2),
                    quantity: 1,
                },
            ]
        );
    }

    #[test]
    fn test_qty_count_bounds_collection() {
        // One bare integer between QTY and DESCRIPTION limits pairing to one
        // item even though two descriptions and two prices follow.
        let drafts = run("QTY\n1\nDESCRIPTION\nCoffee\nTea\nAMOUNT\n3.50\n2.00");

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].description, "Coffee");
        assert_eq!(drafts[0].amount, Decimal::new(350, 2));
    }

    #[test]
    fn test_requires_description_and_amount_markers() {
        assert!(run("Store\nCoffee 3.50").is_empty());
        assert!(run("DESCRIPTION\nCoffee\n3.50").is_empty());
    }

    #[test]
    fn test_whole_number_prices_pair() {
        let drafts = run("DESCRIPTION\nMeal Deal\nAMOUNT\n45");

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].description, "Meal Deal");
        assert_eq!(drafts[0].amount, Decimal::from(45));
    }

    #[test]
    fn test_qty_values_after_amount_marker_are_not_prices() {
        let drafts = run("QTY\nDESCRIPTION\nAMOUNT\n2\n1\nCoffee\nTea\n3.50\n2.00");

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].amount, Decimal::new(350, 2));
        assert_eq!(drafts[1].amount, Decimal::new(200, 2));
    }

    #[test]
    fn test_unpaired_descriptions_are_dropped() {
        let drafts = run("DESCRIPTION\nCoffee\nTea\nAMOUNT\n3.50");

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].description, "Coffee");
    }
}
