//! Line-by-line pattern matcher.
//!
//! Walks every non-skipped line and tries a small set of single-line
//! patterns; the first pattern that matches a line wins for that line. The
//! quantity pattern is tried first so "2x Widget 5.00" captures its explicit
//! quantity instead of degenerating to a description with a trailing number.

use super::{ItemDraft, ItemStrategy, StrategyContext};
use crate::models::receipt::StrategyKind;
use crate::receipt::lines::Line;
use crate::receipt::rules::parse_amount;
use crate::receipt::rules::patterns::{
    DOT_LEADER_AMOUNT, LEADING_CURRENCY_AMOUNT, QTY_ITEM, TRAILING_AMOUNT,
    TRAILING_CURRENCY_AMOUNT,
};

pub struct LinePattern;

fn match_line(text: &str, ctx: &StrategyContext<'_>) -> Option<ItemDraft> {
    let max = ctx.limits.max_amount;

    if let Some(caps) = QTY_ITEM.captures(text) {
        let quantity: u32 = caps[1].parse().unwrap_or(1);
        let amount = parse_amount(&caps[3])?;
        return ItemDraft::new(&caps[2], amount, quantity, max);
    }

    if let Some(caps) = TRAILING_AMOUNT.captures(text) {
        let amount = parse_amount(&caps[2])?;
        return ItemDraft::new(&caps[1], amount, 1, max);
    }

    if let Some(caps) = TRAILING_CURRENCY_AMOUNT.captures(text) {
        let amount = parse_amount(&caps[2])?;
        return ItemDraft::new(&caps[1], amount, 1, max);
    }

    if let Some(caps) = LEADING_CURRENCY_AMOUNT.captures(text) {
        let amount = parse_amount(&caps[1])?;
        return ItemDraft::new(&caps[2], amount, 1, max);
    }

    if let Some(caps) = DOT_LEADER_AMOUNT.captures(text) {
        let amount = parse_amount(&caps[2])?;
        return ItemDraft::new(&caps[1], amount, 1, max);
    }

    None
}

impl ItemStrategy for LinePattern {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LinePattern
    }

    fn extract(&self, lines: &[Line], ctx: &StrategyContext<'_>) -> Vec<ItemDraft> {
        lines
            .iter()
            .filter(|line| !ctx.filter.is_skip(&line.text))
            .filter_map(|line| match_line(&line.text, ctx))
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
        LinePattern.extract(&segment_lines(text), &ctx)
    }

    #[test]
    fn test_description_with_trailing_number() {
        let drafts = run("Sandwich 6.00");

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].description, "Sandwich");
        assert_eq!(drafts[0].amount, Decimal::new(600, 2));
        assert_eq!(drafts[0].quantity, 1);
    }

    #[test]
    fn test_currency_prefixed_amounts() {
        let drafts = run("Latte $4.20\n$3.10 Croissant");

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].description, "Latte");
        assert_eq!(drafts[0].amount, Decimal::new(420, 2));
        assert_eq!(drafts[1].description, "Croissant");
        assert_eq!(drafts[1].amount, Decimal::new(310, 2));
    }

    #[test]
    fn test_explicit_quantity() {
        let drafts = run("2x Widget 5.00");

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].description, "Widget");
        assert_eq!(drafts[0].quantity, 2);
        assert_eq!(drafts[0].amount, Decimal::new(500, 2));
    }

    #[test]
    fn test_dot_leader() {
        let drafts = run("Soup of the day......4.80");

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].description, "Soup of the day");
        assert_eq!(drafts[0].amount, Decimal::new(480, 2));
    }

    #[test]
    fn test_skip_lines_and_unmatched_lines_contribute_nothing() {
        let drafts = run("Corner Cafe\nTOTAL 9.00\nThank you\nSandwich 6.00");

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].description, "Sandwich");
    }

    #[test]
    fn test_rejects_invalid_candidates() {
        // Purely numeric description and out-of-range amount.
        assert!(run("12345 99.00").is_empty());
        assert!(run("Rug 100000").is_empty());
    }
}
