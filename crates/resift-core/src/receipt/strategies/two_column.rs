//! Two-column positional matcher.
//!
//! Some OCR dumps put all descriptions first and all prices later. Item
//! prices precede subtotal/tax/total prices in reading order, so pairing
//! only as many leading prices as there are item candidates avoids
//! consuming the totals block.

use super::{clean_description, ItemDraft, ItemStrategy, StrategyContext};
use crate::models::receipt::StrategyKind;
use crate::receipt::lines::Line;
use crate::receipt::rules::patterns::BARE_INTEGER;
use crate::receipt::rules::{in_item_range, parse_price_line};

pub struct TwoColumn;

impl ItemStrategy for TwoColumn {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TwoColumn
    }

    fn extract(&self, lines: &[Line], ctx: &StrategyContext<'_>) -> Vec<ItemDraft> {
        let prices: Vec<_> = lines
            .iter()
            .filter_map(|l| parse_price_line(&l.text))
            .filter(|a| in_item_range(*a, ctx.limits.max_amount))
            .collect();

        // Line 0 is the merchant-name heuristic and never an item candidate.
        let descriptions: Vec<_> = lines
            .iter()
            .filter(|l| l.index > 0)
            .filter(|l| !ctx.filter.is_skip(&l.text))
            .filter(|l| !BARE_INTEGER.is_match(&l.text))
            .filter(|l| parse_price_line(&l.text).is_none())
            .filter_map(|l| clean_description(&l.text))
            .collect();

        descriptions
            .into_iter()
            .zip(prices)
            .filter_map(|(desc, amount)| ItemDraft::new(&desc, amount, 1, ctx.limits.max_amount))
            .collect()
    }
}
