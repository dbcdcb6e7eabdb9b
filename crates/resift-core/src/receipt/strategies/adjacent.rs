//! Adjacent-line pair matcher.
//!
//! Pairs a description line with the price-shaped line immediately below
//! it. Uses the tighter adjacent amount ceiling since this layout is the
//! most prone to swallowing a subtotal/total price.

use super::{ItemDraft, ItemStrategy, StrategyContext};
use crate::models::receipt::StrategyKind;
use crate::receipt::filter::contains_total_keyword;
use crate::receipt::lines::Line;
use crate::receipt::rules::parse_price_line;

pub struct AdjacentPair;

impl ItemStrategy for AdjacentPair {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AdjacentPair
    }

    fn extract(&self, lines: &[Line], ctx: &StrategyContext<'_>) -> Vec<ItemDraft> {
        let mut drafts = Vec::new();
        let mut i = 0;

        while i + 1 < lines.len() {
            let current = &lines[i];

            if !ctx.filter.is_skip(&current.text) && parse_price_line(&current.text).is_none() {
                if let Some(amount) = parse_price_line(&lines[i + 1].text) {
                    if let Some(draft) =
                        ItemDraft::new(&current.text, amount, 1, ctx.limits.adjacent_max_amount)
                    {
                        drafts.push(draft);
                        i += 2;
                        continue;
                    }
                }
            }

            i += 1;
        }

        // Trim at the first item whose description is itself a totals line,
        // in case the pairing consumed one.
        if let Some(pos) = drafts
            .iter()
            .position(|d| contains_total_keyword(&d.description))
        {
            drafts.truncate(pos);
        }

        drafts
    }
}
