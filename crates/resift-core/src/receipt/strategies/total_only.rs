//! Total-only fallback matcher.
//!
//! Last resort: when no individual items can be isolated, emit one
//! synthetic item equal to the receipt's total so the scan still yields a
//! usable transaction.

use super::{ItemDraft, ItemStrategy, StrategyContext};
use crate::models::receipt::StrategyKind;
use crate::receipt::lines::Line;
use crate::receipt::rules::{in_item_range, parse_price_line};

/// Whole-line total markers, matched case-insensitively.
const TOTAL_MARKERS: [&str; 3] = ["total", "balance", "grand total"];

pub struct TotalOnly;

impl ItemStrategy for TotalOnly {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TotalOnly
    }

    fn extract(&self, lines: &[Line], ctx: &StrategyContext<'_>) -> Vec<ItemDraft> {
        let marker = lines.iter().position(|l| {
            TOTAL_MARKERS
                .iter()
                .any(|m| l.text.eq_ignore_ascii_case(m))
        });

        let Some(marker) = marker else {
            return Vec::new();
        };

        for line in lines[marker + 1..].iter().take(ctx.limits.total_lookahead) {
            if let Some(amount) = parse_price_line(&line.text) {
                if in_item_range(amount, ctx.limits.max_amount) {
                    let description = format!("Receipt from {}", ctx.merchant);
                    return ItemDraft::new(&description, amount, 1, ctx.limits.max_amount)
                        .into_iter()
                        .collect();
                }
            }
        }

        Vec::new()
    }
}
