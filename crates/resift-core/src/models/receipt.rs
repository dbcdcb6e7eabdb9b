//! Receipt scan result models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category assigned when no keyword rule and no collaborator matches.
pub const FALLBACK_CATEGORY: &str = "other";

/// A single purchased product or service inferred from receipt text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description as printed on the receipt, cleaned of trailing
    /// punctuation.
    pub description: String,

    /// Item amount. Always in (0, max_amount).
    pub amount: Decimal,

    /// Quantity. Defaults to 1 unless explicitly parsed (e.g. "2x Widget").
    pub quantity: u32,

    /// Spending category id from the configured vocabulary, or "other".
    pub category: String,
}

/// Which extraction strategy produced the accepted item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// QTY/DESCRIPTION/AMOUNT marker-block table layout.
    Table,
    /// Single-line description + amount patterns.
    LinePattern,
    /// Positional pairing of a description column with a price column.
    TwoColumn,
    /// Description line immediately followed by a price line.
    AdjacentPair,
    /// Single synthetic item from the receipt total.
    TotalOnly,
    /// Item list supplied by the external pre-parse collaborator.
    External,
}

impl StrategyKind {
    /// Stable name used in trace output.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Table => "table",
            StrategyKind::LinePattern => "line_pattern",
            StrategyKind::TwoColumn => "two_column",
            StrategyKind::AdjacentPair => "adjacent_pair",
            StrategyKind::TotalOnly => "total_only",
            StrategyKind::External => "external",
        }
    }
}

/// One strategy attempt recorded by the orchestrator, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAttempt {
    /// Strategy that was tried.
    pub strategy: StrategyKind,
    /// Number of valid items it produced.
    pub items_found: usize,
}

/// Result of scanning one receipt.
///
/// Created fresh per scan invocation and never mutated after composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Merchant name (heuristically the first substantive line).
    pub merchant: String,

    /// Transaction date; the scan-time date when no date was printed.
    pub date: NaiveDate,

    /// Extracted line items in receipt reading order.
    pub items: Vec<LineItem>,

    /// Strategy whose output was accepted.
    pub strategy: StrategyKind,

    /// Per-strategy trace of the chain run, in priority order.
    pub attempts: Vec<StrategyAttempt>,

    /// Extraction warnings.
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ScanResult {
    /// Sum of item amounts weighted by quantity.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| i.amount * Decimal::from(i.quantity))
            .sum()
    }

    /// Check item invariants, returning a list of issues (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.merchant.trim().is_empty() {
            issues.push("merchant name is empty".to_string());
        }

        for (i, item) in self.items.iter().enumerate() {
            if item.description.trim().chars().count() < 2 {
                issues.push(format!("item {}: description too short", i + 1));
            }
            if item.description.chars().all(|c| !c.is_alphabetic()) {
                issues.push(format!("item {}: description has no letters", i + 1));
            }
            if item.amount <= Decimal::ZERO {
                issues.push(format!("item {}: amount is not positive", i + 1));
            }
            if item.quantity == 0 {
                issues.push(format!("item {}: quantity is zero", i + 1));
            }
        }

        issues
    }
}
