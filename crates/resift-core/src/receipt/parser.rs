//! Strategy-chain receipt parser.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::models::config::ScanConfig;
use crate::models::receipt::{LineItem, ScanResult, StrategyAttempt, StrategyKind};
use crate::receipt::classify::CategoryClassifier;
use crate::receipt::filter::SkipLineFilter;
use crate::receipt::lines::{segment_lines, Line};
use crate::receipt::rules::extract_date;
use crate::receipt::strategies::{
    AdjacentPair, ItemDraft, ItemStrategy, LinePattern, StrategyContext, TableStructure,
    TotalOnly, TwoColumn,
};
use crate::ExtractionError;

use super::Result;

/// Trait for receipt parsing.
pub trait ReceiptParser {
    /// Parse a receipt from raw OCR text.
    fn parse(&self, text: &str) -> Result<ScanResult>;
}

/// Receipt parser running a fixed-priority chain of extraction strategies.
///
/// The chain is a pure function of the raw text plus configuration: no state
/// persists across calls, so independent scans may run in parallel with no
/// coordination and an in-flight scan can simply be discarded.
pub struct StrategyChainParser {
    config: ScanConfig,
    filter: SkipLineFilter,
    classifier: CategoryClassifier,
    reference_date: Option<NaiveDate>,
}

impl StrategyChainParser {
    /// Create a parser with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Create a parser with an externally supplied configuration.
    pub fn with_config(config: ScanConfig) -> Self {
        let filter = SkipLineFilter::new(&config.skip);
        let classifier = CategoryClassifier::new(&config.categories);
        Self {
            config,
            filter,
            classifier,
            reference_date: None,
        }
    }

    /// Fix the date used when the receipt prints none, instead of the
    /// scan-time date. Useful for deterministic tests.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Compose a result from externally supplied drafts (the pre-parse
    /// collaborator path): merchant/date extraction and categorization still
    /// run, the strategy chain does not.
    pub fn compose(&self, text: &str, drafts: Vec<ItemDraft>, strategy: StrategyKind) -> ScanResult {
        let start = Instant::now();
        let lines = segment_lines(text);
        self.compose_result(&lines, drafts, strategy, Vec::new(), start)
    }

    fn run_chain(
        &self,
        lines: &[Line],
        merchant: &str,
    ) -> Option<(Vec<ItemDraft>, StrategyKind, Vec<StrategyAttempt>)> {
        let ctx = StrategyContext {
            filter: &self.filter,
            limits: &self.config.extraction,
            merchant,
        };

        let strategies: [&dyn ItemStrategy; 5] = [
            &TableStructure,
            &LinePattern,
            &TwoColumn,
            &AdjacentPair,
            &TotalOnly,
        ];

        let mut attempts = Vec::new();
        for strategy in strategies {
            let drafts = strategy.extract(lines, &ctx);
            debug!(
                strategy = strategy.kind().as_str(),
                items = drafts.len(),
                "strategy attempt"
            );
            attempts.push(StrategyAttempt {
                strategy: strategy.kind(),
                items_found: drafts.len(),
            });

            if !drafts.is_empty() {
                return Some((drafts, strategy.kind(), attempts));
            }
        }

        None
    }

    fn merchant_of(lines: &[Line]) -> String {
        lines
            .first()
            .map(|l| l.text.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn compose_result(
        &self,
        lines: &[Line],
        drafts: Vec<ItemDraft>,
        strategy: StrategyKind,
        attempts: Vec<StrategyAttempt>,
        start: Instant,
    ) -> ScanResult {
        let merchant = Self::merchant_of(lines);
        let mut warnings = Vec::new();

        let date = match extract_date(lines) {
            Some(date) => date,
            None => {
                warnings.push("no transaction date found, defaulting to scan date".to_string());
                self.reference_date
                    .unwrap_or_else(|| Local::now().date_naive())
            }
        };

        if strategy == StrategyKind::TotalOnly {
            warnings.push(
                "no individual items isolated; receipt total used as a single item".to_string(),
            );
        }

        let items = drafts
            .into_iter()
            .map(|d| LineItem {
                category: self.classifier.classify(&d.description),
                description: d.description,
                amount: d.amount,
                quantity: d.quantity,
            })
            .collect();

        ScanResult {
            merchant,
            date,
            items,
            strategy,
            attempts,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for StrategyChainParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for StrategyChainParser {
    fn parse(&self, text: &str) -> Result<ScanResult> {
        let start = Instant::now();
        let lines = segment_lines(text);
        let merchant = Self::merchant_of(&lines);

        debug!(lines = lines.len(), "parsing receipt text");

        let Some((drafts, strategy, attempts)) = self.run_chain(&lines, &merchant) else {
            debug!("all strategies exhausted, no items detected");
            return Err(ExtractionError::NoItems);
        };

        Ok(self.compose_result(&lines, drafts, strategy, attempts, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn parser() -> StrategyChainParser {
        StrategyChainParser::new()
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    }

    #[test]
    fn test_table_receipt() {
        let result = parser()
            .parse("Store\nQTY\nDESCRIPTION\nAMOUNT\n2\nCoffee\nTea\n3.50\n2.00")
            .unwrap();

        assert_eq!(result.strategy, StrategyKind::Table);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].description, "Coffee");
        assert_eq!(result.items[0].amount, Decimal::new(350, 2));
        assert_eq!(result.items[1].description, "Tea");
        assert_eq!(result.items[1].amount, Decimal::new(200, 2));
        assert_eq!(result.merchant, "Store");
    }

    #[test]
    fn test_table_precedence_over_later_strategies() {
        // Line-pattern would also match "Juice 9.99", but the table output
        // must be used verbatim.
        let result = parser()
            .parse("Store\nQTY\nDESCRIPTION\nAMOUNT\nCoffee\n3.50\nJuice 9.99")
            .unwrap();

        assert_eq!(result.strategy, StrategyKind::Table);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].description, "Coffee");
        assert_eq!(result.attempts.len(), 1);
    }

    #[test]
    fn test_single_line_pattern() {
        let result = parser().parse("Deli Corner\nSandwich 6.00").unwrap();

        assert_eq!(result.strategy, StrategyKind::LinePattern);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].description, "Sandwich");
        assert_eq!(result.items[0].amount, Decimal::new(600, 2));
        assert_eq!(result.items[0].quantity, 1);
        assert_eq!(result.items[0].category, "food");
    }

    #[test]
    fn test_two_column_receipt() {
        let result = parser()
            .parse("Grocer\nBread\nMilk\n2.50\n3.00\n45.00")
            .unwrap();

        assert_eq!(result.strategy, StrategyKind::TwoColumn);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].description, "Bread");
        assert_eq!(result.items[0].amount, Decimal::new(250, 2));
        assert_eq!(result.items[1].description, "Milk");
        assert_eq!(result.items[1].amount, Decimal::new(300, 2));
        // The chain got past table and line-pattern first.
        assert_eq!(result.attempts.len(), 3);
    }

    #[test]
    fn test_total_only_fallback() {
        let result = parser()
            .parse("SuperMart\nThank you\nTotal\n45.00")
            .unwrap();

        assert_eq!(result.strategy, StrategyKind::TotalOnly);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].description, "Receipt from SuperMart");
        assert_eq!(result.items[0].amount, Decimal::new(4500, 2));
        assert_eq!(result.items[0].category, "other");
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("receipt total")));
    }

    #[test]
    fn test_total_failure_is_explicit_no_items() {
        let err = parser().parse("Thank you\nVisit again").unwrap_err();
        assert_eq!(err, ExtractionError::NoItems);

        let err = parser().parse("").unwrap_err();
        assert_eq!(err, ExtractionError::NoItems);
    }

    #[test]
    fn test_date_extraction_and_fallback() {
        let with_date = parser()
            .parse("Store\n12/03/2024\nSandwich 6.00")
            .unwrap();
        assert_eq!(with_date.date, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
        assert!(with_date.warnings.is_empty());

        let without_date = parser().parse("Store\nSandwich 6.00").unwrap();
        assert_eq!(
            without_date.date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(!without_date.warnings.is_empty());
    }

    #[test]
    fn test_idempotence() {
        let text = "Store\n12/03/24\nCoffee 3.50\n2x Bagel 4.00\nTOTAL 7.50";
        let first = parser().parse(text).unwrap();
        let second = parser().parse(text).unwrap();

        assert_eq!(first.items, second.items);
        assert_eq!(first.merchant, second.merchant);
        assert_eq!(first.date, second.date);
        assert_eq!(first.strategy, second.strategy);
    }

    #[test]
    fn test_skip_keywords_never_become_descriptions() {
        let text = "Store\nCoffee 3.50\nSUBTOTAL 3.50\nTAX 0.30\nTOTAL 3.80\nCASH 5.00";
        let result = parser().parse(text).unwrap();

        let skip = ["subtotal", "tax", "total", "cash"];
        for item in &result.items {
            let lower = item.description.to_lowercase();
            assert!(
                skip.iter().all(|k| !lower.contains(k)),
                "skip keyword leaked into {:?}",
                item.description
            );
        }
    }

    #[test]
    fn test_quantity_parsed_from_line() {
        let result = parser().parse("Store\n2x Widget 5.00").unwrap();

        assert_eq!(result.items[0].quantity, 2);
        assert_eq!(result.items[0].description, "Widget");
    }

    #[test]
    fn test_items_validate_invariants() {
        let text = "Store\nCoffee 3.50\nBread 2.00\nTOTAL 5.50";
        let result = parser().parse(text).unwrap();

        assert!(result.validate().is_empty());
        for item in &result.items {
            assert!(item.amount > Decimal::ZERO);
            assert!(item.amount < Decimal::from(100_000));
            assert!(item.quantity >= 1);
            assert!(item.description.len() >= 2);
        }
    }
}
