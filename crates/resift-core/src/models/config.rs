//! Configuration structures for the receipt scanning pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Main configuration for the resift pipeline.
///
/// Externally supplied and read-only: the core never mutates it, and the
/// keyword sets can be changed without touching pipeline logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Skip-line filter configuration.
    pub skip: SkipConfig,

    /// Ordered category keyword rules. Declaration order decides precedence
    /// when several categories match a description.
    pub categories: Vec<CategoryRule>,

    /// Numeric limits for extraction.
    pub extraction: ExtractionConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            skip: SkipConfig::default(),
            categories: default_categories(),
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Skip-line filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipConfig {
    /// Lowercase substrings that mark a line as boilerplate.
    pub keywords: Vec<String>,
}

impl Default for SkipConfig {
    fn default() -> Self {
        Self {
            keywords: [
                "total",
                "subtotal",
                "sub-total",
                "tax",
                "vat",
                "gst",
                "amount due",
                "balance",
                "change",
                "cash",
                "card",
                "credit",
                "debit",
                "visa",
                "mastercard",
                "payment",
                "tender",
                "thank",
                "welcome",
                "visit",
                "cashier",
                "receipt no",
                "invoice",
                "tel:",
                "phone",
                "fax",
                "www",
                "http",
                "@",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// One category with its keyword set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category id, e.g. "food".
    pub id: String,

    /// Lowercase keyword substrings that map a description to this category.
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(id: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            id: id.into(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "food",
            &[
                "pizza", "burger", "sandwich", "coffee", "tea", "restaurant", "cafe", "meal",
                "lunch", "dinner", "breakfast", "juice", "soda", "beer", "wine",
            ],
        ),
        CategoryRule::new(
            "groceries",
            &[
                "milk", "bread", "egg", "cheese", "butter", "rice", "pasta", "fruit", "apple",
                "banana", "vegetable", "grocery", "market",
            ],
        ),
        CategoryRule::new(
            "transport",
            &[
                "taxi", "uber", "bus", "train", "metro", "fuel", "petrol", "diesel", "parking",
                "toll",
            ],
        ),
        CategoryRule::new(
            "shopping",
            &["shirt", "shoe", "jacket", "jeans", "electronics", "book", "toy", "gift"],
        ),
        CategoryRule::new(
            "health",
            &["pharmacy", "medicine", "tablet", "vitamin", "clinic", "doctor"],
        ),
        CategoryRule::new(
            "entertainment",
            &["movie", "cinema", "ticket", "game", "concert", "museum"],
        ),
    ]
}

/// Numeric limits for extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Exclusive upper bound for an accepted item amount.
    pub max_amount: Decimal,

    /// Tighter exclusive upper bound used by the adjacent-line strategy,
    /// which is the most prone to pairing a description with a totals line.
    pub adjacent_max_amount: Decimal,

    /// How many lines after a "total" marker to scan for the receipt total.
    pub total_lookahead: usize,

    /// Minimum confidence to accept an external category suggestion.
    pub min_confidence: f32,

    /// Maximum in-flight requests when classifying items via the external
    /// collaborator.
    pub classification_fan_out: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_amount: Decimal::from(100_000),
            adjacent_max_amount: Decimal::from(10_000),
            total_lookahead: 10,
            min_confidence: 0.5,
            classification_fan_out: 4,
        }
    }
}

impl ScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ScanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Category ids in declaration order, used as the vocabulary handed to
    /// the external classification collaborator.
    pub fn category_vocabulary(&self) -> Vec<String> {
        self.categories.iter().map(|r| r.id.clone()).collect()
    }
}
