//! External collaborator interfaces.
//!
//! Both collaborators are optional AI services. Their failures are caught at
//! this boundary and logged; the pipeline then proceeds with its
//! deterministic fallback. A collaborator error is never fatal to a scan.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CollabError;

/// An item proposed by the pre-parse collaborator, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedItem {
    /// Item description.
    pub description: String,
    /// Item amount.
    pub amount: Decimal,
}

/// A category suggested for one item by the classification collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySuggestion {
    /// Suggested category label.
    pub category: String,
    /// Collaborator confidence in 0.0..=1.0.
    pub confidence: f32,
}

/// Generative-model service that may propose a pre-parsed item list from the
/// raw OCR text, bypassing the strategy chain when its output is usable.
#[async_trait]
pub trait ItemProposer: Send + Sync {
    /// Propose candidate items for the given raw receipt text.
    async fn propose(&self, raw_text: &str) -> std::result::Result<Vec<ProposedItem>, CollabError>;
}

/// Per-item classification service working over a fixed category vocabulary.
#[async_trait]
pub trait CategorySuggester: Send + Sync {
    /// Suggest a category for one item description.
    async fn suggest(
        &self,
        description: &str,
        vocabulary: &[String],
    ) -> std::result::Result<CategorySuggestion, CollabError>;
}
