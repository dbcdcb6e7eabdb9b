//! Keyword-based category classification.
//!
//! Deterministic fallback for the optional external classification
//! collaborator; never fails.

use crate::models::config::CategoryRule;
use crate::models::receipt::FALLBACK_CATEGORY;

/// Assigns a spending category to an item description by keyword lookup.
pub struct CategoryClassifier {
    rules: Vec<(String, Vec<String>)>,
}

impl CategoryClassifier {
    pub fn new(rules: &[CategoryRule]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|r| {
                    (
                        r.id.clone(),
                        r.keywords.iter().map(|k| k.to_lowercase()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// First category, in declaration order, with a keyword appearing as a
    /// substring of the lowercased description; "other" when none matches.
    pub fn classify(&self, description: &str) -> String {
        let lower = description.to_lowercase();

        for (id, keywords) in &self.rules {
            if keywords.iter().any(|k| lower.contains(k.as_str())) {
                return id.clone();
            }
        }

        FALLBACK_CATEGORY.to_string()
    }
}
