//! Scan pipeline with optional AI collaborators.
//!
//! Wraps the deterministic strategy-chain parser with the two optional
//! collaborators from the outer application: a pre-parse service that may
//! supply the item list directly, and a per-item category service. Either
//! may be absent, slow, or broken; the pipeline always degrades to the
//! deterministic path and a collaborator failure is never fatal to a scan.
//!
//! The pipeline holds no external resources and performs no partial writes,
//! so cancelling (dropping) an in-flight scan at any await point is safe.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::collab::{CategorySuggester, ItemProposer};
use crate::models::receipt::{ScanResult, StrategyKind};
use crate::receipt::parser::{ReceiptParser, StrategyChainParser};
use crate::receipt::strategies::ItemDraft;

use super::Result;

/// Receipt scan pipeline: strategy-chain parser plus optional collaborators.
pub struct ScanPipeline {
    parser: StrategyChainParser,
    proposer: Option<Arc<dyn ItemProposer>>,
    suggester: Option<Arc<dyn CategorySuggester>>,
}

impl ScanPipeline {
    pub fn new(parser: StrategyChainParser) -> Self {
        Self {
            parser,
            proposer: None,
            suggester: None,
        }
    }

    /// Attach the pre-parse collaborator.
    pub fn with_proposer(mut self, proposer: Arc<dyn ItemProposer>) -> Self {
        self.proposer = Some(proposer);
        self
    }

    /// Attach the per-item classification collaborator.
    pub fn with_suggester(mut self, suggester: Arc<dyn CategorySuggester>) -> Self {
        self.suggester = Some(suggester);
        self
    }

    /// The underlying deterministic parser.
    pub fn parser(&self) -> &StrategyChainParser {
        &self.parser
    }

    /// Scan one receipt.
    ///
    /// Outcomes are exactly those of the deterministic parser: a populated
    /// result, or the explicit no-items signal when every strategy fails.
    pub async fn scan(&self, text: &str) -> Result<ScanResult> {
        let mut result = match self.propose_items(text).await {
            Some(drafts) => self.parser.compose(text, drafts, StrategyKind::External),
            None => self.parser.parse(text)?,
        };

        if let Some(suggester) = &self.suggester {
            self.refine_categories(&mut result, suggester).await;
        }

        Ok(result)
    }

    /// Ask the pre-parse collaborator for an item list. `None` means "run
    /// the strategy chain instead": the collaborator is absent, errored,
    /// returned nothing, or returned only invalid items.
    async fn propose_items(&self, text: &str) -> Option<Vec<ItemDraft>> {
        let proposer = self.proposer.as_ref()?;
        let max_amount = self.parser.config().extraction.max_amount;

        match proposer.propose(text).await {
            Ok(proposed) if !proposed.is_empty() => {
                let total = proposed.len();
                let drafts: Vec<ItemDraft> = proposed
                    .into_iter()
                    .filter_map(|p| ItemDraft::new(&p.description, p.amount, 1, max_amount))
                    .collect();

                if drafts.is_empty() {
                    debug!(proposed = total, "all proposed items invalid, using strategy chain");
                    None
                } else {
                    debug!(accepted = drafts.len(), proposed = total, "using proposed item list");
                    Some(drafts)
                }
            }
            Ok(_) => {
                debug!("proposer returned an empty list, using strategy chain");
                None
            }
            Err(e) => {
                warn!(error = %e, "item proposer unavailable, using strategy chain");
                None
            }
        }
    }

    /// Re-classify items via the external collaborator with bounded fan-out.
    /// A failed or low-confidence suggestion leaves that item's keyword
    /// category untouched; other items are unaffected.
    async fn refine_categories(&self, result: &mut ScanResult, suggester: &Arc<dyn CategorySuggester>) {
        let config = self.parser.config();
        let vocabulary = config.category_vocabulary();
        let min_confidence = config.extraction.min_confidence;
        let fan_out = config.extraction.classification_fan_out.max(1);

        let requests = result.items.iter().map(|item| {
            let suggester = Arc::clone(suggester);
            let description = item.description.clone();
            let vocabulary = vocabulary.clone();
            async move { suggester.suggest(&description, &vocabulary).await }
        });

        let outcomes: Vec<_> = stream::iter(requests).buffered(fan_out).collect().await;

        for (item, outcome) in result.items.iter_mut().zip(outcomes) {
            match outcome {
                Ok(s) if s.confidence >= min_confidence && vocabulary.contains(&s.category) => {
                    item.category = s.category;
                }
                Ok(s) => {
                    debug!(
                        item = %item.description,
                        category = %s.category,
                        confidence = s.confidence,
                        "suggestion rejected, keeping keyword category"
                    );
                }
                Err(e) => {
                    warn!(
                        item = %item.description,
                        error = %e,
                        "category suggester failed, keeping keyword category"
                    );
                }
            }
        }
    }
}
