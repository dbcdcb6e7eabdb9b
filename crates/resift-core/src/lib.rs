//! Core library for receipt scanning.
//!
//! This crate turns noisy OCR text from a photographed receipt into a
//! structured list of line items plus a merchant name and transaction date:
//! - line segmentation and skip-line filtering
//! - a fixed-priority chain of extraction strategies that degrades
//!   gracefully down to a single total-amount item
//! - keyword-based category classification
//! - optional AI collaborators (pre-parse, per-item classification) that
//!   fall back to the deterministic pipeline when unavailable

pub mod collab;
pub mod error;
pub mod models;
pub mod receipt;

pub use collab::{CategorySuggester, CategorySuggestion, ItemProposer, ProposedItem};
pub use error::{CollabError, ExtractionError, Result, ScanError};
pub use models::config::{CategoryRule, ExtractionConfig, ScanConfig, SkipConfig};
pub use models::receipt::{LineItem, ScanResult, StrategyAttempt, StrategyKind};
pub use receipt::{ReceiptParser, ScanPipeline, StrategyChainParser};
