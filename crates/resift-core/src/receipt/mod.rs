//! Receipt line-item extraction module.

pub mod classify;
pub mod filter;
pub mod lines;
mod parser;
mod pipeline;
pub mod rules;
pub mod strategies;

pub use parser::{ReceiptParser, StrategyChainParser};
pub use pipeline::ScanPipeline;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
