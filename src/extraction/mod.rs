//! Structured extraction of business data from page content.

mod llm;

pub use llm::LlmExtractor;

use crate::error::Result;
use crate::record::ExtractedRecord;
use async_trait::async_trait;

/// Trait for turning page content into a business record.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract a record from markdown content.
    ///
    /// Returns `Ok(None)` when the content yields nothing usable.
    async fn extract(&self, content: &str) -> Result<Option<ExtractedRecord>>;
}
