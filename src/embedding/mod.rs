//! Embedding generation and caching for semantic ranking.

mod cache;
mod openai;

pub use cache::{content_key, CacheStats, CachedEmbedder, EmbeddingCache};
pub use openai::{OpenAIEmbedder, DEFAULT_DIMENSIONS, DEFAULT_MODEL};

use crate::config::EmbeddingSettings;
use crate::error::{AshaError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for embedding generation.
///
/// Implementations are pinned to a single model so that cached and freshly
/// computed vectors stay comparable.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Identifier of the model producing the vectors.
    fn model(&self) -> &str;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}

/// Build the configured embedder.
pub fn create_embedder(settings: &EmbeddingSettings) -> Result<Arc<dyn Embedder>> {
    match settings.provider.to_lowercase().as_str() {
        "openai" => Ok(Arc::new(OpenAIEmbedder::with_config(
            &settings.model,
            settings.dimensions as usize,
        )?)),
        other => Err(AshaError::Config(format!(
            "Unknown embedding provider: {}",
            other
        ))),
    }
}
