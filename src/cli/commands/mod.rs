//! CLI command implementations.

mod config;
mod doctor;
mod retrieve;
mod search;
mod serve;

pub use config::run_config;
pub use doctor::run_doctor;
pub use retrieve::run_retrieve;
pub use search::run_search;
pub use serve::run_serve;

use crate::collection::Filter;
use crate::config::Settings;
use crate::embedding::{create_embedder, CachedEmbedder};
use crate::retrieval::Retriever;
use std::sync::Arc;

/// Build a retriever with a fresh process-wide embedding cache.
pub(crate) fn build_retriever(settings: &Settings) -> anyhow::Result<Retriever> {
    let embedder = Arc::new(CachedEmbedder::new(create_embedder(&settings.embedding)?));
    Ok(Retriever::from_settings(settings, embedder))
}

/// Collect `key=value` pairs into a filter, `None` when empty.
pub(crate) fn to_filter(pairs: &[(String, String)]) -> Option<Filter> {
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.iter().cloned().collect())
    }
}
