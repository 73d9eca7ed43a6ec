//! Keyword-routed semantic retrieval.
//!
//! A query is lowercased and matched against each collection's keyword set
//! in the order jobs, sessions, mentorship. The first matching collection is
//! searched; if it produces results they are returned as-is. Otherwise every
//! collection is probed for its single best record.

pub mod context;
mod result;

pub use context::format_context;
pub use result::{CombinedMatches, MatchData, MatchResult, MatchSource};

use crate::collection::{Collection, Corpus, Filter, Record};
use crate::config::Settings;
use crate::embedding::CachedEmbedder;
use crate::error::Result;
use crate::loader::DataLoader;
use crate::ranker::{ScoredRecord, SemanticRanker};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Default number of results from a keyword-routed collection.
pub const DEFAULT_TOP_K: usize = 3;

/// Results per collection in the combined fallback.
pub const FALLBACK_TOP_K: usize = 1;

/// Retrieval entry point. Stateless apart from the shared embedding cache.
#[derive(Clone)]
pub struct Retriever {
    loader: DataLoader,
    ranker: SemanticRanker,
    top_k: usize,
}

impl Retriever {
    /// Create a retriever over `loader` using a shared cached embedder.
    pub fn new(loader: DataLoader, embedder: Arc<CachedEmbedder>) -> Self {
        Self {
            loader,
            ranker: SemanticRanker::new(embedder),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Create a retriever from configuration.
    pub fn from_settings(settings: &Settings, embedder: Arc<CachedEmbedder>) -> Self {
        Self::new(DataLoader::from_settings(settings), embedder).with_top_k(settings.retrieval.top_k)
    }

    /// Set the number of results for a keyword-routed collection.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    pub fn embedder(&self) -> &Arc<CachedEmbedder> {
        self.ranker.embedder()
    }

    /// The first collection whose keywords occur in `query`, if any.
    pub fn route(query: &str) -> Option<Collection> {
        let normalized = query.to_lowercase();
        Collection::ALL
            .into_iter()
            .find(|c| c.matches_query(&normalized))
    }

    /// Load, filter, validate and rank one collection.
    ///
    /// `filter` is ignored for collections that do not support filtering.
    #[instrument(skip(self, query, filter))]
    pub async fn semantic_search(
        &self,
        query: &str,
        collection: Collection,
        top_k: usize,
        filter: Option<&Filter>,
    ) -> Result<Vec<ScoredRecord>> {
        let records = self.loader.load_filtered(collection, filter)?;
        let corpus = Corpus::build(collection, records);

        let results = self.ranker.rank_corpus(query, &corpus, top_k).await?;
        info!("Found {} matches for query in {}", results.len(), collection);
        Ok(results)
    }

    /// Route `query` and return matching records. Never fails: any error
    /// becomes the `error` result.
    #[instrument(skip(self, query, filter))]
    pub async fn retrieve(&self, query: &str, filter: Option<&Filter>) -> MatchResult {
        match self.try_retrieve(query, filter).await {
            Ok(result) => result,
            Err(e) => {
                error!("Retrieval failed: {}", e);
                MatchResult::error()
            }
        }
    }

    async fn try_retrieve(&self, query: &str, filter: Option<&Filter>) -> Result<MatchResult> {
        let query = query.to_lowercase();

        if let Some(collection) = Self::route(&query) {
            let results = self
                .semantic_search(&query, collection, self.top_k, filter)
                .await?;
            if !results.is_empty() {
                return Ok(MatchResult::from_collection(collection, into_records(results)));
            }
            info!("No {} results, falling back to combined search", collection);
        } else {
            info!("No specific source match found, returning combined results");
        }

        Ok(MatchResult::combined(self.combined(&query, filter).await?))
    }

    async fn combined(&self, query: &str, filter: Option<&Filter>) -> Result<CombinedMatches> {
        let top_k = FALLBACK_TOP_K;
        let (jobs, sessions, mentorship) = futures::try_join!(
            self.semantic_search(query, Collection::Jobs, top_k, filter),
            self.semantic_search(query, Collection::Sessions, top_k, filter),
            self.semantic_search(query, Collection::Mentorship, top_k, filter),
        )?;

        Ok(CombinedMatches {
            jobs: into_records(jobs),
            sessions: into_records(sessions),
            mentorship: into_records(mentorship),
        })
    }
}

fn into_records(results: Vec<ScoredRecord>) -> Vec<Record> {
    results.into_iter().map(|r| r.record).collect()
}
