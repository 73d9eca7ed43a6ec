//! Asha - keyword-routed semantic retrieval
//!
//! Routes a free-text query to the most relevant of three record collections
//! (job postings, professional-development sessions, mentorship programs)
//! and returns embedding-ranked matches.
//!
//! # Architecture
//!
//! - `collection` - The closed set of collections, records, validation and descriptors
//! - `loader` - Reading collections from disk and field filtering
//! - `embedding` - Embedding generation and the process-wide embedding cache
//! - `ranker` - Inner-product similarity ranking
//! - `retrieval` - Keyword routing, combined fallback and the result envelope
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use asha::config::Settings;
//! use asha::embedding::{create_embedder, CachedEmbedder};
//! use asha::retrieval::Retriever;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let embedder = Arc::new(CachedEmbedder::new(create_embedder(&settings.embedding)?));
//!     let retriever = Retriever::from_settings(&settings, embedder);
//!
//!     let result = retriever.retrieve("I need a job in tech", None).await;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod collection;
pub mod config;
pub mod embedding;
pub mod error;
pub mod loader;
pub mod openai;
pub mod ranker;
pub mod retrieval;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{AshaError, Result};
