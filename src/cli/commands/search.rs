//! Search command implementation.

use super::{build_retriever, to_filter};
use crate::cli::preflight;
use crate::cli::Output;
use crate::collection::Collection;
use crate::config::Settings;
use anyhow::Result;

/// Run the search command against a single named collection.
pub async fn run_search(
    query: &str,
    source: &str,
    limit: usize,
    filter: &[(String, String)],
    settings: Settings,
) -> Result<()> {
    // An unknown collection name is a caller error, fail before any work
    let collection: Collection = source.parse()?;

    preflight::check(&settings)?;

    let retriever = build_retriever(&settings)?;
    let filter = to_filter(filter);

    let spinner = Output::spinner("Searching...");
    let results = retriever
        .semantic_search(&query.to_lowercase(), collection, limit, filter.as_ref())
        .await;
    spinner.finish_and_clear();

    match results {
        Ok(results) => {
            if results.is_empty() {
                Output::warning("No results found matching your query.");
            } else {
                Output::success(&format!("Found {} results", results.len()));
                for result in &results {
                    Output::record(collection, &result.record, Some(result.score));
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
