//! Retrieve command implementation.

use super::{build_retriever, to_filter};
use crate::cli::preflight;
use crate::cli::Output;
use crate::collection::Collection;
use crate::config::Settings;
use crate::retrieval::{format_context, MatchData, MatchSource};
use anyhow::Result;

/// Run the retrieve command.
pub async fn run_retrieve(
    query: &str,
    filter: &[(String, String)],
    json: bool,
    context: bool,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'asha doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let retriever = build_retriever(&settings)?;
    let filter = to_filter(filter);

    let spinner = Output::spinner("Searching...");
    let result = retriever.retrieve(query, filter.as_ref()).await;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if context {
        match format_context(&result) {
            Some(text) => println!("{}", text),
            None => Output::warning("No grounding context available for this query."),
        }
        return Ok(());
    }

    match (&result.source, &result.data) {
        (MatchSource::Error, _) => {
            Output::error("Retrieval failed. Run with -v for details.");
        }
        (MatchSource::Combined, MatchData::Combined(matches)) => {
            Output::info("No confident keyword match; showing the best result per collection");
            for collection in Collection::ALL {
                Output::header(collection.as_str());
                let records = matches.get(collection);
                if records.is_empty() {
                    Output::kv("results", "none");
                }
                for record in records {
                    Output::record(collection, record, None);
                }
            }
        }
        (source, MatchData::Records(records)) => {
            let collection = source
                .collection()
                .ok_or_else(|| anyhow::anyhow!("unexpected record list for source {}", source))?;
            Output::success(&format!("Found {} {} results", records.len(), collection));
            for record in records {
                Output::record(collection, record, None);
            }
        }
        (source, MatchData::Combined(_)) => {
            anyhow::bail!("unexpected combined data for source {}", source);
        }
    }

    Ok(())
}
