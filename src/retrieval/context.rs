//! Rendering match results as grounding text for a chat prompt.

use super::{MatchData, MatchResult};
use crate::collection::{field_text, Collection, Record};

/// Format a match result as prompt context.
///
/// Returns `None` for the `error` result or when nothing matched, meaning the
/// caller has no grounding context and should answer generically.
pub fn format_context(result: &MatchResult) -> Option<String> {
    if result.is_error() || result.is_empty() {
        return None;
    }

    let text = match &result.data {
        MatchData::Records(records) => {
            let collection = result.source.collection()?;
            format_section(collection, records)
        }
        MatchData::Combined(matches) => Collection::ALL
            .into_iter()
            .filter(|c| !matches.get(*c).is_empty())
            .map(|c| format_section(c, matches.get(c)))
            .collect::<Vec<_>>()
            .join("\n\n"),
    };

    Some(text)
}

fn format_section(collection: Collection, records: &[Record]) -> String {
    let heading = match collection {
        Collection::Jobs => "Here are some job opportunities that might interest you:",
        Collection::Sessions => "Upcoming sessions:",
        Collection::Mentorship => "Mentorship programs:",
    };

    let items: Vec<String> = records.iter().map(|r| format_record(collection, r)).collect();
    format!("{}\n\n{}", heading, items.join("\n\n"))
}

/// One record as a prose line.
pub fn format_record(collection: Collection, record: &Record) -> String {
    let f = |key: &str| field_text(record, key).unwrap_or_default();
    match collection {
        Collection::Jobs => format!(
            "I found a {} position at {} in {}. It's in the {} industry and was posted on {}. You can apply at: {}",
            f("job_title"),
            f("company"),
            f("location"),
            f("industry"),
            f("posted_date"),
            f("apply_link")
        ),
        Collection::Sessions | Collection::Mentorship => {
            format!("{} - {}", f("title"), f("description"))
        }
    }
}
