//! Record collections known to the retrieval pipeline.
//!
//! Each [`Collection`] carries everything that differs between the three
//! sources: its routing keywords, filter support, descriptor template and
//! validation rules.

mod corpus;
mod validate;

pub use corpus::Corpus;
pub use validate::is_valid;

use crate::error::AshaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single source record: field name to scalar value, in file order.
pub type Record = serde_json::Map<String, Value>;

/// Field-equality predicate applied before ranking.
///
/// A record matches when, for every key, its value case-insensitively
/// equals the filter value.
pub type Filter = BTreeMap<String, String>;

/// The closed set of record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Job postings (tabular source).
    Jobs,
    /// Professional-development sessions (JSON array).
    Sessions,
    /// Mentorship programs (JSON array).
    Mentorship,
}

const JOB_KEYWORDS: &[&str] = &["job", "career", "position", "work", "employment", "hiring"];
const SESSION_KEYWORDS: &[&str] = &["session", "workshop", "training", "event", "webinar"];
const MENTORSHIP_KEYWORDS: &[&str] = &["mentor", "guidance", "program", "coaching", "advice"];

impl Collection {
    /// All collections in routing order.
    pub const ALL: [Collection; 3] = [Collection::Jobs, Collection::Sessions, Collection::Mentorship];

    /// Stable lowercase name used in results and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Jobs => "jobs",
            Collection::Sessions => "sessions",
            Collection::Mentorship => "mentorship",
        }
    }

    /// Keywords that route a query to this collection.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Collection::Jobs => JOB_KEYWORDS,
            Collection::Sessions => SESSION_KEYWORDS,
            Collection::Mentorship => MENTORSHIP_KEYWORDS,
        }
    }

    /// Whether any keyword occurs as a substring of an already-lowercased query.
    pub fn matches_query(&self, normalized_query: &str) -> bool {
        self.keywords().iter().any(|k| normalized_query.contains(k))
    }

    /// Sessions are never filtered.
    pub fn supports_filter(&self) -> bool {
        match self {
            Collection::Jobs | Collection::Mentorship => true,
            Collection::Sessions => false,
        }
    }

    /// Fields that must be present and non-empty for a record to be usable.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Jobs => &[
                "job_title",
                "company",
                "location",
                "industry",
                "posted_date",
                "apply_link",
            ],
            Collection::Sessions | Collection::Mentorship => &["title", "description"],
        }
    }

    /// Build the descriptor string that gets embedded for a record.
    ///
    /// Only meaningful for records that passed [`is_valid`].
    pub fn describe(&self, record: &Record) -> String {
        let f = |key: &str| field_text(record, key).unwrap_or_default();
        match self {
            Collection::Jobs => format!(
                "{} at {} in {} ({})",
                f("job_title"),
                f("company"),
                f("location"),
                f("industry")
            ),
            Collection::Sessions | Collection::Mentorship => {
                format!("{} - {}", f("title"), f("description"))
            }
        }
    }
}

impl std::str::FromStr for Collection {
    type Err = AshaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jobs" => Ok(Collection::Jobs),
            "sessions" => Ok(Collection::Sessions),
            "mentorship" => Ok(Collection::Mentorship),
            _ => Err(AshaError::UnknownSource(s.to_string())),
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render a scalar field as text. Nulls and missing fields yield `None`.
pub fn field_text(record: &Record, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
