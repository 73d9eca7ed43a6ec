//! The `{source, data}` envelope returned by retrieval.

use crate::collection::{Collection, Record};
use serde::{Deserialize, Serialize};

/// Where a match result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Jobs,
    Sessions,
    Mentorship,
    Combined,
    Error,
}

impl From<Collection> for MatchSource {
    fn from(collection: Collection) -> Self {
        match collection {
            Collection::Jobs => MatchSource::Jobs,
            Collection::Sessions => MatchSource::Sessions,
            Collection::Mentorship => MatchSource::Mentorship,
        }
    }
}

impl MatchSource {
    /// The collection a single-collection source refers to.
    pub fn collection(&self) -> Option<Collection> {
        match self {
            MatchSource::Jobs => Some(Collection::Jobs),
            MatchSource::Sessions => Some(Collection::Sessions),
            MatchSource::Mentorship => Some(Collection::Mentorship),
            MatchSource::Combined | MatchSource::Error => None,
        }
    }
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchSource::Jobs => "jobs",
            MatchSource::Sessions => "sessions",
            MatchSource::Mentorship => "mentorship",
            MatchSource::Combined => "combined",
            MatchSource::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// Per-collection results of the combined fallback probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedMatches {
    pub jobs: Vec<Record>,
    pub sessions: Vec<Record>,
    pub mentorship: Vec<Record>,
}

impl CombinedMatches {
    /// Results for one collection.
    pub fn get(&self, collection: Collection) -> &[Record] {
        match collection {
            Collection::Jobs => &self.jobs,
            Collection::Sessions => &self.sessions,
            Collection::Mentorship => &self.mentorship,
        }
    }

    /// True when no collection produced a match.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty() && self.sessions.is_empty() && self.mentorship.is_empty()
    }
}

/// Payload of a [`MatchResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchData {
    Records(Vec<Record>),
    Combined(CombinedMatches),
}

/// Retrieval outcome: `{"source": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub source: MatchSource,
    pub data: MatchData,
}

impl MatchResult {
    /// Results from a single keyword-routed collection.
    pub fn from_collection(collection: Collection, records: Vec<Record>) -> Self {
        Self {
            source: collection.into(),
            data: MatchData::Records(records),
        }
    }

    /// Results from the combined fallback.
    pub fn combined(matches: CombinedMatches) -> Self {
        Self {
            source: MatchSource::Combined,
            data: MatchData::Combined(matches),
        }
    }

    /// The failure envelope; carries no data.
    pub fn error() -> Self {
        Self {
            source: MatchSource::Error,
            data: MatchData::Records(Vec::new()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.source == MatchSource::Error
    }

    /// Records of a single-collection result.
    pub fn records(&self) -> Option<&[Record]> {
        match &self.data {
            MatchData::Records(records) => Some(records),
            MatchData::Combined(_) => None,
        }
    }

    /// Per-collection results of a combined result.
    pub fn combined_matches(&self) -> Option<&CombinedMatches> {
        match &self.data {
            MatchData::Combined(matches) => Some(matches),
            MatchData::Records(_) => None,
        }
    }

    /// Total number of records carried.
    pub fn len(&self) -> usize {
        match &self.data {
            MatchData::Records(records) => records.len(),
            MatchData::Combined(m) => m.jobs.len() + m.sessions.len() + m.mentorship.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
