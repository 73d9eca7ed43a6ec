//! Data loading for the three record collections.
//!
//! Jobs come from a CSV file with a header row; sessions and mentorship
//! programs come from JSON arrays of objects. Files are re-read on every call.

use crate::collection::{field_text, Collection, Filter, Record};
use crate::config::Settings;
use crate::error::{AshaError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default file name for job listings.
pub const DEFAULT_JOBS_FILE: &str = "job_listing_data.csv";
/// Default file name for sessions.
pub const DEFAULT_SESSIONS_FILE: &str = "session_details.json";
/// Default file name for mentorship programs.
pub const DEFAULT_MENTORSHIP_FILE: &str = "mentorship_programs.json";

/// Reads collections from a data directory.
#[derive(Debug, Clone)]
pub struct DataLoader {
    data_dir: PathBuf,
    jobs_file: String,
    sessions_file: String,
    mentorship_file: String,
}

impl DataLoader {
    /// Create a loader over `data_dir` using the default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            jobs_file: DEFAULT_JOBS_FILE.to_string(),
            sessions_file: DEFAULT_SESSIONS_FILE.to_string(),
            mentorship_file: DEFAULT_MENTORSHIP_FILE.to_string(),
        }
    }

    /// Create a loader from configured paths.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            data_dir: settings.data_dir(),
            jobs_file: settings.data.jobs_file.clone(),
            sessions_file: settings.data.sessions_file.clone(),
            mentorship_file: settings.data.mentorship_file.clone(),
        }
    }

    /// The directory files are read from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the backing file for a collection.
    pub fn path_for(&self, collection: Collection) -> PathBuf {
        let file = match collection {
            Collection::Jobs => &self.jobs_file,
            Collection::Sessions => &self.sessions_file,
            Collection::Mentorship => &self.mentorship_file,
        };
        self.data_dir.join(file)
    }

    /// Read a collection, reporting a missing file as `SourceUnavailable`.
    pub fn read(&self, collection: Collection) -> Result<Vec<Record>> {
        let path = self.path_for(collection);
        if !path.exists() {
            return Err(AshaError::SourceUnavailable {
                collection: collection.to_string(),
                path: path.display().to_string(),
            });
        }

        let records = match collection {
            Collection::Jobs => read_csv_records(&path)?,
            Collection::Sessions | Collection::Mentorship => read_json_records(&path)?,
        };

        debug!("Loaded {} {} records from {:?}", records.len(), collection, path);
        Ok(records)
    }

    /// Load a collection. A missing file degrades to an empty collection.
    pub fn load(&self, collection: Collection) -> Result<Vec<Record>> {
        match self.read(collection) {
            Err(e @ AshaError::SourceUnavailable { .. }) => {
                warn!("{}", e);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Load a collection and apply `filter` if the collection supports filtering.
    pub fn load_filtered(&self, collection: Collection, filter: Option<&Filter>) -> Result<Vec<Record>> {
        let records = self.load(collection)?;
        match filter {
            Some(f) if collection.supports_filter() => Ok(filter_records(records, f)),
            _ => Ok(records),
        }
    }
}

/// Keep the records that match every entry of `filter`. An empty filter keeps everything.
pub fn filter_records(records: Vec<Record>, filter: &Filter) -> Vec<Record> {
    if filter.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| matches_filter(r, filter))
        .collect()
}

/// Case-insensitive field equality against every filter entry.
///
/// A missing field compares as the empty string, so it never matches a
/// non-empty filter value.
pub fn matches_filter(record: &Record, filter: &Filter) -> bool {
    filter.iter().all(|(key, expected)| {
        let actual = field_text(record, key).unwrap_or_default();
        actual.to_lowercase() == expected.to_lowercase()
    })
}

fn read_csv_records(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
            .collect();
        records.push(record);
    }

    Ok(records)
}

fn read_json_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;

    let Value::Array(items) = value else {
        return Err(AshaError::DataFormat(format!(
            "{} must contain a JSON array of objects",
            path.display()
        )));
    };

    // Non-object entries can never validate, drop them here
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect())
}
