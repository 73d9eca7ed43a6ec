//! Valid records paired with their descriptors.

use super::{is_valid, Collection, Record};
use tracing::debug;

/// The rankable view of a collection.
///
/// `descriptors[i]` is always built from `records[i]`; both vectors are
/// only ever produced together here.
#[derive(Debug, Clone)]
pub struct Corpus {
    collection: Collection,
    records: Vec<Record>,
    descriptors: Vec<String>,
}

impl Corpus {
    /// Drop invalid records and describe the rest.
    pub fn build(collection: Collection, records: Vec<Record>) -> Self {
        let total = records.len();
        let records: Vec<Record> = records
            .into_iter()
            .filter(|r| is_valid(r, collection))
            .collect();
        let descriptors = records.iter().map(|r| collection.describe(r)).collect();

        if records.len() < total {
            debug!("Skipped {} invalid {} records", total - records.len(), collection);
        }

        Self {
            collection,
            records,
            descriptors,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn descriptors(&self) -> &[String] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
