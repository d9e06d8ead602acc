//! In-process document store backing the record service.
//!
//! Collections keep documents in insertion order and expose the four
//! operations the service consumes: insert, find-by-key, save (upsert) and
//! query-by-example. Single-document reads and writes are atomic; nothing
//! beyond that is guaranteed across concurrent requests.

use std::sync::Arc;

use entity::{Compensation, Employee};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

/// Shared store handle threaded through the service.
pub type StoreHandle = Arc<RecordStore>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize document for matching")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed document. Keys are not required to be unique within a collection;
/// keyed lookups return the earliest match.
pub trait Document: Clone + Send + Sync {
    fn key(&self) -> &str;
}

impl Document for Employee {
    fn key(&self) -> &str {
        &self.employee_id
    }
}

impl Document for Compensation {
    fn key(&self) -> &str {
        &self.employee.employee_id
    }
}

/// Ordered document collection.
#[derive(Debug)]
pub struct Collection<T> {
    docs: RwLock<Vec<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Document> Collection<T> {
    /// Appends a document. Duplicate keys are permitted.
    pub async fn insert(&self, doc: T) {
        self.docs.write().await.push(doc);
    }

    pub async fn find_by_key(&self, key: &str) -> Option<T> {
        self.docs
            .read()
            .await
            .iter()
            .find(|doc| doc.key() == key)
            .cloned()
    }

    /// Full-replacement upsert: swaps the first document with the same key,
    /// appends when none exists.
    pub async fn save(&self, doc: T) {
        let mut docs = self.docs.write().await;
        match docs.iter_mut().find(|existing| existing.key() == doc.key()) {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
    }
}

impl<T: Document + Serialize> Collection<T> {
    /// Query by example: keeps documents of which `example` is a recursive
    /// subset. Nested objects match field-wise; leaves match by equality.
    pub async fn find_matching(&self, example: &Value) -> StoreResult<Vec<T>> {
        let docs = self.docs.read().await;
        let mut matches = Vec::new();
        for doc in docs.iter() {
            if matches_example(&serde_json::to_value(doc)?, example) {
                matches.push(doc.clone());
            }
        }
        Ok(matches)
    }
}

fn matches_example(doc: &Value, example: &Value) -> bool {
    match (doc, example) {
        (Value::Object(fields), Value::Object(expected)) => {
            expected.iter().all(|(name, value)| {
                fields
                    .get(name)
                    .is_some_and(|actual| matches_example(actual, value))
            })
        }
        (actual, expected) => actual == expected,
    }
}

/// The two record collections the service operates on.
#[derive(Debug, Default)]
pub struct RecordStore {
    pub employees: Collection<Employee>,
    pub compensations: Collection<Compensation>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}
