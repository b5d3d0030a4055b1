//! In-process `DocumentStore`. Also the working set behind `JsonDocumentStore`.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use dashmap::DashMap;
use gf_core::document::{Direction, Document, FieldOp, FieldWrite, Query};
use gf_core::error::{FeedError, Result};
use gf_core::traits::DocumentStore;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Collections of documents kept in insertion order. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<DashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents of `collection`.
    pub fn load(&self, collection: &str, documents: Vec<Document>) {
        self.collections.insert(collection.to_string(), documents);
    }

    pub fn snapshot(&self, collection: &str) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| docs.value().clone())
            .unwrap_or_default()
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query(&self, query: &Query) -> Result<Vec<Document>> {
        let mut docs = self.snapshot(&query.collection);

        if let Some((field, direction)) = &query.order_by {
            docs.sort_by(|a, b| {
                let ord = compare_fields(a.fields.get(field), b.fields.get(field));
                match direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }
        Ok(docs)
    }

    async fn add_document(&self, collection: &str, writes: Vec<FieldWrite>) -> Result<String> {
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        Ok(insert_document(&mut docs, writes))
    }

    async fn update_document(&self, collection: &str, id: &str, writes: Vec<FieldWrite>) -> Result<()> {
        let mut docs = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| FeedError::NotFound(collection.to_string(), id.to_string()))?;
        update_document_in(&mut docs, collection, id, writes)
    }
}

/// Appends a new document built from `writes` and returns its id.
pub(crate) fn insert_document(docs: &mut Vec<Document>, writes: Vec<FieldWrite>) -> String {
    let mut fields = Map::new();
    apply_writes(&mut fields, writes);

    let id = Uuid::now_v7().to_string();
    docs.push(Document {
        id: id.clone(),
        fields,
    });
    id
}

pub(crate) fn update_document_in(
    docs: &mut [Document],
    collection: &str,
    id: &str,
    writes: Vec<FieldWrite>,
) -> Result<()> {
    let doc = docs
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(|| FeedError::NotFound(collection.to_string(), id.to_string()))?;
    apply_writes(&mut doc.fields, writes);
    Ok(())
}

/// Timestamps are written as RFC 3339 UTC strings with fixed microsecond precision.
fn server_timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Applies one batch of writes. Every `ServerTimestamp` in a batch gets the same instant.
fn apply_writes(fields: &mut Map<String, Value>, writes: Vec<FieldWrite>) {
    let now = server_timestamp();

    for (path, op) in writes {
        match op {
            FieldOp::Set(value) => {
                fields.insert(path, value);
            }
            FieldOp::ServerTimestamp => {
                fields.insert(path, now.clone());
            }
            FieldOp::ArrayUnion(values) => {
                let slot = fields.entry(path).or_insert_with(|| Value::Array(Vec::new()));
                if !slot.is_array() {
                    *slot = Value::Array(Vec::new());
                }
                if let Value::Array(items) = slot {
                    for value in values {
                        if !items.contains(&value) {
                            items.push(value);
                        }
                    }
                }
            }
            FieldOp::ArrayRemove(values) => match fields.get_mut(&path) {
                Some(Value::Array(items)) => items.retain(|item| !values.contains(item)),
                _ => {
                    fields.insert(path, Value::Array(Vec::new()));
                }
            },
        }
    }
}

/// Orders missing fields first, then numbers, timestamps and strings by value.
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or_default(), y.as_f64().unwrap_or_default());
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => {
            match (
                DateTime::parse_from_rfc3339(x),
                DateTime::parse_from_rfc3339(y),
            ) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
