//! # Document store vocabulary
//!
//! Value types shared by `DocumentStore` implementations and their callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored record. `id` is assigned by the store and is not part of `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            order_by: None,
            limit: None,
        }
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A single-field write applied by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    Set(Value),
    /// Append each value not already present, keeping existing order
    ArrayUnion(Vec<Value>),
    /// Remove every element equal to one of the values
    ArrayRemove(Vec<Value>),
    /// The store's own clock at write time
    ServerTimestamp,
}

/// A field path paired with the write to apply to it.
pub type FieldWrite = (String, FieldOp);

pub fn set(field: &str, value: impl Into<Value>) -> FieldWrite {
    (field.to_string(), FieldOp::Set(value.into()))
}

pub fn array_union(field: &str, value: impl Into<Value>) -> FieldWrite {
    (field.to_string(), FieldOp::ArrayUnion(vec![value.into()]))
}

pub fn array_remove(field: &str, value: impl Into<Value>) -> FieldWrite {
    (field.to_string(), FieldOp::ArrayRemove(vec![value.into()]))
}

pub fn server_timestamp(field: &str) -> FieldWrite {
    (field.to_string(), FieldOp::ServerTimestamp)
}
