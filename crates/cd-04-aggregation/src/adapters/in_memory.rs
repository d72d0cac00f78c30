//! In-memory record store
//!
//! Holds records as JSON documents grouped by collection. Relations are
//! nested documents (an individual's `biosamples`, a biosample's
//! `experiment`), so a path is resolved by walking objects and flattening
//! arrays. Used by tests and by the admin tool's fixture runs.

use async_trait::async_trait;
use cd_03_field_registry::FieldPath;
use serde_json::Value;
use shared_types::Collection;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::{Condition, Groups, Predicate};
use crate::error::StorageError;
use crate::ports::RecordStore;

/// Record store backed by JSON documents in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    collections: HashMap<Collection, Vec<Value>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, collection: Collection, records: Vec<Value>) -> Self {
        self.collections.entry(collection).or_default().extend(records);
        self
    }

    /// Build from a fixture object such as
    /// `{"individual": [...], "biosample": [...], "experiment": [...]}`.
    pub fn from_fixture(fixture: Value) -> Result<Self, StorageError> {
        let Value::Object(map) = fixture else {
            return Err(StorageError::Fixture("expected an object keyed by collection".into()));
        };

        map.into_iter().try_fold(Self::new(), |store, (name, records)| {
            let collection: Collection = name
                .parse()
                .map_err(|e| StorageError::Fixture(format!("{}", e)))?;
            match records {
                Value::Array(records) => Ok(store.with_records(collection, records)),
                _ => Err(StorageError::Fixture(format!("`{}` must be an array", name))),
            }
        })
    }

    fn records(&self, collection: Collection) -> &[Value] {
        self.collections
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Non-null leaf values at `segments`, flattening arrays on the way.
fn values_at<'a>(value: &'a Value, segments: &[String]) -> Vec<&'a Value> {
    match (value, segments.split_first()) {
        (Value::Null, _) => Vec::new(),
        (Value::Array(items), _) => items.iter().flat_map(|item| values_at(item, segments)).collect(),
        (_, None) => vec![value],
        (Value::Object(map), Some((head, rest))) => map
            .get(head)
            .map(|next| values_at(next, rest))
            .unwrap_or_default(),
        (_, Some(_)) => Vec::new(),
    }
}

fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn in_range(value: &Value, floor: Option<i64>, ceil: Option<i64>) -> bool {
    value.as_f64().map_or(false, |v| {
        floor.map_or(true, |f| v >= f as f64) && ceil.map_or(true, |c| v < c as f64)
    })
}

fn satisfies(value: &Value, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::EqualsIgnoreCase(expected) => as_label(value)
            .map_or(false, |actual| actual.to_lowercase() == expected.to_lowercase()),
        Predicate::InRange { floor, ceil } => in_range(value, *floor, *ceil),
        Predicate::StartsWith(prefix) => value.as_str().map_or(false, |s| s.starts_with(prefix.as_str())),
    }
}

/// Count each distinct key once per record; records without keys are `None`.
fn group<F>(records: &[Value], segments: &[String], key: F) -> Groups
where
    F: Fn(&Value) -> Option<String>,
{
    let mut counts: BTreeMap<Option<String>, u64> = BTreeMap::new();
    for record in records {
        let keys: BTreeSet<String> = values_at(record, segments).into_iter().filter_map(&key).collect();
        if keys.is_empty() {
            *counts.entry(None).or_insert(0) += 1;
        }
        for k in keys {
            *counts.entry(Some(k)).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn group_count(&self, path: &FieldPath) -> Result<Groups, StorageError> {
        Ok(group(self.records(path.collection), &path.segments, as_label))
    }

    async fn count_in_range(
        &self,
        path: &FieldPath,
        floor: Option<i64>,
        ceil: Option<i64>,
    ) -> Result<u64, StorageError> {
        let count = self
            .records(path.collection)
            .iter()
            .filter(|r| values_at(r, &path.segments).into_iter().any(|v| in_range(v, floor, ceil)))
            .count();
        Ok(count as u64)
    }

    async fn count_records(&self, collection: Collection) -> Result<u64, StorageError> {
        Ok(self.records(collection).len() as u64)
    }

    async fn group_count_by_prefix(&self, path: &FieldPath, len: usize) -> Result<Groups, StorageError> {
        Ok(group(self.records(path.collection), &path.segments, |v| {
            v.as_str().map(|s| s.chars().take(len).collect())
        }))
    }

    async fn distinct_bounds(&self, path: &FieldPath) -> Result<Option<(String, String)>, StorageError> {
        let values: BTreeSet<&str> = self
            .records(path.collection)
            .iter()
            .flat_map(|r| values_at(r, &path.segments))
            .filter_map(Value::as_str)
            .collect();

        Ok(values
            .first()
            .zip(values.last())
            .map(|(first, last)| (first.to_string(), last.to_string())))
    }

    async fn count_matching(
        &self,
        collection: Collection,
        conditions: &[Condition],
    ) -> Result<u64, StorageError> {
        if let Some(foreign) = conditions.iter().find(|c| c.path.collection != collection) {
            return Err(StorageError::Query(format!(
                "condition on `{}` cannot filter {} records",
                foreign.path, collection
            )));
        }

        let count = self
            .records(collection)
            .iter()
            .filter(|record| {
                conditions.iter().all(|c| {
                    values_at(record, &c.path.segments)
                        .into_iter()
                        .any(|v| satisfies(v, &c.predicate))
                })
            })
            .count();
        Ok(count as u64)
    }
}
