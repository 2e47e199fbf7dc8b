//! In-memory [`DocumentStore`] used by the unit and HTTP tests.
//!
//! Understands the subset of MongoDB the services emit: top-level equality,
//! `$in`, and the `$match`/`$group`/`$project` stages of the funding total.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::Mutex;

use super::{Collection, DocumentStore, FindOptions, UpdateOutcome};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
    unique_fields: HashMap<Collection, Vec<&'static str>>,
    fail_ping: bool,
}

impl MemoryStore {
    /// Store with the same unique indexes as production.
    pub fn new() -> Self {
        let mut unique_fields = HashMap::new();
        unique_fields.insert(Collection::Users, vec!["email"]);
        Self {
            unique_fields,
            ..Default::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail_ping: true,
            ..Self::new()
        }
    }

    /// Inserts documents directly, assigning ids where missing.
    pub fn seed(&self, collection: Collection, docs: Vec<Document>) -> Vec<ObjectId> {
        let mut collections = self.collections.lock().unwrap();
        let stored = collections.entry(collection).or_default();
        docs.into_iter()
            .map(|mut doc| {
                let id = ensure_id(&mut doc);
                stored.push(doc);
                id
            })
            .collect()
    }

    pub fn all(&self, collection: Collection) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }
}

fn ensure_id(doc: &mut Document) -> ObjectId {
    match doc.get_object_id("_id") {
        Ok(id) => id,
        Err(_) => {
            let id = ObjectId::new();
            doc.insert("_id", id);
            id
        }
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| {
        let actual = doc.get(key);
        match expected {
            Bson::Document(op) if op.keys().any(|k| k.starts_with('$')) => {
                op.iter().all(|(operator, operand)| match (operator.as_str(), operand) {
                    ("$in", Bson::Array(values)) => {
                        actual.map(|v| values.contains(v)).unwrap_or(false)
                    }
                    ("$ne", value) => actual != Some(value),
                    _ => false,
                })
            }
            _ => actual == Some(expected),
        }
    })
}

/// `$sum` over one field. Integer inputs stay integral, like the server:
/// Int32 while it fits, then Int64; any Double turns the total into a Double.
fn sum_field(docs: &[Document], field: &str) -> Bson {
    let mut int_total: i64 = 0;
    let mut float_total: f64 = 0.0;
    let mut saw_double = false;
    let mut saw_int64 = false;

    for value in docs.iter().filter_map(|d| d.get(field)) {
        match value {
            Bson::Int32(v) => int_total += i64::from(*v),
            Bson::Int64(v) => {
                saw_int64 = true;
                int_total += *v;
            }
            Bson::Double(v) => {
                saw_double = true;
                float_total += *v;
            }
            _ => {}
        }
    }

    if saw_double {
        Bson::Double(float_total + int_total as f64)
    } else if saw_int64 {
        Bson::Int64(int_total)
    } else {
        match i32::try_from(int_total) {
            Ok(v) => Bson::Int32(v),
            Err(_) => Bson::Int64(int_total),
        }
    }
}

/// `$group` with `_id: null` and `$sum: "$field"` accumulators.
fn group_all(docs: &[Document], fields: &Document) -> Vec<Document> {
    if docs.is_empty() {
        return Vec::new();
    }

    let mut out = Document::new();
    out.insert("_id", Bson::Null);
    for (name, accumulator) in fields.iter().filter(|(k, _)| k.as_str() != "_id") {
        if let Bson::Document(acc) = accumulator {
            if let Ok(path) = acc.get_str("$sum") {
                let field = path.trim_start_matches('$');
                out.insert(name.clone(), sum_field(docs, field));
            }
        }
    }
    vec![out]
}

fn project(doc: Document, fields: &Document) -> Document {
    let included = |key: &str| match fields.get(key) {
        Some(Bson::Int32(v)) => *v != 0,
        Some(Bson::Int64(v)) => *v != 0,
        Some(Bson::Boolean(v)) => *v,
        Some(_) => true,
        None => key == "_id",
    };
    doc.into_iter().filter(|(k, _)| included(k)).collect()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        options: FindOptions,
    ) -> Result<Vec<Document>, AppError> {
        let skip = options.skip.unwrap_or(0) as usize;
        let limit = match options.limit {
            Some(limit) if limit > 0 => limit as usize,
            _ => usize::MAX,
        };

        Ok(self
            .all(collection)
            .into_iter()
            .filter(|doc| matches(doc, &filter))
            .skip(skip)
            .take(limit)
            .collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        Ok(self
            .all(collection)
            .into_iter()
            .find(|doc| matches(doc, &filter)))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<ObjectId, AppError> {
        let mut collections = self.collections.lock().unwrap();
        let stored = collections.entry(collection).or_default();

        for field in self.unique_fields.get(&collection).into_iter().flatten() {
            if let Some(value) = document.get(*field) {
                if stored.iter().any(|existing| existing.get(*field) == Some(value)) {
                    return Err(AppError::Conflict(format!(
                        "E11000 duplicate key error collection: {} index: {}_1",
                        collection.name(),
                        field
                    )));
                }
            }
        }

        let id = ensure_id(&mut document);
        stored.push(document);
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        changes: Document,
    ) -> Result<UpdateOutcome, AppError> {
        let mut collections = self.collections.lock().unwrap();
        let stored = collections.entry(collection).or_default();

        let Some(doc) = stored.iter_mut().find(|doc| matches(doc, &filter)) else {
            return Ok(UpdateOutcome::default());
        };

        let mut modified = false;
        for (key, value) in changes {
            if doc.get(&key) != Some(&value) {
                doc.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Document) -> Result<u64, AppError> {
        let mut collections = self.collections.lock().unwrap();
        let stored = collections.entry(collection).or_default();

        match stored.iter().position(|doc| matches(doc, &filter)) {
            Some(index) => {
                stored.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count(&self, collection: Collection, filter: Document) -> Result<u64, AppError> {
        Ok(self
            .all(collection)
            .iter()
            .filter(|doc| matches(doc, &filter))
            .count() as u64)
    }

    async fn aggregate(
        &self,
        collection: Collection,
        pipeline: Vec<Document>,
    ) -> Result<Vec<Document>, AppError> {
        let mut docs = self.all(collection);

        for stage in pipeline {
            let Some((name, Bson::Document(fields))) = stage.into_iter().next() else {
                return Err(AppError::DatabaseError("malformed pipeline stage".into()));
            };
            docs = match name.as_str() {
                "$match" => docs.into_iter().filter(|d| matches(d, &fields)).collect(),
                "$group" => group_all(&docs, &fields),
                "$project" => docs.into_iter().map(|d| project(d, &fields)).collect(),
                other => {
                    return Err(AppError::DatabaseError(format!(
                        "unsupported stage {}",
                        other
                    )))
                }
            };
        }

        Ok(docs)
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail_ping {
            return Err(AppError::DatabaseError("server selection timeout".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn sum_of(docs: Vec<Document>) -> Bson {
        sum_field(&docs, "donation")
    }

    #[test]
    fn test_sum_keeps_integer_type() {
        assert_eq!(
            sum_of(vec![doc! { "donation": 10 }, doc! { "donation": 25 }]),
            Bson::Int32(35)
        );
        assert_eq!(
            sum_of(vec![doc! { "donation": 10 }, doc! { "donation": 25_i64 }]),
            Bson::Int64(35)
        );
        assert_eq!(
            sum_of(vec![doc! { "donation": i32::MAX }, doc! { "donation": 1 }]),
            Bson::Int64(i64::from(i32::MAX) + 1)
        );
    }

    #[test]
    fn test_sum_with_double_is_double() {
        assert_eq!(
            sum_of(vec![doc! { "donation": 10 }, doc! { "donation": 25.5 }]),
            Bson::Double(35.5)
        );
    }

    #[test]
    fn test_sum_ignores_missing_and_non_numeric() {
        assert_eq!(
            sum_of(vec![doc! { "donation": 7 }, doc! { "note": "x" }, doc! { "donation": "n/a" }]),
            Bson::Int32(7)
        );
    }
}
