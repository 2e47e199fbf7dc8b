use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::{Collection, DocumentStore, FindOptions};
use crate::models::NewFunding;
use crate::utils::AppError;

/// Sum of every `donation` amount as a single `{ total }` row.
/// An empty collection yields no rows rather than `{ total: 0 }`.
pub fn total_pipeline() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": null, "total": { "$sum": "$donation" } } },
        doc! { "$project": { "_id": 0, "total": 1 } },
    ]
}

pub async fn total(store: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
    store.aggregate(Collection::Funding, total_pipeline()).await
}

pub async fn list_for_email(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Vec<Document>, AppError> {
    store
        .find(Collection::Funding, doc! { "email": email }, FindOptions::default())
        .await
}

pub async fn record(store: &dyn DocumentStore, funding: NewFunding) -> Result<ObjectId, AppError> {
    store
        .insert_one(Collection::Funding, funding.into_document())
        .await
}
