use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::{Collection, DocumentStore, FindOptions, UpdateOutcome};
use crate::models::{DonationCountQuery, DonationListQuery, DonationStatus, NewDonation, Pagination};
use crate::utils::AppError;

/// Filter and window for `GET /api/donation`. A status filter disables
/// pagination even when page/size were sent.
pub fn build_list_filter(
    query: &DonationListQuery,
) -> Result<(Document, Option<Pagination>), AppError> {
    let mut filter = Document::new();
    if let Some(email) = &query.email {
        filter.insert("donorEmail", email);
    }

    if let Some(status) = query.status {
        filter.insert("status", status.as_str());
        return Ok((filter, None));
    }

    Ok((filter, Pagination::from_query(query.page, query.size)?))
}

/// Both id and status must match when a status is given; a stale status
/// looks exactly like a missing document.
pub fn build_lookup_filter(id: ObjectId, status: Option<DonationStatus>) -> Document {
    let mut filter = doc! { "_id": id };
    if let Some(status) = status {
        filter.insert("status", status.as_str());
    }
    filter
}

pub async fn list_donations(
    store: &dyn DocumentStore,
    query: &DonationListQuery,
) -> Result<Vec<Document>, AppError> {
    let (filter, pagination) = build_list_filter(query)?;
    store
        .find(Collection::Donations, filter, FindOptions::from(pagination))
        .await
}

pub async fn find_donation(
    store: &dyn DocumentStore,
    id: ObjectId,
    status: Option<DonationStatus>,
) -> Result<Option<Document>, AppError> {
    store
        .find_one(Collection::Donations, build_lookup_filter(id, status))
        .await
}

pub async fn paginate_all(
    store: &dyn DocumentStore,
    pagination: Option<Pagination>,
) -> Result<Vec<Document>, AppError> {
    store
        .find(Collection::Donations, Document::new(), FindOptions::from(pagination))
        .await
}

pub async fn count_for_donor(
    store: &dyn DocumentStore,
    query: &DonationCountQuery,
) -> Result<u64, AppError> {
    let filter = match &query.email {
        Some(email) => doc! { "donorEmail": email },
        None => Document::new(),
    };
    store.count(Collection::Donations, filter).await
}

pub async fn count_all(store: &dyn DocumentStore) -> Result<u64, AppError> {
    store.count(Collection::Donations, Document::new()).await
}

pub async fn create_donation(
    store: &dyn DocumentStore,
    donation: NewDonation,
) -> Result<ObjectId, AppError> {
    store
        .insert_one(Collection::Donations, donation.into_document())
        .await
}

pub async fn update_donation(
    store: &dyn DocumentStore,
    id: ObjectId,
    changes: Document,
) -> Result<UpdateOutcome, AppError> {
    super::update_by_id(store, Collection::Donations, id, changes).await
}

pub async fn delete_donation(store: &dyn DocumentStore, id: ObjectId) -> Result<u64, AppError> {
    super::delete_by_id(store, Collection::Donations, id).await
}
