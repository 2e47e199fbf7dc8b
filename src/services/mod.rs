pub mod auth_service;
pub mod blog_service;
pub mod donation_service;
pub mod funding_service;
pub mod payment_service;
pub mod user_service;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::{Collection, DocumentStore, UpdateOutcome};
use crate::utils::AppError;

/// Partial update of one document. `_id` is never rewritten.
pub(crate) async fn update_by_id(
    store: &dyn DocumentStore,
    collection: Collection,
    id: ObjectId,
    mut changes: Document,
) -> Result<UpdateOutcome, AppError> {
    changes.remove("_id");
    if changes.is_empty() {
        return Err(AppError::InvalidRequest("no fields to update".to_string()));
    }

    store
        .update_one(collection, doc! { "_id": id }, changes)
        .await
}

pub(crate) async fn delete_by_id(
    store: &dyn DocumentStore,
    collection: Collection,
    id: ObjectId,
) -> Result<u64, AppError> {
    store.delete_one(collection, doc! { "_id": id }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;

    #[tokio::test]
    async fn test_update_ignores_id_and_rejects_empty() {
        let store = MemoryStore::new();
        let ids = store.seed(Collection::Blogs, vec![doc! { "title": "Why donate" }]);

        let result = update_by_id(&store, Collection::Blogs, ids[0], doc! { "_id": ObjectId::new() }).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        let outcome = update_by_id(&store, Collection::Blogs, ids[0], doc! { "title": "Why give blood" })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 1 });
        assert_eq!(store.all(Collection::Blogs)[0].get_object_id("_id").unwrap(), ids[0]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let ids = store.seed(Collection::Donations, vec![doc! { "donorEmail": "a@b.com" }, doc! { "donorEmail": "c@d.com" }]);

        assert_eq!(delete_by_id(&store, Collection::Donations, ids[0]).await.unwrap(), 1);
        assert_eq!(delete_by_id(&store, Collection::Donations, ids[0]).await.unwrap(), 0);
        assert_eq!(store.all(Collection::Donations).len(), 1);
    }
}
