use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::{Collection, DocumentStore, FindOptions, UpdateOutcome};
use crate::models::{BlogStatus, NewBlog};
use crate::utils::AppError;

pub async fn list_blogs(store: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
    store
        .find(Collection::Blogs, Document::new(), FindOptions::default())
        .await
}

pub async fn list_by_status(
    store: &dyn DocumentStore,
    status: Option<BlogStatus>,
) -> Result<Vec<Document>, AppError> {
    let status = status.unwrap_or(BlogStatus::Published);
    store
        .find(
            Collection::Blogs,
            doc! { "blogStatus": status.as_str() },
            FindOptions::default(),
        )
        .await
}

pub async fn create_blog(store: &dyn DocumentStore, blog: NewBlog) -> Result<ObjectId, AppError> {
    store.insert_one(Collection::Blogs, blog.into_document()).await
}

pub async fn update_blog(
    store: &dyn DocumentStore,
    id: ObjectId,
    changes: Document,
) -> Result<UpdateOutcome, AppError> {
    super::update_by_id(store, Collection::Blogs, id, changes).await
}

pub async fn delete_blog(store: &dyn DocumentStore, id: ObjectId) -> Result<u64, AppError> {
    super::delete_by_id(store, Collection::Blogs, id).await
}
