use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::utils::AppError;

/// The four collections the platform works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Donations,
    Blogs,
    Funding,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Donations => "donations",
            Collection::Blogs => "blogs",
            Collection::Funding => "funding",
        }
    }
}

/// Skip/limit applied to a find.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Document operations the HTTP layer needs from the database.
///
/// Implemented by [`super::MongoDB`] in production; handlers receive it as
/// `web::Data<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        options: FindOptions,
    ) -> Result<Vec<Document>, AppError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, AppError>;

    /// Returns the id of the stored document. Unique-index violations
    /// surface as [`AppError::Conflict`].
    async fn insert_one(&self, collection: Collection, document: Document)
        -> Result<ObjectId, AppError>;

    /// Applies `changes` as a `$set` to the first matching document.
    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        changes: Document,
    ) -> Result<UpdateOutcome, AppError>;

    async fn delete_one(&self, collection: Collection, filter: Document) -> Result<u64, AppError>;

    async fn count(&self, collection: Collection, filter: Document) -> Result<u64, AppError>;

    async fn aggregate(
        &self,
        collection: Collection,
        pipeline: Vec<Document>,
    ) -> Result<Vec<Document>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
