mod store;
#[cfg(test)]
pub mod memory;

pub use store::*;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use std::time::Duration;

use crate::utils::AppError;

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether a driver error is a unique-index violation.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.app_name = Some("bloodhub-server".to_string());
        // Pool de conexões
        client_options.max_pool_size = Some(20);  // Máx 20 conexões simultâneas
        client_options.min_pool_size = Some(5);   // Mantém 5 conexões sempre vivas
        client_options.max_idle_time = Some(Duration::from_secs(300));  // 5min idle

        // Timeouts
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Testa a conexão
        db.run_command(doc! { "ping": 1 }).await?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the API relies on.
    ///
    /// The unique `users.email` index is what makes registration idempotent,
    /// so failing to create it aborts startup. The lookup indexes are
    /// best-effort.
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let users = self.raw(Collection::Users);
        let unique_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        users.create_index(unique_email).await?;
        log::info!("   ✅ Index created: users(email) unique");

        let lookups = [
            (Collection::Users, doc! { "status": 1 }, "users(status)"),
            (Collection::Donations, doc! { "donorEmail": 1 }, "donations(donorEmail)"),
            (Collection::Donations, doc! { "status": 1 }, "donations(status)"),
            (Collection::Blogs, doc! { "blogStatus": 1 }, "blogs(blogStatus)"),
            (Collection::Funding, doc! { "email": 1 }, "funding(email)"),
        ];

        for (collection, keys, label) in lookups {
            let index = IndexModel::builder().keys(keys).build();
            match self.raw(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => log::debug!("   ℹ️  Index {} not created: {}", label, e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    fn raw(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection(collection.name())
    }

    /// Closes the connection pool. Call once the HTTP server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        options: FindOptions,
    ) -> Result<Vec<Document>, AppError> {
        let coll = self.raw(collection);
        let mut find = coll.find(filter);
        if let Some(skip) = options.skip {
            find = find.skip(skip);
        }
        if let Some(limit) = options.limit {
            find = find.limit(limit);
        }

        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        Ok(self.raw(collection).find_one(filter).await?)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ObjectId, AppError> {
        let result = self.raw(collection).insert_one(document).await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError(format!(
                "inserted id {} is not an ObjectId",
                result.inserted_id
            ))
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        changes: Document,
    ) -> Result<UpdateOutcome, AppError> {
        let result = self
            .raw(collection)
            .update_one(filter, doc! { "$set": changes })
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Document) -> Result<u64, AppError> {
        let result = self.raw(collection).delete_one(filter).await?;
        Ok(result.deleted_count)
    }

    async fn count(&self, collection: Collection, filter: Document) -> Result<u64, AppError> {
        Ok(self.raw(collection).count_documents(filter).await?)
    }

    async fn aggregate(
        &self,
        collection: Collection,
        pipeline: Vec<Document>,
    ) -> Result<Vec<Document>, AppError> {
        let cursor = self.raw(collection).aggregate(pipeline).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
