//! Listing storage and the per-request database context.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::config::{AppConfig, StoreBackend};
use super::error::ServerResult;
use super::seed;

/// A listing as stored in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub image: String,
    pub address: String,
    pub price: i32,
    pub num_of_guests: i32,
    pub num_of_beds: i32,
    pub num_of_baths: i32,
    pub rating: f64,
}

/// Accessor for the listings collection.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Returns every listing, unfiltered, in store order.
    async fn list(&self) -> ServerResult<Vec<ListingDocument>>;

    /// Atomically removes the listing with `id`, returning it as it was
    /// before deletion. `None` when nothing matched.
    async fn delete(&self, id: ObjectId) -> ServerResult<Option<ListingDocument>>;

    async fn insert_many(&self, listings: Vec<ListingDocument>) -> ServerResult<()>;
}

/// [`ListingStore`] backed by a MongoDB collection.
pub struct MongoListingStore {
    collection: Collection<ListingDocument>,
}

impl MongoListingStore {
    pub fn new(collection: Collection<ListingDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl ListingStore for MongoListingStore {
    async fn list(&self) -> ServerResult<Vec<ListingDocument>> {
        let cursor = self.collection.find(doc! {}).await?;
        let listings: Vec<ListingDocument> = cursor.try_collect().await?;
        Ok(listings)
    }

    async fn delete(&self, id: ObjectId) -> ServerResult<Option<ListingDocument>> {
        Ok(self.collection.find_one_and_delete(doc! { "_id": id }).await?)
    }

    async fn insert_many(&self, listings: Vec<ListingDocument>) -> ServerResult<()> {
        if listings.is_empty() {
            return Ok(());
        }
        self.collection.insert_many(listings).await?;
        Ok(())
    }
}

/// In-process [`ListingStore`] keeping insertion order.
#[derive(Default)]
pub struct MemoryListingStore {
    listings: Mutex<Vec<ListingDocument>>,
}

impl MemoryListingStore {
    pub fn with_listings(listings: Vec<ListingDocument>) -> Self {
        Self {
            listings: Mutex::new(listings),
        }
    }
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn list(&self) -> ServerResult<Vec<ListingDocument>> {
        Ok(self.listings.lock().await.clone())
    }

    async fn delete(&self, id: ObjectId) -> ServerResult<Option<ListingDocument>> {
        let mut listings = self.listings.lock().await;
        let position = listings.iter().position(|listing| listing.id == id);
        Ok(position.map(|index| listings.remove(index)))
    }

    async fn insert_many(&self, listings: Vec<ListingDocument>) -> ServerResult<()> {
        self.listings.lock().await.extend(listings);
        Ok(())
    }
}

/// Handles passed to resolvers with every request.
#[derive(Clone)]
pub struct Database {
    pub listings: Arc<dyn ListingStore>,
}

impl Database {
    pub fn new(listings: impl ListingStore + 'static) -> Self {
        Self {
            listings: Arc::new(listings),
        }
    }
}

/// Opens the configured store.
///
/// For MongoDB the server is pinged once so that bad credentials or an
/// unreachable cluster fail here rather than on the first request.
pub async fn connect_database(config: &AppConfig) -> ServerResult<Database> {
    match config.db_backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory listing store; changes are not persisted");
            Ok(Database::new(MemoryListingStore::with_listings(
                seed::mock_listings(),
            )))
        }
        StoreBackend::Mongodb => {
            let client = Client::with_uri_str(config.connection_uri().expose_secret()).await?;
            let db = client.database(&config.db_name);
            db.run_command(doc! { "ping": 1 }).await?;

            tracing::info!(
                database = %config.db_name,
                collection = %config.db_collection,
                "connected to MongoDB"
            );

            Ok(Database::new(MongoListingStore::new(
                db.collection(&config.db_collection),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_deletes_once() {
        let listings = seed::mock_listings();
        let target = listings[1].clone();
        let store = MemoryListingStore::with_listings(listings);

        let removed = store.delete(target.id).await.unwrap();
        assert_eq!(removed, Some(target.clone()));

        let again = store.delete(target.id).await.unwrap();
        assert_eq!(again, None);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[test]
    fn document_uses_stored_field_names() {
        let listing = seed::mock_listings().remove(0);
        let document = mongodb::bson::to_document(&listing).unwrap();

        assert_eq!(document.get_object_id("_id").unwrap(), listing.id);
        assert_eq!(document.get_i32("numOfGuests").unwrap(), 2);
        assert!(document.get("id").is_none());
    }
}
