//! GraphQL schema and resolvers for listings.

use async_graphql::{Context, EmptySubscription, Error, Object, Result, Schema, ID};
use mongodb::bson::oid::ObjectId;

use super::database::{Database, ListingDocument};
use super::error::ServerError;

/// The listings schema.
pub type ListingsSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema. The [`Database`] is attached per request.
pub fn build_schema() -> ListingsSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish()
}

/// Logs a store failure and hides its details from the client.
fn store_error(e: ServerError) -> Error {
    tracing::error!("listing store failed: {}", e);
    Error::new("internal database error")
}

/// A listing exposed through the API.
///
/// The stored `_id` is only ever served as the derived `id` string.
pub struct Listing(ListingDocument);

#[Object]
impl Listing {
    async fn id(&self) -> ID {
        ID::from(self.0.id.to_hex())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn image(&self) -> &str {
        &self.0.image
    }

    async fn address(&self) -> &str {
        &self.0.address
    }

    /// Nightly price in minor currency units.
    async fn price(&self) -> i32 {
        self.0.price
    }

    async fn num_of_guests(&self) -> i32 {
        self.0.num_of_guests
    }

    async fn num_of_beds(&self) -> i32 {
        self.0.num_of_beds
    }

    async fn num_of_baths(&self) -> i32 {
        self.0.num_of_baths
    }

    async fn rating(&self) -> f64 {
        self.0.rating
    }
}

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Every listing, in store order.
    async fn listings(&self, ctx: &Context<'_>) -> Result<Vec<Listing>> {
        let db = ctx.data::<Database>()?;
        let listings = db.listings.list().await.map_err(store_error)?;
        Ok(listings.into_iter().map(Listing).collect())
    }
}

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Deletes a listing and returns it as it was before deletion.
    async fn delete_listing(&self, ctx: &Context<'_>, id: ID) -> Result<Listing> {
        let db = ctx.data::<Database>()?;
        let object_id =
            ObjectId::parse_str(id.as_str()).map_err(|_| Error::new("invalid listing id"))?;

        match db.listings.delete(object_id).await.map_err(store_error)? {
            Some(listing) => {
                tracing::info!(id = %id.as_str(), "deleted listing");
                Ok(Listing(listing))
            }
            None => Err(Error::new("failed to delete listing")),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::{Request, Variables};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::server::database::{ListingStore, MemoryListingStore};
    use crate::server::error::ServerResult;
    use crate::server::seed::mock_listings;

    async fn execute(db: &Database, request: Request) -> async_graphql::Response {
        build_schema().execute(request.data(db.clone())).await
    }

    struct UnreachableStore;

    #[async_trait::async_trait]
    impl ListingStore for UnreachableStore {
        async fn list(&self) -> ServerResult<Vec<ListingDocument>> {
            Err(unreachable_cluster())
        }

        async fn delete(&self, _id: ObjectId) -> ServerResult<Option<ListingDocument>> {
            Err(unreachable_cluster())
        }

        async fn insert_many(&self, _listings: Vec<ListingDocument>) -> ServerResult<()> {
            Err(unreachable_cluster())
        }
    }

    fn unreachable_cluster() -> ServerError {
        ServerError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "cluster0-abcde.mongodb.net:27017 refused connection",
        ))
    }

    #[tokio::test]
    async fn store_failures_are_not_exposed() {
        let db = Database::new(UnreachableStore);

        let list = execute(&db, Request::new("{ listings { id } }")).await;
        let delete = execute(
            &db,
            Request::new("mutation Delete($id: ID!) { deleteListing(id: $id) { id } }")
                .variables(Variables::from_json(json!({ "id": ObjectId::new().to_hex() }))),
        )
        .await;

        for response in [list, delete] {
            assert_eq!(response.errors.len(), 1);
            assert_eq!(response.errors[0].message, "internal database error");
            assert!(!response.errors[0].message.contains("cluster0"));
        }
    }

    #[tokio::test]
    async fn id_is_derived_from_object_id() {
        let listings = mock_listings();
        let expected: Vec<String> = listings.iter().map(|l| l.id.to_hex()).collect();
        let db = Database::new(MemoryListingStore::with_listings(listings));

        let response = execute(&db, Request::new("{ listings { id title } }")).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let ids: Vec<String> = data["listings"]
            .as_array()
            .unwrap()
            .iter()
            .map(|listing| listing["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn internal_id_is_not_queryable() {
        let db = Database::new(MemoryListingStore::with_listings(mock_listings()));

        let response = execute(&db, Request::new("{ listings { _id } }")).await;
        assert_eq!(response.errors.len(), 1);
    }

    #[tokio::test]
    async fn deleting_unknown_listing_fails() {
        let db = Database::new(MemoryListingStore::with_listings(mock_listings()));
        let request = Request::new("mutation Delete($id: ID!) { deleteListing(id: $id) { id } }")
            .variables(Variables::from_json(
                json!({ "id": ObjectId::new().to_hex() }),
            ));

        let response = execute(&db, request).await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "failed to delete listing");
        assert_eq!(response.data.into_json().unwrap(), json!(null));
        assert_eq!(db.listings.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn malformed_id_is_rejected() {
        let db = Database::new(MemoryListingStore::default());
        let request = Request::new(r#"mutation { deleteListing(id: "not-an-id") { id } }"#);

        let response = execute(&db, request).await;

        assert_eq!(response.errors[0].message, "invalid listing id");
    }

    #[tokio::test]
    async fn delete_returns_pre_delete_document() {
        let listings = mock_listings();
        let target = listings[0].clone();
        let db = Database::new(MemoryListingStore::with_listings(listings));
        let request = Request::new(
            "mutation Delete($id: ID!) { deleteListing(id: $id) { id title price } }",
        )
        .variables(Variables::from_json(json!({ "id": target.id.to_hex() })));

        let response = execute(&db, request).await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({
                "deleteListing": {
                    "id": target.id.to_hex(),
                    "title": target.title,
                    "price": target.price,
                }
            })
        );
        assert_eq!(db.listings.list().await.unwrap().len(), 2);
    }
}
