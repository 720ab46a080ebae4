//! # tinyhouse-listings
//!
//! Client and server for the TinyHouse listings GraphQL API.
//!
//! The client side posts GraphQL envelopes to a single endpoint and tracks
//! each request through a small state machine (idle, loading, success or
//! error) that callers can subscribe to. The server side, behind the default
//! `server` feature, resolves the `listings` query and the `deleteListing`
//! mutation against a MongoDB collection.
//!
//! ## Features
//!
//! - 📡 One-shot GraphQL transport over `reqwest`
//! - 🔄 Query and mutation handles with observable request state
//! - 🏠 Typed listings API
//! - 🗄️ axum + async-graphql server over MongoDB (`server` feature)
//!
//! ## Example
//!
//! ```rust,no_run
//! use tinyhouse_listings::{
//!     use_mutation, use_query, ApiClient, DeleteListingData, DeleteListingVariables,
//!     ListingsData, DELETE_LISTING, LISTINGS,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::builder().base_url("http://localhost:9000").build()?;
//!
//!     // Fetches immediately on attach.
//!     let listings = use_query::<ListingsData>(&client, LISTINGS);
//!     let (delete_listing, delete_state) =
//!         use_mutation::<DeleteListingData, DeleteListingVariables>(&client, DELETE_LISTING);
//!
//!     let mut updates = listings.subscribe();
//!     updates
//!         .wait_for(|state| !state.loading && (state.data.is_some() || state.error))
//!         .await?;
//!     if let Some(first) = listings.state().data.and_then(|d| d.listings.into_iter().next()) {
//!         delete_listing.call(Some(DeleteListingVariables::new(first.id))).await;
//!         if !delete_state.borrow().error {
//!             listings.refetch().await?;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod error;
mod models;

#[cfg(feature = "server")]
pub mod server;

pub use api::listings::ListingsApi;
pub use api::mutation::{use_mutation, MutationTrigger};
pub use api::query::{use_query, QueryHandle};
pub use api::state::{Action, RequestState};
pub use client::{ApiClient, ApiClientBuilder, DEFAULT_ENDPOINT};
pub use error::{ListingsError, ListingsResult};
pub use models::envelope::{Body, GraphQlError, GraphQlResponse};
pub use models::listing::{
    DeleteListingData, DeleteListingVariables, DeletedListing, Listing, ListingsData,
    DELETE_LISTING, LISTINGS,
};
