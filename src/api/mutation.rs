use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;

use super::state::{Lifecycle, RequestState};
use crate::models::envelope::Body;
use crate::ApiClient;

/// Attaches a mutation handle.
///
/// Nothing is sent until the returned trigger is called. The receiver
/// observes the same state the trigger drives.
///
/// # Examples
///
/// ```no_run
/// # use tinyhouse_listings::{
/// #     use_mutation, ApiClient, DeleteListingData, DeleteListingVariables, ListingsError,
/// #     DELETE_LISTING,
/// # };
/// # #[tokio::main]
/// # async fn main() -> Result<(), ListingsError> {
/// let client = ApiClient::builder().base_url("http://localhost:9000").build()?;
/// let (delete_listing, state) =
///     use_mutation::<DeleteListingData, DeleteListingVariables>(&client, DELETE_LISTING);
///
/// delete_listing.call(Some(DeleteListingVariables::new("5d378db94e84753160e08b30"))).await;
/// if state.borrow().error {
///     eprintln!("Uh oh! Something went wrong");
/// }
/// # Ok(())
/// # }
/// ```
pub fn use_mutation<TData, TVariables>(
    client: &ApiClient,
    query: impl Into<String>,
) -> (
    MutationTrigger<TData, TVariables>,
    watch::Receiver<RequestState<TData>>,
)
where
    TData: DeserializeOwned + Send + Sync + 'static,
    TVariables: Serialize,
{
    let trigger = MutationTrigger::new(client.clone(), query);
    let state = trigger.subscribe();
    (trigger, state)
}

/// Sends a GraphQL mutation on demand and tracks its lifecycle.
pub struct MutationTrigger<TData, TVariables> {
    client: ApiClient,
    query: Arc<str>,
    lifecycle: Arc<Lifecycle<TData>>,
    _variables: PhantomData<fn(TVariables)>,
}

impl<TData, TVariables> Clone for MutationTrigger<TData, TVariables> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            query: Arc::clone(&self.query),
            lifecycle: Arc::clone(&self.lifecycle),
            _variables: PhantomData,
        }
    }
}

impl<TData, TVariables> MutationTrigger<TData, TVariables>
where
    TData: DeserializeOwned + Send + Sync + 'static,
    TVariables: Serialize,
{
    pub fn new(client: ApiClient, query: impl Into<String>) -> Self {
        Self {
            client,
            query: Arc::from(query.into()),
            lifecycle: Arc::new(Lifecycle::new()),
            _variables: PhantomData,
        }
    }

    /// Sends the mutation and waits until its outcome is applied.
    ///
    /// Failures are recorded in the state, never returned. When calls
    /// overlap, the state ends up reflecting the call started last.
    pub async fn call(&self, variables: Option<TVariables>) {
        let body = Body::with_variables(&self.query, variables);
        self.lifecycle.run(&self.client, &body).await;
    }

    /// Returns a receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<RequestState<TData>> {
        self.lifecycle.subscribe()
    }
}
