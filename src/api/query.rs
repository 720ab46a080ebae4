use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::state::{Lifecycle, RequestState};
use crate::models::envelope::Body;
use crate::ApiClient;

/// Attaches a query handle and starts its first fetch.
///
/// The fetch runs on a spawned task, so this must be called from within a
/// Tokio runtime. Observe progress through [`QueryHandle::subscribe`].
///
/// # Examples
///
/// ```no_run
/// # use tinyhouse_listings::{use_query, ApiClient, ListingsData, ListingsError, LISTINGS};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ListingsError> {
/// let client = ApiClient::builder().base_url("http://localhost:9000").build()?;
/// let listings = use_query::<ListingsData>(&client, LISTINGS);
///
/// let mut updates = listings.subscribe();
/// while updates.changed().await.is_ok() {
///     let state = updates.borrow_and_update().clone();
///     if !state.loading {
///         println!("loaded: {:?}", state.data.map(|d| d.listings.len()));
///         break;
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub fn use_query<TData>(client: &ApiClient, query: impl Into<String>) -> QueryHandle<TData>
where
    TData: DeserializeOwned + Send + Sync + 'static,
{
    let handle = QueryHandle::new(client.clone(), query);
    handle.refetch();
    handle
}

/// Tracks one GraphQL query through its request lifecycle.
///
/// A handle starts idle. It fetches when attached through [`use_query`], when
/// its operation string changes, and whenever [`QueryHandle::refetch`] is
/// called.
pub struct QueryHandle<TData> {
    client: ApiClient,
    query: Arc<str>,
    lifecycle: Arc<Lifecycle<TData>>,
}

impl<TData> QueryHandle<TData>
where
    TData: DeserializeOwned + Send + Sync + 'static,
{
    /// Creates an idle handle without fetching.
    pub fn new(client: ApiClient, query: impl Into<String>) -> Self {
        Self {
            client,
            query: Arc::from(query.into()),
            lifecycle: Arc::new(Lifecycle::new()),
        }
    }

    /// The operation string this handle sends.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Runs the query and waits for its outcome to be applied.
    pub async fn fetch(&self) {
        self.lifecycle
            .run(&self.client, &Body::new(&self.query))
            .await;
    }

    /// Re-runs the query on a spawned task.
    ///
    /// Previously loaded data stays in the state until the new request
    /// resolves.
    pub fn refetch(&self) -> JoinHandle<()> {
        let client = self.client.clone();
        let query = Arc::clone(&self.query);
        let lifecycle = Arc::clone(&self.lifecycle);
        tokio::spawn(async move {
            lifecycle.run(&client, &Body::new(&query)).await;
        })
    }

    /// Replaces the operation string.
    ///
    /// A fetch is started only when the new string differs from the current
    /// one.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<JoinHandle<()>> {
        let query = query.into();
        if *self.query == *query {
            return None;
        }
        self.query = Arc::from(query);
        Some(self.refetch())
    }

    /// Returns a receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<RequestState<TData>> {
        self.lifecycle.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.borrow().loading
    }

    pub fn has_error(&self) -> bool {
        self.lifecycle.borrow().error
    }
}

impl<TData> QueryHandle<TData>
where
    TData: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Returns a snapshot of the current state.
    pub fn state(&self) -> RequestState<TData> {
        self.lifecycle.borrow().clone()
    }
}
