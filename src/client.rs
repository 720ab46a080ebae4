use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::listings::ListingsApi;
use crate::models::envelope::{Body, GraphQlResponse};
use crate::{ListingsError, ListingsResult};

/// Path of the GraphQL endpoint when none is configured.
pub const DEFAULT_ENDPOINT: &str = "/api";

/// Builder for the listings API client.
///
/// This builder provides a fluent API for creating clients with validation at
/// build time.
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    http_client: Option<ReqwestClient>,
}

impl ApiClientBuilder {
    /// Sets the server base URL, e.g. `http://localhost:9000`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the path of the GraphQL endpoint. Defaults to `/api`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets an HTTP request timeout. Requests never time out unless this is
    /// set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets a custom reqwest client (e.g., for testing or custom middleware).
    pub fn http_client(mut self, http_client: ReqwestClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> ListingsResult<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ListingsError::ConfigurationError("Base URL is required".into()))
            .and_then(|url_str| {
                Url::parse(&url_str).map_err(|e| {
                    ListingsError::ConfigurationError(format!("Invalid base URL: {e}"))
                })
            })?;

        let endpoint = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let endpoint_url = resolve_endpoint(&base_url, endpoint)?;

        let user_agent = self
            .user_agent
            .as_deref()
            .unwrap_or(concat!("tinyhouse-listings/", env!("CARGO_PKG_VERSION")));

        let http_client = if let Some(custom_client) = self.http_client {
            custom_client
        } else {
            let mut builder = ReqwestClient::builder().user_agent(user_agent);
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build().map_err(|e| {
                ListingsError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?
        };

        Ok(ApiClient {
            endpoint_url,
            http_client,
        })
    }
}

/// Joins a path-only endpoint onto the base URL.
fn resolve_endpoint(base_url: &Url, endpoint: &str) -> ListingsResult<Url> {
    if endpoint.contains('?') || endpoint.contains('#') {
        return Err(ListingsError::InvalidEndpoint(format!(
            "endpoint must not include query or fragment: {endpoint}"
        )));
    }
    if !endpoint.starts_with('/') {
        return Err(ListingsError::InvalidEndpoint(format!(
            "endpoint must be an absolute path: {endpoint}"
        )));
    }
    Ok(base_url.join(endpoint)?)
}

/// Client for the listings GraphQL endpoint.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    endpoint_url: Url,
    http_client: ReqwestClient,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint_url", &self.endpoint_url.as_str())
            .finish()
    }
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// The fully resolved URL requests are posted to.
    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }

    /// Posts one GraphQL envelope and decodes the response envelope.
    ///
    /// Exactly one round trip is made. The body is decoded whatever the HTTP
    /// status, since GraphQL servers report failures inside the envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the network level or the
    /// response body is not a JSON envelope.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use tinyhouse_listings::{ApiClient, Body, ListingsError, ListingsData, LISTINGS};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ListingsError> {
    /// let client = ApiClient::builder().base_url("http://localhost:9000").build()?;
    ///
    /// let response = client.fetch::<ListingsData, ()>(&Body::new(LISTINGS)).await?;
    /// if let Some(data) = response.data {
    ///     println!("{} listings", data.listings.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch<TData, TVariables>(
        &self,
        body: &Body<'_, TVariables>,
    ) -> ListingsResult<GraphQlResponse<TData>>
    where
        TData: DeserializeOwned,
        TVariables: Serialize,
    {
        let response = self
            .http_client
            .post(self.endpoint_url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        log::debug!("POST {} -> {}", self.endpoint_url, status);

        let bytes = response.bytes().await?;
        let envelope: GraphQlResponse<TData> = serde_json::from_slice(&bytes)?;
        Ok(envelope)
    }

    /// Gets the typed listings API interface.
    pub fn listings(&self) -> ListingsApi<'_> {
        ListingsApi::new(self)
    }
}
