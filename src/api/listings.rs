use crate::models::envelope::Body;
use crate::models::listing::{
    DeleteListingData, DeleteListingVariables, DeletedListing, Listing, ListingsData,
    DELETE_LISTING, LISTINGS,
};
use crate::{ApiClient, ListingsResult};

/// Typed access to the listings operations.
///
/// Unlike the request handles, these methods return errors to the caller
/// instead of folding them into a state flag.
pub struct ListingsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ListingsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Lists every listing in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports a GraphQL
    /// error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &tinyhouse_listings::ApiClient) -> Result<(), tinyhouse_listings::ListingsError> {
    /// for listing in client.listings().list().await? {
    ///     println!("{}: {}", listing.id, listing.title);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self) -> ListingsResult<Vec<Listing>> {
        let response = self
            .client
            .fetch::<ListingsData, ()>(&Body::new(LISTINGS))
            .await?;
        Ok(response.into_result()?.listings)
    }

    /// Deletes the listing with the given id and returns what was removed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ListingsError::GraphQl`] if no listing has this id.
    pub async fn delete(&self, id: impl Into<String>) -> ListingsResult<DeletedListing> {
        let body = Body::with_variables(DELETE_LISTING, Some(DeleteListingVariables::new(id)));
        let response = self
            .client
            .fetch::<DeleteListingData, DeleteListingVariables>(&body)
            .await?;
        Ok(response.into_result()?.delete_listing)
    }
}
