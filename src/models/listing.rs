use serde::{Deserialize, Serialize};

/// Operation used by the listings screen to fetch every listing.
pub const LISTINGS: &str = r#"
  query Listings {
    listings {
      id
      title
      image
      address
      price
      numOfGuests
      numOfBeds
      numOfBaths
      rating
    }
  }
"#;

/// Operation used to delete a single listing by id.
pub const DELETE_LISTING: &str = r#"
  mutation DeleteListing($id: ID!) {
    deleteListing(id: $id) {
      id
      title
    }
  }
"#;

/// A listing as served by the GraphQL API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub image: String,
    pub address: String,
    /// Nightly price in minor currency units.
    pub price: i32,
    pub num_of_guests: i32,
    pub num_of_beds: i32,
    pub num_of_baths: i32,
    pub rating: f64,
}

/// Data returned by the [`LISTINGS`] query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingsData {
    pub listings: Vec<Listing>,
}

/// The subset of a deleted listing selected by [`DELETE_LISTING`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeletedListing {
    pub id: String,
    pub title: String,
}

/// Data returned by the [`DELETE_LISTING`] mutation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteListingData {
    pub delete_listing: DeletedListing,
}

/// Variables accepted by the [`DELETE_LISTING`] mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteListingVariables {
    pub id: String,
}

impl DeleteListingVariables {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
