use mongodb::bson::oid::ObjectId;

use super::database::{Database, ListingDocument};
use super::error::ServerResult;

/// Three mock listings for local development.
///
/// Every call generates fresh ids.
pub fn mock_listings() -> Vec<ListingDocument> {
    vec![
        ListingDocument {
            id: ObjectId::new(),
            title: "Clean and fully furnished apartment. 5 min away from CN Tower".into(),
            image: "https://res.cloudinary.com/tiny-house/image/upload/v1560641352/mock/Toronto/toronto-listing-1_exv0tf.jpg".into(),
            address: "3210 Scotchmere Dr W, Toronto, ON, CA".into(),
            price: 10000,
            num_of_guests: 2,
            num_of_beds: 1,
            num_of_baths: 2,
            rating: 5.0,
        },
        ListingDocument {
            id: ObjectId::new(),
            title: "Luxurious home with private pool".into(),
            image: "https://res.cloudinary.com/tiny-house/image/upload/v1560645376/mock/Los%20Angeles/los-angeles-listing-1_aikhx7.jpg".into(),
            address: "100 Hollywood Hills Dr, Los Angeles, California".into(),
            price: 15000,
            num_of_guests: 2,
            num_of_beds: 1,
            num_of_baths: 1,
            rating: 4.0,
        },
        ListingDocument {
            id: ObjectId::new(),
            title: "Single bedroom located in the heart of downtown San Fransisco".into(),
            image: "https://res.cloudinary.com/tiny-house/image/upload/v1560646219/mock/San%20Fransisco/san-fransisco-listing-1_qzntl4.jpg".into(),
            address: "200 Sunnyside Rd, San Fransisco, California".into(),
            price: 25000,
            num_of_guests: 3,
            num_of_beds: 2,
            num_of_baths: 2,
            rating: 3.0,
        },
    ]
}

/// Inserts the mock listings and returns how many were written.
pub async fn seed(db: &Database) -> ServerResult<usize> {
    let listings = mock_listings();
    let count = listings.len();
    db.listings.insert_many(listings).await?;
    Ok(count)
}
