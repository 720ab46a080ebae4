use serde_json::{json, Value};
use tinyhouse_listings::ApiClient;

/// Set up a client pointed at the default endpoint of `server_url`.
#[allow(dead_code)]
pub fn setup_test_client(server_url: &str) -> ApiClient {
    init_logging();
    ApiClient::builder()
        .base_url(server_url)
        .build()
        .expect("Failed to build ApiClient")
}

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Two listings in the shape the API serves them.
#[allow(dead_code)]
pub fn listings_json() -> Value {
    json!([
        {
            "id": "5d378db94e84753160e08b30",
            "title": "Clean and fully furnished apartment. 5 min away from CN Tower",
            "image": "https://res.cloudinary.com/tiny-house/image/upload/v1560641352/mock/Toronto/toronto-listing-1_exv0tf.jpg",
            "address": "3210 Scotchmere Dr W, Toronto, ON, CA",
            "price": 10000,
            "numOfGuests": 2,
            "numOfBeds": 1,
            "numOfBaths": 2,
            "rating": 5.0
        },
        {
            "id": "5d378db94e84753160e08b31",
            "title": "Luxurious home with private pool",
            "image": "https://res.cloudinary.com/tiny-house/image/upload/v1560645376/mock/Los%20Angeles/los-angeles-listing-1_aikhx7.jpg",
            "address": "100 Hollywood Hills Dr, Los Angeles, California",
            "price": 15000,
            "numOfGuests": 2,
            "numOfBeds": 1,
            "numOfBaths": 1,
            "rating": 4.0
        }
    ])
}

/// Starts the real router on an ephemeral port and returns its base URL.
#[cfg(feature = "server")]
#[allow(dead_code)]
pub async fn spawn_server(db: tinyhouse_listings::server::Database) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, tinyhouse_listings::server::router(db))
            .await
            .expect("test server failed");
    });
    format!("http://{addr}")
}
