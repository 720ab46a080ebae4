use tinyhouse_listings::server::{self, connect_database, AppConfig};

#[tokio::main]
async fn main() {
    // Initialize logging
    server::init_tracing();

    // Load application configuration from environment variables.
    let config = AppConfig::new().expect("Failed to load configuration");
    tracing::info!("Starting listings server with configuration: {:?}", config);

    // Startup fails outright if the database cannot be reached.
    let db = connect_database(&config)
        .await
        .expect("Failed to connect to database");

    if let Err(e) = server::serve(config.port, db).await {
        tracing::error!("Server terminated: {}", e);
        std::process::exit(1);
    }
}
