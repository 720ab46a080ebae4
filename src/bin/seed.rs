use tinyhouse_listings::server::{self, connect_database, seed, AppConfig, ServerResult, StoreBackend};

async fn run(config: &AppConfig) -> ServerResult<usize> {
    let db = connect_database(config).await?;
    seed::seed(&db).await
}

#[tokio::main]
async fn main() {
    server::init_tracing();
    tracing::info!("[seed]: running...");

    let config = AppConfig::new().expect("Failed to load configuration");
    if config.db_backend == StoreBackend::Memory {
        tracing::warn!("[seed]: DB_BACKEND=memory, nothing will be persisted");
    }

    match run(&config).await {
        Ok(count) => tracing::info!("[seed]: Successful, inserted {} listings", count),
        Err(e) => {
            tracing::error!("failed to seed database: {}", e);
            std::process::exit(1);
        }
    }
}
