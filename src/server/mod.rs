//! The listings GraphQL server.
//!
//! Exposes `POST /api` for GraphQL operations and `GET /api` for the GraphiQL
//! IDE. The [`Database`] is attached to each request as context data.

pub mod config;
pub mod database;
pub mod error;
pub mod schema;
pub mod seed;

use std::net::SocketAddr;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use self::config::{AppConfig, StoreBackend};
pub use self::database::{
    connect_database, Database, ListingDocument, ListingStore, MemoryListingStore,
    MongoListingStore,
};
pub use self::error::{ServerError, ServerResult};
pub use self::schema::{build_schema, ListingsSchema};

/// Path the GraphQL endpoint is mounted on.
pub const API_PATH: &str = "/api";

// Shared application state
#[derive(Clone)]
struct AppState {
    schema: ListingsSchema,
    db: Database,
}

/// Initializes `tracing` output, honouring `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Builds the application router around an opened database.
pub fn router(db: Database) -> Router {
    let state = AppState {
        schema: build_schema(),
        db,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(API_PATH, get(graphiql).post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Executes one GraphQL request with the database attached as context.
async fn graphql_handler(State(state): State<AppState>, request: GraphQLRequest) -> GraphQLResponse {
    let request = request.into_inner().data(state.db.clone());
    state.schema.execute(request).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(API_PATH).finish())
}

/// Serves the router on all interfaces until the process exits.
pub async fn serve(port: u16, db: Database) -> ServerResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[app] : http://localhost:{}{}", port, API_PATH);
    axum::serve(listener, router(db)).await?;
    Ok(())
}
