use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing::{error, info};

use atlas_api::{routes::build_router, state::AppState};
use atlas_core::services::TenantRegistry;
use atlas_infrastructure::database::{connection, PgTenantStore};
use atlas_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    atlas_shared::telemetry::init_telemetry();

    info!("Atlas tenant server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool =
        connection::create_pool(&config.database.url, config.database.max_connections).await?;
    connection::run_migrations(&pool).await?;
    info!("Database connection established.");

    // Wire the registry over the Postgres store
    let store = Arc::new(PgTenantStore::new(pool));
    let registry = Arc::new(TenantRegistry::new(store));
    let state = AppState { registry };

    // Build router
    let app = build_router(state).layer(
        CorsLayer::new()
            .allow_origin(config.app.cors_origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::HeaderName::from_static("x-actor"),
            ]),
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
