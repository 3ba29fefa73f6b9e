//! # Duxcall API
//!
//! The web server for the Duxcall clinic backend. Patients look up a hospital
//! profile with the live status of each phone route; development builds also
//! expose seeding and a small administration surface.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Error mapping shared by handlers and the tower stack
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling middleware
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method},
    Router,
};
use chrono_tz::Tz;
use duxcall_db::PgScheduleStore;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use config::ApiConfig;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Schedule reads for the resolver, over the same pool
    pub schedule_store: PgScheduleStore,
    /// Zone used for hospitals whose stored zone does not parse
    pub default_timezone: Tz,
}

impl ApiState {
    pub fn new(db_pool: PgPool, default_timezone: Tz) -> Self {
        Self {
            schedule_store: PgScheduleStore::new(db_pool.clone()),
            db_pool,
            default_timezone,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins)
}

/// Builds the application router with every layer applied.
///
/// `/dev` and `/admin` are only mounted when `config.enable_dev_routes` is set.
pub fn build_router(state: Arc<ApiState>, config: &ApiConfig) -> Router {
    let mut app = Router::new()
        .merge(routes::health::routes())
        .merge(routes::patient::routes());

    if config.enable_dev_routes {
        info!("Development routes enabled");
        app = app.merge(routes::admin::routes());
    }

    let app = app.with_state(state);

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(
                middleware::error_handling::handle_middleware_error,
            ))
            .timeout(Duration::from_secs(config.request_timeout)),
    )
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = duxcall_api::config::ApiConfig::from_env()?;
/// let db_pool = duxcall_db::create_pool(&config.database_url).await?;
/// duxcall_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(db_pool, config.default_timezone));
    let app = build_router(state, &config);

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
