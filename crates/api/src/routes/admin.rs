use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

/// Seed and administration endpoints, mounted only in development.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/dev/seed", post(handlers::admin::seed))
        .route(
            "/admin/hospitals/:code/routes",
            get(handlers::admin::list_routes),
        )
        .route(
            "/admin/hospitals/:code/routes/:key",
            put(handlers::admin::put_route),
        )
        .route(
            "/admin/hospitals/:code/routes/:key/weekly-hours",
            get(handlers::admin::get_weekly_hours).put(handlers::admin::put_weekly_hours),
        )
        .route(
            "/admin/hospitals/:code/routes/:key/move",
            post(handlers::admin::move_route),
        )
}
