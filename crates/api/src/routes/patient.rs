use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/patient/hospitals/:code",
            get(handlers::patient::get_patient_hospital),
        )
        .route(
            "/patient/hospitals/:code/register",
            post(handlers::patient::register),
        )
}
