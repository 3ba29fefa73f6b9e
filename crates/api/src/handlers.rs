pub mod admin;
pub mod patient;

use duxcall_core::{
    errors::CallError,
    models::{hospital::Hospital, route::Route},
};
use duxcall_db::repositories;
use sqlx::PgPool;

use crate::middleware::error_handling::AppError;

/// Looks up an active hospital, failing with 404 when the code is unknown.
pub(crate) async fn load_hospital(pool: &PgPool, code: &str) -> Result<Hospital, AppError> {
    let hospital = repositories::hospital::get_active_hospital_by_code(pool, code)
        .await
        .map_err(CallError::Database)?
        .ok_or_else(|| CallError::NotFound(format!("Hospital {} not found", code)))?;

    Ok(hospital.into())
}

pub(crate) async fn load_route(pool: &PgPool, code: &str, key: &str) -> Result<Route, AppError> {
    let hospital = load_hospital(pool, code).await?;

    let route = repositories::route::get_route_by_key(pool, hospital.id, key)
        .await
        .map_err(CallError::Database)?
        .ok_or_else(|| CallError::NotFound(format!("Route {} not found for {}", key, code)))?;

    Ok(route.into())
}
