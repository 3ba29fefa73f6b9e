use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    Json,
};
use chrono::Utc;
use duxcall_core::{
    errors::CallError,
    models::{
        hospital::{HospitalSummary, PatientHospitalResponse, RegisterHospitalResponse},
        news::{News, NewsItem},
        route::{Route, RouteSummary},
    },
    ResolverConfig, ScheduleResolver,
};
use duxcall_db::repositories;
use std::sync::Arc;

use super::load_hospital;
use crate::{middleware::error_handling::AppError, ApiState};

/// Published news items shown on the profile.
pub const NEWS_LIMIT: i64 = 10;

#[axum::debug_handler]
pub async fn get_patient_hospital(
    State(state): State<Arc<ApiState>>,
    Path(code): Path<String>,
) -> Result<Json<PatientHospitalResponse>, AppError> {
    let hospital = load_hospital(&state.db_pool, &code).await?;
    let tz = hospital.zone_or(state.default_timezone);

    let news = repositories::news::get_published_news(&state.db_pool, hospital.id, NEWS_LIMIT)
        .await
        .map_err(CallError::Database)?
        .into_iter()
        .map(|row| NewsItem::new(News::from(row), tz))
        .collect();

    let routes = repositories::route::get_enabled_routes(&state.db_pool, hospital.id)
        .await
        .map_err(CallError::Database)?;

    let resolver = ScheduleResolver::new(&state.schedule_store, ResolverConfig::new(tz));
    let now = Utc::now();

    let mut summaries = Vec::with_capacity(routes.len());
    for row in routes {
        let route = Route::from(row);
        let today = resolver.compute_route_status(route.id, now).await?;
        summaries.push(RouteSummary {
            key: route.key,
            label: route.label,
            phone: route.phone,
            today,
        });
    }

    let response = PatientHospitalResponse {
        hospital: HospitalSummary::from(&hospital),
        news,
        routes: summaries,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> Result<Json<RegisterHospitalResponse>, AppError> {
    let hospital = load_hospital(&state.db_pool, &code).await?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok());

    repositories::registration::record_registration(&state.db_pool, &hospital.code, user_agent)
        .await
        .map_err(CallError::Database)?;

    tracing::info!("Patient registered with hospital {}", hospital.code);

    Ok(Json(RegisterHospitalResponse {
        hospital: HospitalSummary::from(&hospital),
    }))
}
