use axum::{
    extract::{Path, State},
    Json,
};
use duxcall_core::{
    errors::CallError,
    models::{
        hospital::SeedResponse,
        route::{
            MoveRouteRequest, MoveRouteResponse, Route, RouteAdminEntry, RouteListResponse,
            UpsertRouteRequest,
        },
        schedule::{
            parse_time_of_day, DayHours, ReplaceWeeklyHoursRequest, WeeklyHoursEntry,
            WeeklyHoursInput, WeeklyHoursResponse,
        },
    },
};
use duxcall_db::{repositories, seed::seed_dev_data};
use std::{collections::HashSet, sync::Arc};

use super::{load_hospital, load_route};
use crate::{middleware::error_handling::AppError, ApiState};

/// Checks submitted days and turns them into a full, normalized week.
///
/// Day indices must fall in 0..=6 (Monday first) and appear once. Times that
/// are present must read as `HH:MM`; a missing time closes the day, and so
/// does a day left out of the submission. The result always holds 7 entries
/// in day order.
pub fn parse_weekly_days(days: &[WeeklyHoursInput]) -> Result<Vec<(i16, DayHours)>, CallError> {
    let mut week = [DayHours::closed(); 7];
    let mut seen = HashSet::new();

    for day in days {
        if !(0..=6).contains(&day.dow) {
            return Err(CallError::Validation(format!(
                "Day index must be between 0 and 6, got {}",
                day.dow
            )));
        }
        if !seen.insert(day.dow) {
            return Err(CallError::Validation(format!(
                "Day index {} submitted more than once",
                day.dow
            )));
        }

        let time = |value: &Option<String>| -> Result<_, CallError> {
            match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                Some(raw) => parse_time_of_day(raw)
                    .map(Some)
                    .ok_or_else(|| CallError::Validation(format!("Invalid time: {}", raw))),
                None => Ok(None),
            }
        };
        let hours = DayHours {
            is_closed: day.is_closed,
            open_time: time(&day.open)?,
            close_time: time(&day.close)?,
        };

        week[day.dow as usize] = hours.normalized();
    }

    Ok((0..7).zip(week).collect())
}

/// A route's key, label and phone, trimmed. None of them may be blank.
pub fn validate_route_fields<'a>(
    key: &'a str,
    payload: &'a UpsertRouteRequest,
) -> Result<(&'a str, &'a str, &'a str), CallError> {
    let required = |name: &str, value: &'a str| {
        let value = value.trim();
        if value.is_empty() {
            Err(CallError::Validation(format!("Route {} must not be empty", name)))
        } else {
            Ok(value)
        }
    };

    Ok((
        required("key", key)?,
        required("label", &payload.label)?,
        required("phone", &payload.phone)?,
    ))
}

#[axum::debug_handler]
pub async fn seed(State(state): State<Arc<ApiState>>) -> Result<Json<SeedResponse>, AppError> {
    let hospital_code = seed_dev_data(&state.db_pool)
        .await
        .map_err(CallError::Database)?;

    Ok(Json(SeedResponse {
        seeded: true,
        hospital_code,
    }))
}

#[axum::debug_handler]
pub async fn get_weekly_hours(
    State(state): State<Arc<ApiState>>,
    Path((code, key)): Path<(String, String)>,
) -> Result<Json<WeeklyHoursResponse>, AppError> {
    let route = load_route(&state.db_pool, &code, &key).await?;

    let rows = repositories::schedule::get_weekly_hours_for_route(&state.db_pool, route.id)
        .await
        .map_err(CallError::Database)?;

    let days = (0..7)
        .map(|dow| {
            let hours = rows
                .iter()
                .find(|row| row.dow == dow)
                .map(|row| DayHours::from(row.clone()))
                .unwrap_or_else(DayHours::closed);
            WeeklyHoursEntry::new(dow, hours)
        })
        .collect();

    Ok(Json(WeeklyHoursResponse {
        route_key: route.key,
        days,
    }))
}

#[axum::debug_handler]
pub async fn put_weekly_hours(
    State(state): State<Arc<ApiState>>,
    Path((code, key)): Path<(String, String)>,
    Json(payload): Json<ReplaceWeeklyHoursRequest>,
) -> Result<Json<WeeklyHoursResponse>, AppError> {
    let days = parse_weekly_days(&payload.days)?;
    let route = load_route(&state.db_pool, &code, &key).await?;

    repositories::schedule::save_weekly_hours(&state.db_pool, route.id, &days)
        .await
        .map_err(CallError::Database)?;

    tracing::info!("Weekly hours saved for {}/{}", code, key);

    let days = days
        .into_iter()
        .map(|(dow, hours)| WeeklyHoursEntry::new(dow, hours))
        .collect();

    Ok(Json(WeeklyHoursResponse {
        route_key: route.key,
        days,
    }))
}

#[axum::debug_handler]
pub async fn move_route(
    State(state): State<Arc<ApiState>>,
    Path((code, key)): Path<(String, String)>,
    Json(payload): Json<MoveRouteRequest>,
) -> Result<Json<MoveRouteResponse>, AppError> {
    let route = load_route(&state.db_pool, &code, &key).await?;

    let moved = repositories::route::move_route(&state.db_pool, route.id, payload.direction)
        .await
        .map_err(CallError::Database)?;

    let response = match moved {
        Some(sort_order) => MoveRouteResponse {
            key: route.key,
            moved: true,
            sort_order,
        },
        None => MoveRouteResponse {
            key: route.key,
            moved: false,
            sort_order: route.sort_order,
        },
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn list_routes(
    State(state): State<Arc<ApiState>>,
    Path(code): Path<String>,
) -> Result<Json<RouteListResponse>, AppError> {
    let hospital = load_hospital(&state.db_pool, &code).await?;

    let routes = repositories::route::get_routes(&state.db_pool, hospital.id)
        .await
        .map_err(CallError::Database)?
        .into_iter()
        .map(|row| RouteAdminEntry::from(Route::from(row)))
        .collect();

    Ok(Json(RouteListResponse {
        hospital_code: hospital.code,
        routes,
    }))
}

#[axum::debug_handler]
pub async fn put_route(
    State(state): State<Arc<ApiState>>,
    Path((code, key)): Path<(String, String)>,
    Json(payload): Json<UpsertRouteRequest>,
) -> Result<Json<RouteAdminEntry>, AppError> {
    let (key, label, phone) = validate_route_fields(&key, &payload)?;
    let hospital = load_hospital(&state.db_pool, &code).await?;

    let mut conn = state
        .db_pool
        .acquire()
        .await
        .map_err(|e| CallError::Database(e.into()))?;
    let route = repositories::route::upsert_route(
        &mut *conn,
        hospital.id,
        key,
        label,
        phone,
        payload.is_enabled,
        payload.sort_order,
    )
    .await
    .map_err(CallError::Database)?;

    tracing::info!(
        "Route {}/{} saved (enabled={})",
        hospital.code,
        route.key,
        route.is_enabled
    );

    Ok(Json(RouteAdminEntry::from(Route::from(route))))
}
