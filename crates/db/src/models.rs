use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use duxcall_core::models::{
    hospital::Hospital,
    news::{News, NewsPriority},
    route::Route,
    schedule::{DayHours, RouteException},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHospital {
    pub id: Uuid,
    pub hospital_code: String,
    pub name: String,
    pub timezone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbHospital> for Hospital {
    fn from(row: DbHospital) -> Self {
        Self {
            id: row.id,
            code: row.hospital_code,
            name: row.name,
            timezone: row.timezone,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoute {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub key: String,
    pub label: String,
    pub phone: String,
    pub is_enabled: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbRoute> for Route {
    fn from(row: DbRoute) -> Self {
        Self {
            id: row.id,
            hospital_id: row.hospital_id,
            key: row.key,
            label: row.label,
            phone: row.phone,
            is_enabled: row.is_enabled,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row of `route_weekly_hours` or `route_exception_hours`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDayHours {
    pub dow: i16,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub is_closed: bool,
}

impl From<DbDayHours> for DayHours {
    fn from(row: DbDayHours) -> Self {
        Self {
            is_closed: row.is_closed,
            open_time: row.open_time,
            close_time: row.close_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRouteException {
    pub id: Uuid,
    pub route_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DbRouteException> for RouteException {
    fn from(row: DbRouteException) -> Self {
        Self {
            id: row.id,
            route_id: row.route_id,
            start_date: row.start_date,
            end_date: row.end_date,
            title: row.title,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNews {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub priority: String,
    pub is_published: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<DbNews> for News {
    fn from(row: DbNews) -> Self {
        // The schema only admits the two known values.
        let priority = row.priority.parse().unwrap_or_else(|e| {
            tracing::warn!("News {} has unexpected priority: {}", row.id, e);
            NewsPriority::Normal
        });

        Self {
            id: row.id,
            hospital_id: row.hospital_id,
            title: row.title,
            body: row.body,
            priority,
            is_published: row.is_published,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPatientRegistration {
    pub id: Uuid,
    pub hospital_code: String,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}
