use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schedule::RouteStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
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

/// A route as listed on the patient profile, with today's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    pub key: String,
    pub label: String,
    pub phone: String,
    pub today: RouteStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRouteRequest {
    pub direction: MoveDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRouteResponse {
    pub key: String,
    pub moved: bool,
    pub sort_order: i32,
}

fn default_enabled() -> bool {
    true
}

/// A route as shown on the admin route list, disabled routes included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAdminEntry {
    pub key: String,
    pub label: String,
    pub phone: String,
    pub is_enabled: bool,
    pub sort_order: i32,
}

impl From<Route> for RouteAdminEntry {
    fn from(route: Route) -> Self {
        Self {
            key: route.key,
            label: route.label,
            phone: route.phone,
            is_enabled: route.is_enabled,
            sort_order: route.sort_order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteListResponse {
    pub hospital_code: String,
    pub routes: Vec<RouteAdminEntry>,
}

/// Create-or-update body for a route. A new route without `sort_order` is
/// placed at [`DEFAULT_SORT_ORDER`]; an existing one keeps its position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertRouteRequest {
    pub label: String,
    pub phone: String,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

pub const DEFAULT_SORT_ORDER: i32 = 10;
