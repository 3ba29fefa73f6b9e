use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use uuid::Uuid;

use crate::models::schedule::{DayHours, RouteException};

/// Read-only queries the schedule resolver needs from the store.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// The exception covering `date` with the most recent `created_at`.
    /// Exact ties go to the larger id.
    async fn latest_exception_covering(
        &self,
        route_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<RouteException>>;

    async fn exception_hours(&self, exception_id: Uuid, dow: i16) -> Result<Option<DayHours>>;

    async fn weekly_hours(&self, route_id: Uuid, dow: i16) -> Result<Option<DayHours>>;
}
