use async_trait::async_trait;
use chrono::NaiveDate;
use duxcall_core::{
    models::schedule::{DayHours, RouteException},
    ScheduleStore,
};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::repositories::schedule;

/// [`ScheduleStore`] backed by the PostgreSQL schedule tables.
#[derive(Debug, Clone)]
pub struct PgScheduleStore {
    pool: Pool<Postgres>,
}

impl PgScheduleStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn latest_exception_covering(
        &self,
        route_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<RouteException>> {
        let exception = schedule::find_latest_exception(&self.pool, route_id, date).await?;
        Ok(exception.map(Into::into))
    }

    async fn exception_hours(&self, exception_id: Uuid, dow: i16) -> Result<Option<DayHours>> {
        let hours = schedule::get_exception_hours(&self.pool, exception_id, dow).await?;
        Ok(hours.map(Into::into))
    }

    async fn weekly_hours(&self, route_id: Uuid, dow: i16) -> Result<Option<DayHours>> {
        let hours = schedule::get_weekly_hours(&self.pool, route_id, dow).await?;
        Ok(hours.map(Into::into))
    }
}
