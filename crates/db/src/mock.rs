use async_trait::async_trait;
use chrono::NaiveDate;
use duxcall_core::{
    models::schedule::{DayHours, RouteException},
    ScheduleStore,
};
use mockall::mock;
use uuid::Uuid;

// Mock store for testing the resolver without a database
mock! {
    pub ScheduleStore {}

    #[async_trait]
    impl ScheduleStore for ScheduleStore {
        async fn latest_exception_covering(
            &self,
            route_id: Uuid,
            date: NaiveDate,
        ) -> eyre::Result<Option<RouteException>>;

        async fn exception_hours(
            &self,
            exception_id: Uuid,
            dow: i16,
        ) -> eyre::Result<Option<DayHours>>;

        async fn weekly_hours(
            &self,
            route_id: Uuid,
            dow: i16,
        ) -> eyre::Result<Option<DayHours>>;
    }
}
