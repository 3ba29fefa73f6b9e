//! # Schedule Resolver
//!
//! Decides, for one route and one point in time, whether the route is open,
//! what today's window is, and when it next opens.
//!
//! The effective schedule for a date is picked in this order:
//!
//! 1. the hours of the most recently created exception covering the date,
//!    if that exception defines the date's day of week;
//! 2. the route's weekly hours for that day of week;
//! 3. otherwise the day is closed with source `none`.
//!
//! All local times are interpreted in the single zone given by
//! [`ResolverConfig`].

use chrono::{
    DateTime, Days, Duration, FixedOffset, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone,
    Utc,
};
use chrono_tz::Tz;
use eyre::Result;
use tracing::debug;
use uuid::Uuid;

use crate::{
    models::schedule::{day_index, DaySchedule, RouteStatus, StatusReason, TimeWindow},
    store::ScheduleStore,
};

/// Zone used when no other zone is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

/// Days scanned when looking for the next opening, today included.
pub const NEXT_OPEN_HORIZON_DAYS: u64 = 8;

/// Settings the resolver is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Zone used for "today" and for turning local times into instants.
    pub timezone: Tz,
}

impl ResolverConfig {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

/// Stateless resolver over a [`ScheduleStore`].
///
/// # Example
///
/// ```ignore
/// let store = PgScheduleStore::new(pool);
/// let resolver = ScheduleResolver::new(&store, ResolverConfig::new(chrono_tz::Asia::Tokyo));
/// let status = resolver.compute_route_status(route_id, Utc::now()).await?;
/// ```
pub struct ScheduleResolver<'a, S: ScheduleStore + ?Sized> {
    store: &'a S,
    config: ResolverConfig,
}

impl<'a, S: ScheduleStore + ?Sized> ScheduleResolver<'a, S> {
    pub fn new(store: &'a S, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }

    /// Effective schedule of `route_id` on `target_date`.
    pub async fn get_schedule_for_date(
        &self,
        route_id: Uuid,
        target_date: NaiveDate,
    ) -> Result<DaySchedule> {
        let dow = day_index(target_date);

        if let Some(exception) = self
            .store
            .latest_exception_covering(route_id, target_date)
            .await?
        {
            if let Some(hours) = self.store.exception_hours(exception.id, dow).await? {
                debug!(
                    "Route {} on {}: exception {} applies",
                    route_id, target_date, exception.id
                );
                return Ok(DaySchedule::from_exception(exception.title, hours));
            }
        }

        match self.store.weekly_hours(route_id, dow).await? {
            Some(hours) => Ok(DaySchedule::from_weekly(hours)),
            None => {
                debug!("Route {} on {}: no schedule defined", route_id, target_date);
                Ok(DaySchedule::undefined())
            }
        }
    }

    /// Earliest opening instant after `now` within the scan horizon.
    pub async fn find_next_open_at(
        &self,
        route_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<FixedOffset>>> {
        let now = now.with_timezone(&self.config.timezone);
        let next = self.scan_next_open(route_id, &now).await?;
        Ok(next.map(to_fixed))
    }

    /// Today's open/closed verdict for `route_id`.
    pub async fn compute_route_status(
        &self,
        route_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<RouteStatus> {
        let now = now.with_timezone(&self.config.timezone);
        let today = now.date_naive();

        let schedule = self.get_schedule_for_date(route_id, today).await?;
        let source = schedule.source;
        let bounds = schedule.bounds();
        let window = bounds.map(|(open, close)| TimeWindow::from_bounds(open, close));

        let Some((open, close)) = bounds else {
            return Ok(RouteStatus {
                is_open: false,
                reason: StatusReason::Closed,
                source,
                window,
                next_open_at: self.scan_next_open(route_id, &now).await?.map(to_fixed),
            });
        };

        // An inverted window is not guarded here; it never reads as open.
        let start = self.combine(today, open);
        let end = self.combine(today, close);

        let (reason, next_open_at) = if start <= now && now < end {
            (StatusReason::Open, None)
        } else if now < start {
            (StatusReason::BeforeOpen, Some(start))
        } else {
            (
                StatusReason::AfterClose,
                self.scan_next_open(route_id, &now).await?,
            )
        };

        Ok(RouteStatus {
            is_open: reason == StatusReason::Open,
            reason,
            source,
            window,
            next_open_at: next_open_at.map(to_fixed),
        })
    }

    async fn scan_next_open(
        &self,
        route_id: Uuid,
        now: &DateTime<Tz>,
    ) -> Result<Option<DateTime<Tz>>> {
        let today = now.date_naive();

        for offset in 0..NEXT_OPEN_HORIZON_DAYS {
            let Some(date) = today.checked_add_days(Days::new(offset)) else {
                break;
            };

            let schedule = self.get_schedule_for_date(route_id, date).await?;
            let Some((open, close)) = schedule.bounds() else {
                continue;
            };

            let opens_at = self.combine(date, open);

            // Today only counts if the opening is still ahead.
            if offset == 0 {
                if *now < opens_at {
                    return Ok(Some(opens_at));
                }
                continue;
            }

            if opens_at < self.combine(date, close) {
                return Ok(Some(opens_at));
            }
        }

        debug!(
            "Route {} has no opening within {} days of {}",
            route_id, NEXT_OPEN_HORIZON_DAYS, now
        );
        Ok(None)
    }

    /// Local `date` + `time` as an instant in the configured zone.
    ///
    /// Ambiguous local times take the earlier instant; times inside a DST gap
    /// are pushed forward by an hour.
    fn combine(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
        combine_local(self.config.timezone, date, time)
    }
}

pub(crate) fn combine_local(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let local = date.and_time(time);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => tz
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&local)),
    }
}

fn to_fixed(dt: DateTime<Tz>) -> DateTime<FixedOffset> {
    dt.with_timezone(&dt.offset().fix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_combine_uses_zone_offset() {
        let dt = combine_local(chrono_tz::Asia::Tokyo, date(2026, 3, 20), time(14, 0));

        assert_eq!(to_fixed(dt).to_rfc3339(), "2026-03-20T14:00:00+09:00");
    }

    #[test]
    fn test_combine_shifts_out_of_dst_gap() {
        // 02:30 does not exist in New York on 2026-03-08.
        let dt = combine_local(chrono_tz::America::New_York, date(2026, 3, 8), time(2, 30));

        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_combine_takes_earlier_instant_when_ambiguous() {
        // 01:30 happens twice in New York on 2026-11-01.
        let dt = combine_local(chrono_tz::America::New_York, date(2026, 11, 1), time(1, 30));

        assert_eq!(to_fixed(dt).to_rfc3339(), "2026-11-01T01:30:00-04:00");
    }

    #[test]
    fn test_default_config_is_tokyo() {
        assert_eq!(ResolverConfig::default().timezone, chrono_tz::Asia::Tokyo);
    }
}
